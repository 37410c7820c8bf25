//! Identifiers for spaces, levels, and objects.
//!
//! Spaces form a graph with true cycles (a space may contain itself), so
//! nothing owns a space by pointer: objects refer to spaces by [`SpaceId`]
//! and the level resolves the id through its arena.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// =============================================================================
// SpaceId
// =============================================================================

/// Identifier of a space: a name plus an infinite tier.
///
/// The infinite tier marks the space's position in a self-similar nesting
/// sequence; exiting a space "forever" continues one tier higher, entering
/// forever one tier lower. Tier 0 is the ordinary copy.
#[derive(Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpaceId {
    /// Space name, shared across all tiers of the same space.
    pub name: Arc<str>,
    /// Infinite tier; negative tiers are the "inward" copies.
    pub tier: i32,
}

impl SpaceId {
    /// Creates a tier-0 id.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            tier: 0,
        }
    }

    /// Creates an id at an explicit tier.
    #[must_use]
    pub fn with_tier(name: impl Into<Arc<str>>, tier: i32) -> Self {
        Self {
            name: name.into(),
            tier,
        }
    }

    /// The same space shifted by `delta` infinite tiers.
    #[must_use]
    pub fn shifted(&self, delta: i32) -> Self {
        Self {
            name: Arc::clone(&self.name),
            tier: self.tier + delta,
        }
    }
}

impl fmt::Debug for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SpaceId({}@{})", self.name, self.tier)
    }
}

impl fmt::Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tier == 0 {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}@{}", self.name, self.tier)
        }
    }
}

// =============================================================================
// LevelId
// =============================================================================

/// Identifier of a level.
#[derive(Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LevelId(pub Arc<str>);

impl LevelId {
    /// Creates a level id from a name.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }
}

impl fmt::Debug for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LevelId({})", self.0)
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// ObjectId
// =============================================================================

/// Identity of one object, unique within a level.
///
/// Stable across in-place mutation; an object transferred to another space
/// is recreated there under a fresh id.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObjectId(pub u64);

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

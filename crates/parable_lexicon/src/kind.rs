//! The closed catalog of plain object categories.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A plain (non-text, non-reference) object category.
///
/// The set is closed; level files naming anything outside it fail to load.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(missing_docs)]
pub enum EntityKind {
    Baba,
    Keke,
    Me,
    Wall,
    Hedge,
    Ice,
    Tile,
    Grass,
    Water,
    Lava,
    Door,
    Key,
    Box,
    Rock,
    Fruit,
    Belt,
    Flag,
    Star,
    Orb,
    Cursor,
}

impl EntityKind {
    /// Every plain category, in catalog order.
    pub const ALL: [EntityKind; 20] = [
        EntityKind::Baba,
        EntityKind::Keke,
        EntityKind::Me,
        EntityKind::Wall,
        EntityKind::Hedge,
        EntityKind::Ice,
        EntityKind::Tile,
        EntityKind::Grass,
        EntityKind::Water,
        EntityKind::Lava,
        EntityKind::Door,
        EntityKind::Key,
        EntityKind::Box,
        EntityKind::Rock,
        EntityKind::Fruit,
        EntityKind::Belt,
        EntityKind::Flag,
        EntityKind::Star,
        EntityKind::Orb,
        EntityKind::Cursor,
    ];

    /// The serialized name of this category.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EntityKind::Baba => "baba",
            EntityKind::Keke => "keke",
            EntityKind::Me => "me",
            EntityKind::Wall => "wall",
            EntityKind::Hedge => "hedge",
            EntityKind::Ice => "ice",
            EntityKind::Tile => "tile",
            EntityKind::Grass => "grass",
            EntityKind::Water => "water",
            EntityKind::Lava => "lava",
            EntityKind::Door => "door",
            EntityKind::Key => "key",
            EntityKind::Box => "box",
            EntityKind::Rock => "rock",
            EntityKind::Fruit => "fruit",
            EntityKind::Belt => "belt",
            EntityKind::Flag => "flag",
            EntityKind::Star => "star",
            EntityKind::Orb => "orb",
            EntityKind::Cursor => "cursor",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

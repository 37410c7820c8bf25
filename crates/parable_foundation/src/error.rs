//! Error types shared by all Parable layers.
//!
//! Uses `thiserror`. Blocked moves are not errors (the resolver returns
//! `None`), and malformed token sequences panic because the scanner can
//! only produce sequences the grammar accepted; errors here are the
//! recoverable kind, almost all of them raised while loading levels.

use thiserror::Error;

use crate::ids::{LevelId, SpaceId};

/// Convenience alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for Parable operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A serialized object, text, or property name not present in the catalog.
    ///
    /// The loader must not guess a replacement category.
    #[error("unknown kind: {name}")]
    UnknownKind {
        /// The unrecognized serialized name.
        name: String,
    },

    /// An object referenced a space the level does not contain.
    #[error("missing space: {id}")]
    MissingSpace {
        /// The dangling space id.
        id: SpaceId,
    },

    /// An object referenced a level that is not known.
    #[error("missing level: {id}")]
    MissingLevel {
        /// The dangling level id.
        id: LevelId,
    },

    /// A reference object record lacked its space or level id.
    #[error("reference object without target: {detail}")]
    IncompleteRef {
        /// What was missing.
        detail: String,
    },

    /// Encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// File IO failed.
    #[error("io error: {0}")]
    Io(String),
}

impl Error {
    /// Creates an unknown-kind error.
    #[must_use]
    pub fn unknown_kind(name: impl Into<String>) -> Self {
        Error::UnknownKind { name: name.into() }
    }

    /// Creates a missing-space error.
    #[must_use]
    pub fn missing_space(id: SpaceId) -> Self {
        Error::MissingSpace { id }
    }
}

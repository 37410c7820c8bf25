//! Core geometry, identifiers, and error types for Parable.
//!
//! This crate provides:
//! - [`Point`], [`Size`], [`Orient`] - grid geometry
//! - [`SpaceTransform`] - rotation/flip transforms on nested spaces
//! - [`SpaceId`], [`LevelId`], [`ObjectId`] - identifiers
//! - [`Error`] - the error type shared by all layers

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod ids;
pub mod loc;

pub use error::{Error, Result};
pub use ids::{LevelId, ObjectId, SpaceId};
pub use loc::{Orient, Point, Size, SpaceTransform};

//! Objects, spaces, and the nesting grid model for Parable.
//!
//! This crate provides:
//! - [`Object`] and [`Body`] - one thing on a grid: a plain entity, a text
//!   token, or a reference to a space or level
//! - [`Space`] - a grid of objects with a position index, per-variant
//!   scoped property channels, and the continuous-coordinate mapping used
//!   when motion crosses a space boundary
//! - [`Level`] - the arena owning every space, the scoped stores, and the
//!   turn-transient sound log and RNG
//!
//! Spaces never own each other. A space-reference object carries only a
//! [`SpaceId`](parable_foundation::SpaceId); the level's arena resolves it,
//! which is what makes cyclic and self-embedding nesting representable.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod level;
pub mod object;
pub mod space;

pub use level::{Level, Sound};
pub use object::{Body, Object, OldState, SpaceVariant, same_float};
pub use space::Space;

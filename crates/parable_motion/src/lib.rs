//! Recursive movement resolution across nested spaces.
//!
//! One attempted move can fan out into a cascade: pushes push further
//! pushes, exits climb into containing spaces, enters descend into nested
//! ones, and a pushed space can swallow what stands in its way. The
//! resolver in [`resolve`] computes the whole cascade as a move list, or
//! `None` when the attempt is blocked; [`apply`] executes a list.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod resolve;

pub use resolve::{MAX_DEPTH, MoveStep, apply_moves, resolve_move};

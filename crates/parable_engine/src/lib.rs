//! Turn orchestration, rule recompilation, and terminal checks for Parable.
//!
//! A turn runs to completion synchronously:
//! 1. previous-turn state is snapshotted, rules recompile (two passes, so
//!    WORD grants become visible to the second scan)
//! 2. the input move and the automatic MOVE/SHIFT phases run, in tier
//!    rounds capped at [`turn::MAX_ROUNDS`]
//! 3. transforms, teleports, and the terminal rules fire
//! 4. win/end are decided and the outcome surfaces to the caller

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod recompile;
pub mod terminal;
pub mod transform;
pub mod turn;

pub use recompile::recompile_rules;
pub use turn::{Input, TurnOutcome, play_turn};

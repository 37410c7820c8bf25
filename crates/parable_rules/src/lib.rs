//! Rule grammar, board scanner, and grant compiler for Parable.
//!
//! Straight lines of text objects become rules in three steps:
//! 1. [`scanner::scan_space`] walks both axes of a grid, matching token
//!    runs against the grammar state machine in [`grammar`]
//! 2. each accepted run is folded into a [`RuleInfo`] by the builder in
//!    [`info`]
//! 3. [`compile::apply_rules`] evaluates prefix and infix filters per
//!    object and writes property grants into the stores

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod compile;
pub mod grammar;
pub mod info;
pub mod scanner;

pub use compile::{Scope, ScopedGrant, apply_rules};
pub use info::{InfixCond, InfixTarget, OperClause, PrefixCond, RuleInfo, SubjectSpec, TargetSpec};
pub use scanner::{RuleEntry, parse, scan_space, try_parse};

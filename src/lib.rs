//! Parable - a puzzle-game core where the rules are objects on the board
//! and spaces nest inside themselves without bound.
//!
//! This crate re-exports all layers for convenient access. For detailed
//! documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: parable_runtime    — serialization, REPL
//! Layer 4: parable_engine     — turn driver, recompilation, terminal rules
//! Layer 3: parable_rules      — grammar, scanner, grant compiler
//!          parable_motion     — recursive movement resolver
//! Layer 2: parable_world      — objects, spaces, the level arena
//! Layer 1: parable_props      — tiered property grants and resolution
//!          parable_lexicon    — vocabulary, tokens, catalog
//! Layer 0: parable_foundation — geometry, ids, errors
//! ```

pub use parable_engine as engine;
pub use parable_foundation as foundation;
pub use parable_lexicon as lexicon;
pub use parable_motion as motion;
pub use parable_props as props;
pub use parable_rules as rules;
pub use parable_runtime as runtime;
pub use parable_world as world;

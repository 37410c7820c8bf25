//! Level serialization and the interactive REPL for Parable.
//!
//! Levels persist as a tree of typed records: level → spaces → objects,
//! with categories stored under their serialized names. Loading resolves
//! every name through the [`Catalog`](parable_lexicon::Catalog) and fails
//! with a recoverable error on anything unknown; it never guesses.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod record;
pub mod render;
pub mod serialize;

pub use record::{LevelRecord, ObjectRecord, SpaceRecord, level_to_record, record_to_level};
pub use serialize::{from_bytes, from_json, load_from_file, save_to_file, to_bytes, to_json};

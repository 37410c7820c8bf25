//! Level (de)serialization: MessagePack for saves, JSON for hand-written
//! level files.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use parable_foundation::{Error, Result};
use parable_lexicon::Catalog;
use parable_world::Level;

use crate::record::{LevelRecord, level_to_record, record_to_level};

/// Serializes a level to `MessagePack` bytes.
///
/// Uses named serialization so field names survive format evolution.
///
/// # Errors
/// Returns an error if encoding fails.
pub fn to_bytes(level: &Level, catalog: &Catalog) -> Result<Vec<u8>> {
    let record = level_to_record(level, catalog);
    rmp_serde::to_vec_named(&record).map_err(|e| Error::Serialization(e.to_string()))
}

/// Deserializes a level from `MessagePack` bytes.
///
/// # Errors
/// Returns an error if decoding fails or a category is unknown.
pub fn from_bytes(bytes: &[u8], catalog: &Catalog) -> Result<Level> {
    let record: LevelRecord =
        rmp_serde::from_slice(bytes).map_err(|e| Error::Serialization(e.to_string()))?;
    record_to_level(&record, catalog)
}

/// Serializes a level to pretty JSON.
///
/// # Errors
/// Returns an error if encoding fails.
pub fn to_json(level: &Level, catalog: &Catalog) -> Result<String> {
    let record = level_to_record(level, catalog);
    serde_json::to_string_pretty(&record).map_err(|e| Error::Serialization(e.to_string()))
}

/// Deserializes a level from JSON.
///
/// # Errors
/// Returns an error if decoding fails or a category is unknown.
pub fn from_json(json: &str, catalog: &Catalog) -> Result<Level> {
    let record: LevelRecord =
        serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;
    record_to_level(&record, catalog)
}

/// Saves a level to a file; `.json` extensions get JSON, everything else
/// `MessagePack`.
///
/// # Errors
/// Returns an error on IO or encoding failure.
pub fn save_to_file<P: AsRef<Path>>(level: &Level, catalog: &Catalog, path: P) -> Result<()> {
    let path = path.as_ref();
    let bytes = if path.extension().is_some_and(|e| e == "json") {
        to_json(level, catalog)?.into_bytes()
    } else {
        to_bytes(level, catalog)?
    };
    let file = File::create(path)
        .map_err(|e| Error::Io(format!("failed to create '{}': {e}", path.display())))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(&bytes)
        .map_err(|e| Error::Io(format!("failed to write '{}': {e}", path.display())))?;
    writer
        .flush()
        .map_err(|e| Error::Io(format!("failed to flush '{}': {e}", path.display())))
}

/// Loads a level from a file, format chosen by extension as in
/// [`save_to_file`].
///
/// # Errors
/// Returns an error on IO or decoding failure.
pub fn load_from_file<P: AsRef<Path>>(catalog: &Catalog, path: P) -> Result<Level> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| Error::Io(format!("failed to open '{}': {e}", path.display())))?;
    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| Error::Io(format!("failed to read '{}': {e}", path.display())))?;
    if path.extension().is_some_and(|e| e == "json") {
        let text =
            String::from_utf8(bytes).map_err(|e| Error::Serialization(e.to_string()))?;
        from_json(&text, catalog)
    } else {
        from_bytes(&bytes, catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::level_to_record;
    use parable_foundation::{LevelId, Point, Size, SpaceId};
    use parable_lexicon::EntityKind;
    use parable_world::{Body, Space};

    fn sample_level() -> Level {
        let root = Space::new(SpaceId::new("main"), Size::new(4, 4));
        let mut level = Level::new(LevelId::new("save-test"), root, 0);
        let root_id = level.root.clone();
        let _ = level.spawn(&root_id, Point::new(1, 2), Body::Plain(EntityKind::Baba));
        let _ = level.spawn(&root_id, Point::new(2, 2), Body::Plain(EntityKind::Rock));
        level
    }

    #[test]
    fn messagepack_round_trip() {
        let catalog = Catalog::new();
        let level = sample_level();
        let bytes = to_bytes(&level, &catalog).unwrap();
        let back = from_bytes(&bytes, &catalog).unwrap();
        assert_eq!(
            level_to_record(&level, &catalog),
            level_to_record(&back, &catalog)
        );
    }

    #[test]
    fn json_round_trip() {
        let catalog = Catalog::new();
        let level = sample_level();
        let json = to_json(&level, &catalog).unwrap();
        let back = from_json(&json, &catalog).unwrap();
        assert_eq!(
            level_to_record(&level, &catalog),
            level_to_record(&back, &catalog)
        );
    }

    #[test]
    fn corrupt_bytes_fail_cleanly() {
        let catalog = Catalog::new();
        assert!(matches!(
            from_bytes(&[0xFF, 0x00, 0x13], &catalog),
            Err(Error::Serialization(_))
        ));
    }
}

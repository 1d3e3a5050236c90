//! JSON serialization for schema registries.
//!
//! Registries are plain data, so hosts can carry their dictionary in a JSON
//! file instead of compiling it in. The built-in registry and a file-loaded
//! one are interchangeable.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::registry::SchemaRegistry;
use crate::error::TransomError;

/// Reads a schema registry from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_schema_json(path: &Path) -> Result<SchemaRegistry, TransomError> {
    let file = File::open(path).map_err(TransomError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| TransomError::SchemaJsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a schema registry to a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_schema_json(path: &Path, registry: &SchemaRegistry) -> Result<(), TransomError> {
    let file = File::create(path).map_err(TransomError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, registry).map_err(|source| {
        TransomError::SchemaJsonWrite {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Reads a schema registry from a JSON string.
///
/// Useful for testing without file I/O.
pub fn from_json_str(json: &str) -> Result<SchemaRegistry, serde_json::Error> {
    serde_json::from_str(json)
}

/// Writes a schema registry to a JSON string.
///
/// Useful for testing without file I/O.
pub fn to_json_string(registry: &SchemaRegistry) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(registry)
}

//! JSON serialization for model graphs.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::graph::ModelGraph;
use crate::error::TransomError;

/// Reads a model graph from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_model_json(path: &Path) -> Result<ModelGraph, TransomError> {
    let file = File::open(path).map_err(TransomError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| TransomError::ModelJsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a model graph to a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_model_json(path: &Path, graph: &ModelGraph) -> Result<(), TransomError> {
    let file = File::create(path).map_err(TransomError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, graph).map_err(|source| TransomError::ModelJsonWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a model graph from a JSON string.
///
/// Useful for testing without file I/O.
pub fn from_json_str(json: &str) -> Result<ModelGraph, serde_json::Error> {
    serde_json::from_str(json)
}

/// Writes a model graph to a JSON string.
///
/// Useful for testing without file I/O.
pub fn to_json_string(graph: &ModelGraph) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(graph)
}

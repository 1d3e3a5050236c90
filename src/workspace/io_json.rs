//! JSON serialization for workspaces.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::record::Workspace;
use crate::error::TransomError;

/// Reads a workspace from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_workspace_json(path: &Path) -> Result<Workspace, TransomError> {
    let file = File::open(path).map_err(TransomError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| TransomError::WorkspaceJsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a workspace to a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_workspace_json(path: &Path, workspace: &Workspace) -> Result<(), TransomError> {
    let file = File::create(path).map_err(TransomError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, workspace).map_err(|source| {
        TransomError::WorkspaceJsonWrite {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Reads a workspace from a JSON string.
///
/// Useful for testing without file I/O.
pub fn from_json_str(json: &str) -> Result<Workspace, serde_json::Error> {
    serde_json::from_str(json)
}

/// Writes a workspace to a JSON string.
///
/// Useful for testing without file I/O.
pub fn to_json_string(workspace: &Workspace) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(workspace)
}

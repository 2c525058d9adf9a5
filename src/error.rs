//! Error types for log document loading

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort parsing a log export. Everything below the document
/// structure (odd amounts, unknown spec IDs, out-of-window events) degrades
/// in place instead of surfacing here.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read log file {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed log document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unsupported schema version {0}")]
    UnsupportedSchema(u32),
}

//! Error types.

use std::path::PathBuf;

/// Errors that abort an invocation.
///
/// Malformed records and unknown lookups never surface here; they are skipped
/// or reported as "no information available".
#[derive(Debug, thiserror::Error)]
pub enum UtiError {
    #[error("Failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("Failed to read dump file {path}: {source}")]
    DumpFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read config {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("Invalid hardware denylist: {0}")]
    Denylist(String),

    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

//! Registry dump acquisition.
//!
//! The dump is always captured in full before parsing starts.

use std::path::Path;

use crate::config::DumpConfig;
use crate::error::UtiError;
use crate::process::run_checked;

/// Where the dump text comes from.
#[derive(Debug, Clone, Copy)]
pub enum DumpSource<'a> {
    /// Run `lsregister` as configured.
    Lsregister(&'a DumpConfig),
    /// A dump captured earlier and saved to disk.
    File(&'a Path),
}

impl DumpSource<'_> {
    /// Short description for progress messages.
    pub fn describe(&self) -> String {
        match self {
            DumpSource::Lsregister(_) => "Reading Launch Services database...".to_string(),
            DumpSource::File(path) => format!("Reading {}...", path.display()),
        }
    }
}

/// Reads the complete dump text.
///
/// # Errors
///
/// Fails if `lsregister` cannot be run or exits non-zero, or if the dump file
/// cannot be read. Nothing is parsed from a failed run.
pub async fn read_dump(source: DumpSource<'_>) -> Result<String, UtiError> {
    match source {
        DumpSource::Lsregister(config) => run_checked(&config.lsregister, &config.args).await,
        DumpSource::File(path) => {
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|source| UtiError::DumpFile {
                    path: path.to_path_buf(),
                    source,
                })?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}

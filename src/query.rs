//! File, extension, MIME type and UTI queries.
//!
//! A file's type comes from the metadata tool (`mdls`) when it can answer, and
//! from the registry's extension table otherwise. Extension, MIME and UTI
//! queries go straight to a [`TypeRegistry`].

use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::process::run;
use crate::types::{TypeInfo, TypeRegistry};

/// Content type reported for directories that are not walked.
pub const FOLDER_UTI: &str = "public.folder";

const CONTENT_TYPE_ATTRIBUTE: &str = "kMDItemContentType";
const NULL_VALUE: &str = "(null)";

/// How a file's type was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    Metadata,
    Extension,
    Folder,
}

/// The type of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileType {
    #[serde(skip)]
    pub path: PathBuf,
    pub uti: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_by: Option<Resolution>,
}

impl FileType {
    fn unresolved(path: PathBuf) -> Self {
        Self {
            path,
            uti: None,
            resolved_by: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.uti.is_some()
    }
}

/// Paths gathered from the command line.
#[derive(Debug, Default)]
pub struct Targets {
    /// Regular files to query.
    pub files: Vec<PathBuf>,
    /// Directories reported as folders.
    pub folders: Vec<PathBuf>,
    /// Arguments that did not resolve to an existing path.
    pub missing: Vec<String>,
    /// Every file and folder in command-line order.
    order: Vec<PathBuf>,
}

impl Targets {
    fn push_file(&mut self, path: PathBuf) {
        self.order.push(path.clone());
        self.files.push(path);
    }

    fn push_folder(&mut self, path: PathBuf) {
        self.order.push(path.clone());
        self.folders.push(path);
    }

    /// Sorts results back into command-line order.
    ///
    /// Paths this set never collected go last.
    pub fn sort_results(&self, results: &mut [FileType]) {
        let position: HashMap<&Path, usize> = self
            .order
            .iter()
            .enumerate()
            .rev()
            .map(|(index, path)| (path.as_path(), index))
            .collect();
        results.sort_by_key(|file| {
            position
                .get(file.path.as_path())
                .copied()
                .unwrap_or(usize::MAX)
        });
    }
}

/// Expands a leading `~` and makes the path absolute.
///
/// # Returns
///
/// `None` if the path does not exist.
pub fn normalize_path(input: &str) -> Option<PathBuf> {
    let expanded = match input.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => {
            let home = std::env::var_os("HOME")?;
            PathBuf::from(home).join(rest.trim_start_matches('/'))
        }
        _ => PathBuf::from(input),
    };

    expanded.canonicalize().ok()
}

/// Normalizes an extension argument to the lowercase, dot-prefixed form.
///
/// # Examples
///
/// ```
/// use uti::query::normalize_extension;
///
/// assert_eq!(normalize_extension("TXT"), ".txt");
/// assert_eq!(normalize_extension(".md"), ".md");
/// ```
pub fn normalize_extension(input: &str) -> String {
    let trimmed = input.trim().trim_start_matches('.');
    format!(".{}", trimmed.to_lowercase())
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

/// Resolves command-line paths into files and folders.
///
/// Directories are walked when `recursive` is set, skipping hidden entries.
pub fn collect_targets(inputs: &[String], recursive: bool) -> Targets {
    let mut targets = Targets::default();

    for input in inputs {
        let Some(path) = normalize_path(input) else {
            targets.missing.push(input.clone());
            continue;
        };

        if !path.is_dir() {
            targets.push_file(path);
            continue;
        }

        if !recursive {
            targets.push_folder(path);
            continue;
        }

        for entry in WalkDir::new(&path).into_iter().filter_entry(|e| !is_hidden(e)) {
            match entry {
                Ok(entry) if entry.file_type().is_file() => {
                    targets.push_file(entry.into_path());
                }
                Err(e) => tracing::warn!("Error walking directory: {}", e),
                _ => {}
            }
        }
    }

    targets
}

/// Asks the metadata tool for a file's content type.
///
/// Any failure (tool missing, non-zero exit, no value) yields `None`.
pub async fn metadata_content_type(mdls: &str, path: &Path) -> Option<String> {
    let args = vec![
        "-raw".to_string(),
        "-name".to_string(),
        CONTENT_TYPE_ATTRIBUTE.to_string(),
        path.display().to_string(),
    ];

    let output = match run(mdls, &args).await {
        Ok(output) if output.success() => output,
        Ok(output) => {
            tracing::debug!(path = %path.display(), stderr = %output.stderr.trim(), "metadata lookup failed");
            return None;
        }
        Err(e) => {
            tracing::debug!("metadata tool unavailable: {}", e);
            return None;
        }
    };

    parse_metadata_value(&output.stdout)
}

/// Extracts the attribute value from `mdls -raw` output.
fn parse_metadata_value(stdout: &str) -> Option<String> {
    let value = stdout.trim().trim_matches('"');
    if value.is_empty() || value == NULL_VALUE {
        return None;
    }
    Some(value.to_string())
}

/// Looks up each file's type through the metadata tool, at most
/// `max_concurrent` at a time. Results keep the input order.
pub async fn identify_by_metadata(
    mdls: &str,
    files: Vec<PathBuf>,
    max_concurrent: usize,
) -> Vec<FileType> {
    stream::iter(files)
        .map(|path| async move {
            match metadata_content_type(mdls, &path).await {
                Some(uti) => FileType {
                    path,
                    uti: Some(uti),
                    resolved_by: Some(Resolution::Metadata),
                },
                None => FileType::unresolved(path),
            }
        })
        .buffered(max_concurrent.max(1))
        .collect::<Vec<_>>()
        .await
}

/// Fills in unresolved files from the registry's extension table.
pub fn resolve_by_extension(files: &mut [FileType], registry: &dyn TypeRegistry) {
    for file in files.iter_mut().filter(|f| !f.is_resolved()) {
        let Some(extension) = file.path.extension().and_then(|e| e.to_str()) else {
            continue;
        };

        let candidates = registry.types_for_extension(&normalize_extension(extension));
        if let Some(info) = preferred_type(&candidates) {
            file.uti = Some(info.identifier.clone());
            file.resolved_by = Some(Resolution::Extension);
        }
    }
}

/// Picks the best of several types claiming the same tag: non-dynamic types
/// first, then the lexically smallest identifier.
pub fn preferred_type(candidates: &[TypeInfo]) -> Option<&TypeInfo> {
    candidates
        .iter()
        .min_by(|a, b| (a.dynamic, &a.identifier).cmp(&(b.dynamic, &b.identifier)))
}

/// Types for a folder argument.
pub fn folder_types(folders: Vec<PathBuf>) -> Vec<FileType> {
    folders
        .into_iter()
        .map(|path| FileType {
            path,
            uti: Some(FOLDER_UTI.to_string()),
            resolved_by: Some(Resolution::Folder),
        })
        .collect()
}

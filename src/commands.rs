//! Command handlers.
//!
//! Each handler loads what it needs, renders to stdout and reports progress and
//! per-query problems on stderr. Unknown queries are reported and skipped; only
//! failures to obtain the registry or to write output abort a command.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::config::Config;
use crate::dump::{DumpSource, read_dump};
use crate::format::{OutputOptions, Presenter, Styles};
use crate::query::{
    collect_targets, folder_types, identify_by_metadata, normalize_extension,
    resolve_by_extension,
};
use crate::registry::Aggregator;
use crate::types::{TypeInfo, TypeRegistry};
use crate::tui::UI;

/// What a type query argument names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Extension,
    Identifier,
    MimeType,
}

/// Shared state for one invocation.
pub struct App {
    pub config: Config,
    pub options: OutputOptions,
    pub ui: UI,
    /// Saved dump to read instead of running lsregister.
    pub dump_file: Option<PathBuf>,
}

impl App {
    pub fn new(config: Config, options: OutputOptions, dump_file: Option<PathBuf>, quiet: bool) -> Self {
        let ui = UI::new()
            .with_color_theme(config.ui.color.theme.clone())
            .with_quiet(quiet);
        Self {
            config,
            options,
            ui,
            dump_file,
        }
    }

    fn dump_source(&self) -> DumpSource<'_> {
        match &self.dump_file {
            Some(path) => DumpSource::File(path),
            None => DumpSource::Lsregister(&self.config.dump),
        }
    }

    fn presenter(&self) -> Presenter {
        let styles = if !self.options.json_output && console::colors_enabled() {
            Styles::themed(&self.config.ui.color.theme)
        } else {
            Styles::plain()
        };
        Presenter::new(self.options, styles)
    }

    /// Captures and parses the registry dump behind a spinner.
    ///
    /// The spinner is cleared before this returns, so nothing it draws can
    /// interleave with output.
    pub async fn load_registry(&self) -> color_eyre::Result<Aggregator> {
        let source = self.dump_source();
        let spinner = self.ui.create_spinner(&source.describe());

        let dump = read_dump(source).await;
        let dump = match dump {
            Ok(dump) => dump,
            Err(e) => {
                spinner.finish_and_clear();
                return Err(e.into());
            }
        };

        spinner.set_message("Parsing type records...");
        let registry = Aggregator::from_dump(&dump, &self.config.noise_filter());
        spinner.finish_and_clear();

        let stats = registry.stats();
        tracing::debug!(
            records = stats.records,
            skipped = stats.skipped,
            merged = stats.merged,
            "registry loaded"
        );
        self.ui.print_info(&format!(
            "Loaded {} types from {} records",
            registry.len(),
            stats.records
        ))?;
        Ok(registry)
    }

    fn no_information(&self, subject: &str) -> io::Result<()> {
        self.ui
            .print_warning(&format!("No information available for {subject}"))
    }
}

/// Lists the whole registry.
pub async fn handle_dump(app: &App) -> color_eyre::Result<()> {
    let registry = app.load_registry().await?;

    let mut stdout = io::stdout().lock();
    app.presenter().registry(&registry, &mut stdout)?;
    stdout.flush()?;

    let listed = if app.options.by_app {
        format!("Listed {} apps", registry.by_app().len())
    } else {
        format!("Listed {} types", registry.len())
    };
    app.ui.print_success(&listed)?;
    Ok(())
}

/// Looks up extensions, MIME types or identifiers in a registry.
///
/// Queries with no match are reported on the status channel and left out of
/// the results.
pub fn lookup_types(
    app: &App,
    registry: &dyn TypeRegistry,
    kind: QueryKind,
    queries: &[String],
) -> io::Result<BTreeMap<String, Vec<TypeInfo>>> {
    let mut results = BTreeMap::new();

    for query in queries {
        let (key, found) = match kind {
            QueryKind::Extension => {
                let extension = normalize_extension(query);
                let found = registry.types_for_extension(&extension);
                (extension, found)
            }
            QueryKind::MimeType => {
                let mime_type = query.trim().to_lowercase();
                let found = registry.types_for_mime_type(&mime_type);
                (mime_type, found)
            }
            QueryKind::Identifier => {
                let identifier = query.trim().to_string();
                let found = registry
                    .type_for_identifier(&identifier)
                    .into_iter()
                    .collect::<Vec<_>>();
                (identifier, found)
            }
        };

        if found.is_empty() {
            app.no_information(query)?;
            continue;
        }
        results.insert(key, found);
    }

    Ok(results)
}

/// Reports the types behind extensions, MIME types or identifiers.
pub async fn handle_types(app: &App, kind: QueryKind, queries: &[String]) -> color_eyre::Result<()> {
    let registry = app.load_registry().await?;
    let results = lookup_types(app, &registry, kind, queries)?;

    let mut stdout = io::stdout().lock();
    app.presenter().type_queries(&results, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

/// Reports the UTI of each file.
///
/// The metadata tool is asked first. Files it cannot answer for are matched by
/// extension against the registry, which is only loaded when needed.
pub async fn handle_files(app: &App, paths: &[String], recursive: bool) -> color_eyre::Result<()> {
    let mut targets = collect_targets(paths, recursive);
    for missing in &targets.missing {
        app.no_information(missing)?;
    }

    let mut files = identify_by_metadata(
        &app.config.query.mdls,
        std::mem::take(&mut targets.files),
        app.config.query.max_concurrent_lookups,
    )
    .await;

    if files.iter().any(|f| !f.is_resolved()) {
        match app.load_registry().await {
            Ok(registry) => resolve_by_extension(&mut files, &registry),
            Err(e) if app.dump_file.is_none() => {
                tracing::debug!("registry unavailable: {:?}", e);
                app.ui
                    .print_warning("Launch Services registry unavailable; extension lookup skipped")?;
            }
            Err(e) => return Err(e),
        }
    }

    for file in files.iter().filter(|f| !f.is_resolved()) {
        app.no_information(&file.path.display().to_string())?;
    }

    let mut results = folder_types(std::mem::take(&mut targets.folders));
    results.append(&mut files);
    targets.sort_results(&mut results);

    let mut stdout = io::stdout().lock();
    app.presenter().file_types(&results, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::UtiRecord;

    fn app() -> App {
        App::new(Config::default(), OutputOptions::default(), None, true)
    }

    fn registry() -> Aggregator {
        let mut aggregator = Aggregator::new();
        let mut text = UtiRecord::new("public.plain-text");
        text.extensions.insert(".txt".to_string());
        text.mime_types.insert("text/plain".to_string());
        aggregator.insert(text);
        aggregator
    }

    fn queries(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_lookup_extensions_normalizes_keys() {
        let results = lookup_types(
            &app(),
            &registry(),
            QueryKind::Extension,
            &queries(&["TXT", ".nope"]),
        )
        .unwrap();

        assert_eq!(results.keys().collect::<Vec<_>>(), vec![".txt"]);
        assert_eq!(results[".txt"][0].identifier, "public.plain-text");
    }

    #[test]
    fn test_lookup_identifiers_skips_unknown() {
        let results = lookup_types(
            &app(),
            &registry(),
            QueryKind::Identifier,
            &queries(&["com.example.none", "public.plain-text"]),
        )
        .unwrap();

        assert_eq!(results.len(), 1);
        assert!(results.contains_key("public.plain-text"));
    }

    #[test]
    fn test_lookup_mime_types() {
        let results = lookup_types(
            &app(),
            &registry(),
            QueryKind::MimeType,
            &queries(&["Text/Plain"]),
        )
        .unwrap();

        assert_eq!(results["text/plain"].len(), 1);
    }

    #[tokio::test]
    async fn test_load_registry_from_file() {
        let dump = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            dump.path(),
            format!(
                "type id: public.data (0x1)\nbundle: Finder (0x2)\n{}\n",
                crate::registry::RECORD_DELIMITER
            ),
        )
        .unwrap();

        let app = App::new(
            Config::default(),
            OutputOptions::default(),
            Some(dump.path().to_path_buf()),
            true,
        );
        let registry = app.load_registry().await.unwrap();

        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_load_registry_missing_file_is_fatal() {
        let app = App::new(
            Config::default(),
            OutputOptions::default(),
            Some(PathBuf::from("/nonexistent/dump.txt")),
            true,
        );

        assert!(app.load_registry().await.is_err());
    }
}

//! Output rendering.
//!
//! Every view renders either as sorted, labelled text for people or as a JSON
//! document for tools. Both are deterministic: maps are ordered and JSON objects
//! are emitted with sorted keys.

use console::Style;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

use crate::error::UtiError;
use crate::query::FileType;
use crate::registry::{AppRecord, Aggregator, UtiRecord};
use crate::tui::theme_style;
use crate::types::{TagClass, TypeInfo};

const INDENT: &str = "    ";

/// Output switches chosen on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputOptions {
    /// Emit JSON instead of text
    pub json_output: bool,
    /// Key the registry listing by app instead of by UTI
    pub by_app: bool,
}

/// Styles applied to human-readable output.
#[derive(Debug, Clone)]
pub struct Styles {
    pub heading: Style,
    pub label: Style,
}

impl Styles {
    /// No styling at all.
    pub fn plain() -> Self {
        Self {
            heading: Style::new(),
            label: Style::new(),
        }
    }

    /// Styles for the named color theme.
    pub fn themed(theme: &str) -> Self {
        Self {
            heading: theme_style(theme).bold(),
            label: Style::new().dim(),
        }
    }
}

impl Default for Styles {
    fn default() -> Self {
        Self::plain()
    }
}

fn plural(label: &str, count: usize) -> String {
    if count == 1 {
        label.to_string()
    } else {
        format!("{label}s")
    }
}

/// Writes `value` as pretty JSON with every object's keys sorted.
pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<(), UtiError> {
    // serde_json's Value map is ordered, so the round trip sorts struct fields
    // as well as map keys.
    let value = serde_json::to_value(value)?;
    serde_json::to_writer_pretty(&mut *out, &value)?;
    writeln!(out)?;
    Ok(())
}

/// Renders parsed records and query results.
#[derive(Debug, Clone, Default)]
pub struct Presenter {
    options: OutputOptions,
    styles: Styles,
}

impl Presenter {
    pub fn new(options: OutputOptions, styles: Styles) -> Self {
        Self { options, styles }
    }

    fn line<W: Write>(&self, out: &mut W, label: &str, values: &[&str]) -> std::io::Result<()> {
        if values.is_empty() {
            return Ok(());
        }
        let label = plural(label, values.len());
        writeln!(
            out,
            "{INDENT}{} {}",
            self.styles.label.apply_to(format!("{label}:")),
            values.join(", ")
        )
    }

    fn heading<W: Write>(&self, out: &mut W, text: &str) -> std::io::Result<()> {
        writeln!(out, "{}", self.styles.heading.apply_to(text))
    }

    /// Renders the whole registry, keyed by UTI or by app depending on the
    /// options.
    pub fn registry<W: Write>(&self, aggregate: &Aggregator, out: &mut W) -> Result<(), UtiError> {
        match (self.options.json_output, self.options.by_app) {
            (true, false) => write_json(out, aggregate.by_uti()),
            (true, true) => write_json(out, &aggregate.by_app()),
            (false, false) => {
                let mut first = true;
                for record in aggregate.records() {
                    if !first {
                        writeln!(out)?;
                    }
                    first = false;
                    self.uti_record(record, out)?;
                }
                Ok(())
            }
            (false, true) => {
                let mut first = true;
                for app in aggregate.by_app().values() {
                    if !first {
                        writeln!(out)?;
                    }
                    first = false;
                    self.app_record(app, out)?;
                }
                Ok(())
            }
        }
    }

    fn uti_record<W: Write>(&self, record: &UtiRecord, out: &mut W) -> std::io::Result<()> {
        self.heading(out, &record.uti)?;

        let extensions: Vec<&str> = record.extensions.iter().map(String::as_str).collect();
        let mime_types: Vec<&str> = record.mime_types.iter().map(String::as_str).collect();
        let parents: Vec<&str> = record.parents.iter().map(String::as_str).collect();
        let apps: Vec<&str> = record.app_names().collect();

        self.line(out, "extension", &extensions)?;
        self.line(out, "MIME type", &mime_types)?;
        self.line(out, "parent", &parents)?;
        if let Some(reference) = record.reference.as_deref().filter(|r| !r.is_empty()) {
            self.line(out, "reference", &[reference])?;
        }
        self.line(out, "app", &apps)
    }

    fn app_record<W: Write>(&self, app: &AppRecord, out: &mut W) -> std::io::Result<()> {
        self.heading(out, &app.name)?;

        let mut utis: Vec<&str> = app.utis.iter().map(|u| u.uti.as_str()).collect();
        utis.sort_unstable();
        for uti in utis {
            writeln!(out, "{INDENT}{uti}")?;
        }
        Ok(())
    }

    /// Renders file lookups in the order given. JSON output is keyed by path.
    pub fn file_types<W: Write>(&self, files: &[FileType], out: &mut W) -> Result<(), UtiError> {
        if self.options.json_output {
            let by_path: BTreeMap<String, &FileType> = files
                .iter()
                .map(|file| (file.path.display().to_string(), file))
                .collect();
            return write_json(out, &by_path);
        }

        for file in files.iter().filter(|f| f.is_resolved()) {
            let uti = file.uti.as_deref().unwrap_or_default();
            writeln!(
                out,
                "{}: {}",
                file.path.display(),
                self.styles.heading.apply_to(uti)
            )?;
        }
        Ok(())
    }

    /// Renders type lookups keyed by the query that produced them.
    ///
    /// Text output lists each type once, even when several queries matched it.
    pub fn type_queries<W: Write>(
        &self,
        results: &BTreeMap<String, Vec<TypeInfo>>,
        out: &mut W,
    ) -> Result<(), UtiError> {
        if self.options.json_output {
            return write_json(out, results);
        }

        let mut seen = BTreeSet::new();
        let mut first = true;
        for info in results.values().flatten() {
            if !seen.insert(info.identifier.as_str()) {
                continue;
            }
            if !first {
                writeln!(out)?;
            }
            first = false;
            self.type_info(info, out)?;
        }
        Ok(())
    }

    fn type_info<W: Write>(&self, info: &TypeInfo, out: &mut W) -> std::io::Result<()> {
        self.heading(out, &info.identifier)?;

        if let Some(description) = info.description.as_deref() {
            self.line(out, "description", &[description])?;
        }
        for class in [TagClass::FilenameExtension, TagClass::MimeType] {
            let tags: Vec<&str> = info.tags(class).iter().map(String::as_str).collect();
            self.line(out, class.label(), &tags)?;
        }
        let parents: Vec<&str> = info.conforms_to.iter().map(String::as_str).collect();
        self.line(out, "parent", &parents)?;
        if let Some(reference) = info.reference_url.as_deref() {
            self.line(out, "reference", &[reference])?;
        }
        if info.dynamic {
            writeln!(out, "{INDENT}{}", self.styles.label.apply_to("dynamic"))?;
        }
        Ok(())
    }
}

//! Records reconstructed from the Launch Services dump.

use indexmap::IndexSet;
use serde::Serialize;

/// Identifier given to a record shell whose fields arrived before its
/// `type id` line.
pub const PLACEHOLDER_UTI: &str = "<unknown>";

/// One registered Uniform Type Identifier and everything claimed for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UtiRecord {
    pub uti: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub apps: Vec<AppRecord>,
    #[serde(skip_serializing_if = "IndexSet::is_empty")]
    pub extensions: IndexSet<String>,
    #[serde(skip_serializing_if = "IndexSet::is_empty")]
    pub mime_types: IndexSet<String>,
    /// Parent types, in the order they were seen. May hold duplicates after
    /// merging.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<String>,
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl UtiRecord {
    pub fn new(uti: impl Into<String>) -> Self {
        Self {
            uti: uti.into(),
            apps: Vec::new(),
            extensions: IndexSet::new(),
            mime_types: IndexSet::new(),
            parents: Vec::new(),
            reference: None,
        }
    }

    /// Appends an app unless one with the same name is already listed.
    ///
    /// Returns `true` if the app was added.
    pub fn add_app(&mut self, name: &str) -> bool {
        if self.has_app(name) {
            return false;
        }
        self.apps.push(AppRecord::new(name));
        true
    }

    pub fn has_app(&self, name: &str) -> bool {
        self.apps.iter().any(|app| app.name == name)
    }

    pub fn app_names(&self) -> impl Iterator<Item = &str> {
        self.apps.iter().map(|app| app.name.as_str())
    }

    /// Merges another record for the same UTI into this one.
    ///
    /// Apps, extensions and MIME types are unioned in first-seen order.
    /// Parents are concatenated as-is, so repeated merges repeat parents.
    /// A reference URL is only taken from `other` when this record has none.
    pub fn merge(&mut self, other: UtiRecord) {
        for app in other.apps {
            if !self.has_app(&app.name) {
                self.apps.push(app);
            }
        }
        self.extensions.extend(other.extensions);
        self.mime_types.extend(other.mime_types);
        self.parents.extend(other.parents);

        if self.reference.as_deref().is_none_or(str::is_empty) {
            if let Some(reference) = other.reference {
                self.reference = Some(reference);
            }
        }
    }

    /// Projects this record without its app list.
    pub fn short(&self) -> UtiRecordShort {
        UtiRecordShort {
            uti: self.uti.clone(),
            extensions: self.extensions.clone(),
            mime_types: self.mime_types.clone(),
            parents: self.parents.clone(),
            reference: self.reference.clone(),
        }
    }
}

/// An application claiming one or more UTIs.
///
/// Inside a [`UtiRecord`] the `utis` list stays empty; it is only filled in
/// for the app-oriented view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub utis: Vec<UtiRecordShort>,
}

impl AppRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            utis: Vec::new(),
        }
    }
}

/// A [`UtiRecord`] without its apps, used by the app-oriented view so apps and
/// UTIs never embed each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UtiRecordShort {
    pub uti: String,
    #[serde(skip_serializing_if = "IndexSet::is_empty")]
    pub extensions: IndexSet<String>,
    #[serde(skip_serializing_if = "IndexSet::is_empty")]
    pub mime_types: IndexSet<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<String>,
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

//! System type registry.
//!
//! Lookups from an extension, MIME type or identifier to type information. The
//! registry is an oracle: this crate never classifies content itself. The
//! parsed Launch Services aggregate is the registry implementation shipped here.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::registry::{Aggregator, UtiRecord};

const DYNAMIC_PREFIX: &str = "dyn.";

/// Classes of tags a type can be known by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TagClass {
    FilenameExtension,
    MimeType,
}

impl TagClass {
    pub fn label(&self) -> &'static str {
        match self {
            TagClass::FilenameExtension => "extension",
            TagClass::MimeType => "MIME type",
        }
    }
}

/// Everything the registry knows about one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeInfo {
    pub identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub declared: bool,
    pub dynamic: bool,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<TagClass, Vec<String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conforms_to: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_url: Option<String>,
}

impl TypeInfo {
    pub fn tags(&self, class: TagClass) -> &[String] {
        self.tags.get(&class).map(Vec::as_slice).unwrap_or_default()
    }
}

impl From<&UtiRecord> for TypeInfo {
    fn from(record: &UtiRecord) -> Self {
        let mut tags = BTreeMap::new();
        if !record.extensions.is_empty() {
            tags.insert(
                TagClass::FilenameExtension,
                record.extensions.iter().cloned().collect(),
            );
        }
        if !record.mime_types.is_empty() {
            tags.insert(TagClass::MimeType, record.mime_types.iter().cloned().collect());
        }

        let mut conforms_to: Vec<String> = Vec::new();
        for parent in &record.parents {
            if !conforms_to.contains(parent) {
                conforms_to.push(parent.clone());
            }
        }

        Self {
            identifier: record.uti.clone(),
            description: None,
            declared: true,
            dynamic: record.uti.starts_with(DYNAMIC_PREFIX),
            tags,
            conforms_to,
            reference_url: record.reference.clone().filter(|r| !r.is_empty()),
        }
    }
}

/// A source of registered type information.
pub trait TypeRegistry {
    /// Types claiming a dot-prefixed file extension.
    fn types_for_extension(&self, extension: &str) -> Vec<TypeInfo>;

    fn types_for_mime_type(&self, mime_type: &str) -> Vec<TypeInfo>;

    fn type_for_identifier(&self, identifier: &str) -> Option<TypeInfo>;
}

impl TypeRegistry for Aggregator {
    fn types_for_extension(&self, extension: &str) -> Vec<TypeInfo> {
        self.find_by_extension(extension)
            .into_iter()
            .map(TypeInfo::from)
            .collect()
    }

    fn types_for_mime_type(&self, mime_type: &str) -> Vec<TypeInfo> {
        self.find_by_mime_type(mime_type)
            .into_iter()
            .map(TypeInfo::from)
            .collect()
    }

    fn type_for_identifier(&self, identifier: &str) -> Option<TypeInfo> {
        self.get(identifier).map(TypeInfo::from)
    }
}

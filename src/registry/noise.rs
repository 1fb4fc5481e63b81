//! Hardware and noise filtering.
//!
//! CoreTypes registers a large number of identifiers for devices, accessories
//! and icons that never describe file content. They are recognised by a
//! substring denylist. The list is data, not logic: the default ships in
//! `data/hardware_denylist.toml` and configuration can extend it. Matching is
//! a heuristic and will miss hardware identifiers it has not been taught.

use serde::Deserialize;

use crate::error::UtiError;

const DEFAULT_DENYLIST: &str = include_str!("../../data/hardware_denylist.toml");

const APPLE_PREFIX: &str = "com.apple.";
const PUBLIC_PREFIX: &str = "public.";

/// Substring denylist used to recognise hardware UTIs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NoiseFilter {
    /// Identifiers that are always noise.
    #[serde(default)]
    pub exact: Vec<String>,
    /// Substrings checked after the `com.apple.` prefix.
    #[serde(default)]
    pub apple: Vec<String>,
    /// Substrings checked after the `public.` prefix.
    #[serde(default)]
    pub public: Vec<String>,
}

impl NoiseFilter {
    /// Parses a denylist from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, UtiError> {
        toml::from_str(contents).map_err(|e| UtiError::Denylist(e.to_string()))
    }

    /// Adds extra substrings on top of the current lists.
    pub fn extend(&mut self, apple: &[String], public: &[String]) {
        self.apple.extend(apple.iter().cloned());
        self.public.extend(public.iter().cloned());
    }

    /// Returns `true` if `uti` looks like a hardware or other non-content
    /// identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use uti::registry::NoiseFilter;
    ///
    /// let filter = NoiseFilter::default();
    /// assert!(filter.is_hardware_noise("com.apple.macbook-pro"));
    /// assert!(!filter.is_hardware_noise("public.plain-text"));
    /// ```
    pub fn is_hardware_noise(&self, uti: &str) -> bool {
        if self.exact.iter().any(|exact| exact == uti) {
            return true;
        }

        if let Some(rest) = uti.strip_prefix(APPLE_PREFIX) {
            return self.apple.iter().any(|needle| rest.contains(needle.as_str()));
        }

        if let Some(rest) = uti.strip_prefix(PUBLIC_PREFIX) {
            return self.public.iter().any(|needle| rest.contains(needle.as_str()));
        }

        false
    }
}

impl Default for NoiseFilter {
    fn default() -> Self {
        Self::from_toml(DEFAULT_DENYLIST).expect("Failed to parse bundled denylist")
    }
}

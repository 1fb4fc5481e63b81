//! Configuration management for uti.
//!
//! Configuration is optional. Settings are read from the path given with
//! `--config`, or from `~/.config/uti/config.toml` when that file exists.
//! The tool never writes a configuration file; anything missing falls back to
//! the built-in defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::UtiError;
use crate::registry::NoiseFilter;

/// Default location of the Launch Services registration tool.
pub const LSREGISTER_PATH: &str = "/System/Library/Frameworks/CoreServices.framework/Versions/A/Frameworks/LaunchServices.framework/Versions/A/Support/lsregister";

/// Main configuration structure for uti.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dump: DumpConfig,
    pub query: QueryConfig,
    pub noise: NoiseConfig,
    pub ui: UIConfig,
}

/// How the registry dump is produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DumpConfig {
    pub lsregister: String,
    pub args: Vec<String>,
}

/// File query settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Metadata tool used to read a file's content type
    pub mdls: String,
    /// Maximum number of metadata lookups running at once
    pub max_concurrent_lookups: usize,
}

/// Additions to the bundled hardware denylist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Substrings matched after `com.apple.`
    pub extra_apple: Vec<String>,
    /// Substrings matched after `public.`
    pub extra_public: Vec<String>,
}

/// User interface configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UIConfig {
    pub color: ColorConfig,
}

/// Color theme configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    /// Theme name: "default", "cyan", "magenta", "yellow", "green", "red", "blue", "white"
    pub theme: String,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            lsregister: LSREGISTER_PATH.to_string(),
            args: vec!["-dump".to_string()],
        }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            mdls: "/usr/bin/mdls".to_string(),
            max_concurrent_lookups: 8,
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
        }
    }
}

impl Config {
    /// Returns the default configuration file path.
    ///
    /// Typically `~/.config/uti/config.toml`.
    fn default_path() -> Option<PathBuf> {
        let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"))?;
        Some(PathBuf::from(home).join(".config").join("uti").join("config.toml"))
    }

    /// Loads configuration.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// used if present, otherwise the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML is malformed.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use uti::config::Config;
    ///
    /// # fn main() -> Result<(), uti::UtiError> {
    /// let config = Config::load(None)?;
    /// println!("Using theme: {}", config.ui.color.theme);
    /// # Ok(())
    /// # }
    /// ```
    pub fn load(path: Option<&Path>) -> Result<Self, UtiError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        tracing::debug!(path = %path.display(), "loading config");
        let contents = fs::read_to_string(&path).map_err(|e| UtiError::Config {
            path: path.clone(),
            message: e.to_string(),
        })?;
        Self::from_toml(&contents).map_err(|message| UtiError::Config { path, message })
    }

    fn from_toml(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| e.to_string())
    }

    /// Builds the hardware filter: the bundled denylist plus configured extras.
    pub fn noise_filter(&self) -> NoiseFilter {
        let mut filter = NoiseFilter::default();
        filter.extend(&self.noise.extra_apple, &self.noise.extra_public);
        filter
    }
}

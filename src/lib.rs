//! # uti - Uniform Type Identifier inspector
//!
//! uti reports the Uniform Type Identifier of files and the metadata the system
//! registers for UTIs, file extensions and MIME types. Its core is a parser for
//! the text printed by `lsregister -dump`, which it turns into a consistent
//! model of types, the apps that claim them, their tags and their parents.
//!
//! ## Command Line Usage
//!
//! ```bash
//! # UTI of some files
//! uti file report.pdf ~/Pictures --recursive
//!
//! # What is registered for an extension, a MIME type, or an identifier
//! uti ext md
//! uti mime text/html
//! uti info public.plain-text
//!
//! # The whole registry, as text or JSON, by type or by app
//! uti dump
//! uti dump --by-app --json
//!
//! # Work from a saved capture, on any platform
//! uti --from-file lsregister.txt dump
//! ```
//!
//! ## Library Usage
//!
//! ```rust
//! use uti::registry::{Aggregator, NoiseFilter, RECORD_DELIMITER};
//! use uti::types::TypeRegistry;
//!
//! let dump = format!(
//!     "type id: public.plain-text (0x1)\nbundle: TextEdit (0x2)\ntags: .txt, text/plain\n{RECORD_DELIMITER}\n"
//! );
//! let registry = Aggregator::from_dump(&dump, &NoiseFilter::default());
//!
//! let found = registry.types_for_extension(".txt");
//! assert_eq!(found[0].identifier, "public.plain-text");
//! ```
//!
//! ## Configuration
//!
//! An optional TOML file at `~/.config/uti/config.toml` (or `--config PATH`)
//! can override the `lsregister` and `mdls` locations, the lookup concurrency,
//! the color theme, and extend the hardware denylist. The tool never writes it.
//!
//! ## Module Organization
//!
//! - [`cli`]: Command-line argument parsing
//! - [`commands`]: Command handlers
//! - [`config`]: Configuration management
//! - [`dump`]: Capturing the registry dump
//! - [`error`]: Error types
//! - [`format`]: Text and JSON rendering
//! - [`lexer`]: Cursor-based text scanning
//! - [`process`]: External process invocation
//! - [`query`]: File and tag lookups
//! - [`registry`]: Dump parsing and aggregation
//! - [`tui`]: Terminal status output
//! - [`types`]: The type registry interface

pub mod cli;
pub mod commands;
pub mod config;
pub mod dump;
pub mod error;
pub mod format;
pub mod lexer;
pub mod process;
pub mod query;
pub mod registry;
pub mod tui;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::UtiError;
pub use format::OutputOptions;
pub use registry::{Aggregator, AppRecord, UtiRecord, UtiRecordShort};
pub use types::{TypeInfo, TypeRegistry};

//! Command-line interface definitions.
//!
//! This module defines the CLI structure using clap, including all commands
//! and their arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "uti")]
#[command(about = "Report Uniform Type Identifiers for files, extensions and apps")]
#[command(version)]
pub struct Args {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Parse a saved `lsregister -dump` capture instead of running lsregister
    #[arg(long, global = true, value_name = "DUMP")]
    pub from_file: Option<PathBuf>,

    /// Configuration file (defaults to ~/.config/uti/config.toml if present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Hide progress and informational status lines
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report the UTI of each file
    File {
        /// Files or directories to inspect
        #[arg(required = true)]
        paths: Vec<String>,

        /// Inspect every file below directories instead of the directory itself
        #[arg(short, long)]
        recursive: bool,
    },
    /// Report the types registered for file extensions
    Ext {
        /// Extensions, with or without the leading dot (e.g. txt or .txt)
        #[arg(required = true)]
        extensions: Vec<String>,
    },
    /// Report metadata for UTIs
    Info {
        /// Identifiers (e.g. public.plain-text)
        #[arg(required = true)]
        utis: Vec<String>,
    },
    /// Report the types registered for MIME types
    Mime {
        /// MIME types (e.g. text/plain)
        #[arg(required = true)]
        mime_types: Vec<String>,
    },
    /// List every type in the Launch Services registry
    Dump {
        /// Group by claiming app instead of by UTI
        #[arg(long)]
        by_app: bool,
    },
}

// src/main.rs
use clap::Parser;
use tracing_subscriber::EnvFilter;

use uti::cli::{Args, Commands};
use uti::commands::{App, QueryKind, handle_dump, handle_files, handle_types};
use uti::config::Config;
use uti::format::OutputOptions;

fn setup_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    setup_tracing(args.verbose);

    // Load configuration
    let config = Config::load(args.config.as_deref())?;

    let options = OutputOptions {
        json_output: args.json,
        by_app: matches!(args.command, Commands::Dump { by_app: true }),
    };
    let app = App::new(config, options, args.from_file, args.quiet);

    match args.command {
        Commands::File { paths, recursive } => handle_files(&app, &paths, recursive).await?,
        Commands::Ext { extensions } => {
            handle_types(&app, QueryKind::Extension, &extensions).await?
        }
        Commands::Info { utis } => handle_types(&app, QueryKind::Identifier, &utis).await?,
        Commands::Mime { mime_types } => {
            handle_types(&app, QueryKind::MimeType, &mime_types).await?
        }
        Commands::Dump { .. } => handle_dump(&app).await?,
    }

    Ok(())
}

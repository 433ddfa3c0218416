//! Measure tooling entry point
//!
//! Thin front end over the translation, validation, and export
//! libraries. Each subcommand reads its inputs from disk, runs one
//! library workflow, and reports through stdout and the exit code.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let result = match &cli.command {
        Commands::Translate(args) => commands::translate::run(args),
        Commands::Validate(args) => commands::validate::run(args),
        Commands::Export(args) => commands::export::run(args),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            tracing::error!(error = %err, "Command failed");
            eprintln!("Error: {err:#}");
            std::process::exit(1);
        }
    }
}

/// Console logging, with `RUST_LOG` taking precedence over `--log-level`.
fn init_logging(level: Option<&str>) {
    let fallback = level.unwrap_or("info");
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

//! CLI interface and argument parsing

use crate::commands;
use clap::{Parser, Subcommand};

/// Clinical quality measure tooling
#[derive(Parser, Debug)]
#[command(name = "mensura")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "MENSURA_LOG_LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate a measure definition into a FHIR R4 Measure resource
    Translate(commands::translate::TranslateArgs),

    /// Validate a measure bundle against a model's conformance packages
    Validate(commands::validate::ValidateArgs),

    /// Package the export archive for a measure
    Export(commands::export::ExportArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_translate() {
        let cli = Cli::parse_from(["mensura", "translate", "--measure", "measure.json"]);
        assert!(matches!(cli.command, Commands::Translate(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from([
            "mensura",
            "--log-level",
            "debug",
            "translate",
            "--measure",
            "measure.json",
        ]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate() {
        let cli = Cli::parse_from([
            "mensura",
            "validate",
            "--bundle",
            "bundle.json",
            "--model",
            "QI-Core v4.1.1",
        ]);
        let Commands::Validate(args) = cli.command else {
            panic!("expected validate command");
        };
        assert_eq!(args.model, "QI-Core v4.1.1");
    }

    #[test]
    fn test_cli_parse_export_with_narrative_file() {
        let cli = Cli::parse_from([
            "mensura",
            "export",
            "--measure",
            "measure.json",
            "--bundle",
            "bundle.json",
            "--output",
            "export.zip",
            "--narrative-file",
            "narrative.html",
        ]);
        assert!(matches!(cli.command, Commands::Export(_)));
    }

    #[test]
    fn test_cli_export_requires_a_narrative_source() {
        let result = Cli::try_parse_from([
            "mensura",
            "export",
            "--measure",
            "measure.json",
            "--bundle",
            "bundle.json",
            "--output",
            "export.zip",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_export_narrative_url_requires_token() {
        let result = Cli::try_parse_from([
            "mensura",
            "export",
            "--measure",
            "measure.json",
            "--bundle",
            "bundle.json",
            "--output",
            "export.zip",
            "--narrative-url",
            "https://example.org/human-readable",
        ]);
        assert!(result.is_err());
    }
}

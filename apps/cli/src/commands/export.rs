//! `export` command

use anyhow::Context;
use clap::{ArgGroup, Args};
use mensura_export::{ExportService, FileNarrativeRenderer, HttpNarrativeRenderer};
use mensura_fhir::Bundle;
use mensura_format::Format;
use mensura_measure::Measure;
use std::fs;
use std::path::PathBuf;

/// Arguments for the export command
#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("narrative")
        .required(true)
        .args(["narrative_file", "narrative_url"]),
))]
pub struct ExportArgs {
    /// Path to the measure definition JSON
    #[arg(long, value_name = "FILE")]
    pub measure: PathBuf,

    /// Path to the measure bundle JSON
    #[arg(long, value_name = "FILE")]
    pub bundle: PathBuf,

    /// Where to write the export archive
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Read the rendered narrative from a file instead of the service
    #[arg(long, value_name = "FILE")]
    pub narrative_file: Option<PathBuf>,

    /// Narrative rendering endpoint (the measure is PUT as the body)
    #[arg(long, value_name = "URL", requires = "token")]
    pub narrative_url: Option<String>,

    /// Authorization header value forwarded to the narrative service
    #[arg(long, value_name = "TOKEN", requires = "narrative_url")]
    pub token: Option<String>,
}

pub fn run(args: &ExportArgs) -> anyhow::Result<i32> {
    let measure: Measure = super::read_json(&args.measure, "measure definition")?;

    let document = fs::read_to_string(&args.bundle)
        .with_context(|| format!("Failed to read {}", args.bundle.display()))?;
    let bundle: Bundle = mensura_format::decode(Format::Json, &document, "Bundle")
        .with_context(|| format!("Failed to parse bundle in {}", args.bundle.display()))?;

    let file = fs::File::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;

    if let Some(path) = &args.narrative_file {
        let service = ExportService::new(FileNarrativeRenderer::new(path));
        service.create_export(&measure, &bundle, file, "")?;
    } else {
        let url = args.narrative_url.as_deref().unwrap_or_default();
        let token = args.token.as_deref().unwrap_or_default();
        let renderer = HttpNarrativeRenderer::new(url, "")?;
        let service = ExportService::new(renderer);
        service.create_export(&measure, &bundle, file, token)?;
    }

    tracing::info!(output = %args.output.display(), "Export archive written");
    println!("Wrote {}", args.output.display());
    Ok(0)
}

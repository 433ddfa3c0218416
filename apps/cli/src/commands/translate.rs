//! `translate` command

use anyhow::Context;
use clap::Args;
use mensura_measure::Measure;
use mensura_translator::MeasureTranslator;
use std::fs;
use std::path::PathBuf;

/// Arguments for the translate command
#[derive(Args, Debug)]
pub struct TranslateArgs {
    /// Path to the measure definition JSON
    #[arg(long, value_name = "FILE")]
    pub measure: PathBuf,

    /// Canonical base URL stamped into Measure and Library references
    #[arg(long, value_name = "URL", default_value = "https://mensura.health/fhir")]
    pub base_url: String,

    /// Write the FHIR Measure here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

pub fn run(args: &TranslateArgs) -> anyhow::Result<i32> {
    let measure: Measure = super::read_json(&args.measure, "measure definition")?;

    let translator = MeasureTranslator::new(args.base_url.as_str());
    let fhir_measure = translator.translate(&measure);
    let body = serde_json::to_string_pretty(&fhir_measure)?;

    match &args.output {
        Some(path) => fs::write(path, body)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{body}"),
    }
    Ok(0)
}

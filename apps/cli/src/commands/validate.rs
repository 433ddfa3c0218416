//! `validate` command

use anyhow::Context;
use clap::Args;
use mensura_validation::BundleValidationService;
use std::fs;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the bundle document
    #[arg(long, value_name = "FILE")]
    pub bundle: PathBuf,

    /// Measure model the bundle conforms to, e.g. "QI-Core v4.1.1"
    #[arg(long, value_name = "MODEL")]
    pub model: String,
}

pub fn run(args: &ValidateArgs) -> anyhow::Result<i32> {
    let document = fs::read_to_string(&args.bundle)
        .with_context(|| format!("Failed to read {}", args.bundle.display()))?;

    let context = mensura_context::context_for_tag(&args.model)?;
    let service = BundleValidationService::new(context.validator());
    let response = service.validate_document(&document);

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(if response.successful { 0 } else { 1 })
}

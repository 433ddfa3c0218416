//! Command implementations

pub mod export;
pub mod translate;
pub mod validate;

use anyhow::Context;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Read and deserialize a JSON document from disk.
fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&source)
        .with_context(|| format!("Failed to parse {what} in {}", path.display()))
}

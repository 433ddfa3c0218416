//! Error types for encoding contexts

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("No FHIR encoding context for model [{model}]")]
    UnsupportedModel { model: String },

    #[error("Model error: {0}")]
    Model(#[from] mensura_measure::Error),

    #[error("Malformed document: {0}")]
    Malformed(#[from] mensura_format::FormatError),
}

pub type Result<T> = std::result::Result<T, Error>;

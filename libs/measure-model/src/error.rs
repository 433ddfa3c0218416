//! Error types for the measure model

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid measure version: {0}")]
    InvalidVersion(String),

    #[error("Unknown model type: {0}")]
    UnknownModel(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

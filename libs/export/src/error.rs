//! Error types for export packaging

use thiserror::Error;

/// Export failure surfaced to callers.
///
/// The message only names the measure; the cause stays available through
/// `source()` for logging.
#[derive(Debug, Error)]
#[error("Unexpected error while generating exports for measureID: {measure_id}")]
pub struct ExportError {
    measure_id: String,
    #[source]
    kind: ExportErrorKind,
}

impl ExportError {
    pub fn new(measure_id: impl Into<String>, kind: ExportErrorKind) -> Self {
        Self {
            measure_id: measure_id.into(),
            kind,
        }
    }

    pub fn measure_id(&self) -> &str {
        &self.measure_id
    }

    pub fn kind(&self) -> &ExportErrorKind {
        &self.kind
    }
}

/// What went wrong while packaging.
#[derive(Debug, Error)]
pub enum ExportErrorKind {
    #[error("narrative rendering failed: {0}")]
    Narrative(#[from] crate::narrative::NarrativeError),

    #[error("failed to encode resource: {0}")]
    Encode(#[from] mensura_format::FormatError),

    #[error("failed to decode bundle resource: {0}")]
    Resource(#[from] serde_json::Error),

    #[error("invalid attachment data: {0}")]
    Attachment(#[from] base64::DecodeError),

    #[error("failed to write archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExportError>;

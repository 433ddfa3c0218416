//! Human readable narrative rendering
//!
//! The narrative is produced by the CQL translation service. The export
//! packager talks to it through [`NarrativeRenderer`] so tests and
//! offline tooling can substitute their own source.

use mensura_measure::Measure;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("narrative request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("narrative service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to read narrative: {0}")]
    Read(#[from] std::io::Error),
}

/// Source of the rendered narrative document for a measure.
pub trait NarrativeRenderer {
    fn render(&self, measure: &Measure, access_token: &str) -> Result<String, NarrativeError>;
}

/// Renderer backed by the translation service's human readable endpoint.
///
/// The measure is sent as the PUT body with the caller's access token
/// passed through as the Authorization header.
pub struct HttpNarrativeRenderer {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpNarrativeRenderer {
    pub fn new(base_url: &str, human_readable_path: &str) -> Result<Self, NarrativeError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            endpoint: format!("{base_url}{human_readable_path}"),
        })
    }
}

impl NarrativeRenderer for HttpNarrativeRenderer {
    fn render(&self, measure: &Measure, access_token: &str) -> Result<String, NarrativeError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            measure_id = %measure.id,
            "Requesting human readable narrative"
        );

        let response = self
            .client
            .put(&self.endpoint)
            .header("Authorization", access_token)
            .json(measure)
            .send()?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().unwrap_or_default();
            return Err(NarrativeError::Status { status, body });
        }

        Ok(response.text()?)
    }
}

/// Renderer backed by a pre-rendered narrative on disk, for offline runs.
pub struct FileNarrativeRenderer {
    path: PathBuf,
}

impl FileNarrativeRenderer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl NarrativeRenderer for FileNarrativeRenderer {
    fn render(&self, measure: &Measure, _access_token: &str) -> Result<String, NarrativeError> {
        tracing::debug!(
            path = %self.path.display(),
            measure_id = %measure.id,
            "Reading narrative from disk"
        );
        Ok(std::fs::read_to_string(&self.path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measure() -> Measure {
        Measure {
            id: "xyz-p13r-13ert".to_string(),
            ecqm_title: "ExportTest".to_string(),
            cql_library_name: "ExportTest".to_string(),
            model: "QI-Core v4.1.1".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_puts_measure_with_token() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("PUT", "/fhir/measures/human-readable")
            .match_header("authorization", "Bearer TOKEN")
            .match_header("content-type", "application/json")
            .with_status(200)
            .with_body("<html><body>narrative</body></html>")
            .create();

        let renderer =
            HttpNarrativeRenderer::new(&server.url(), "/fhir/measures/human-readable").unwrap();
        let narrative = renderer.render(&measure(), "Bearer TOKEN").unwrap();

        assert_eq!(narrative, "<html><body>narrative</body></html>");
        mock.assert();
    }

    #[test]
    fn test_render_fails_on_error_status() {
        let mut server = mockito::Server::new();
        server
            .mock("PUT", "/fhir/measures/human-readable")
            .with_status(500)
            .with_body("boom")
            .create();

        let renderer =
            HttpNarrativeRenderer::new(&server.url(), "/fhir/measures/human-readable").unwrap();
        let err = renderer.render(&measure(), "Bearer TOKEN").unwrap_err();

        match err {
            NarrativeError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_render_fails_on_unreachable_service() {
        let renderer =
            HttpNarrativeRenderer::new("http://127.0.0.1:1", "/human-readable").unwrap();
        let err = renderer.render(&measure(), "Bearer TOKEN").unwrap_err();
        assert!(matches!(err, NarrativeError::Transport(_)));
    }

    #[test]
    fn test_file_renderer_reads_narrative_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("narrative.html");
        std::fs::write(&path, "<div>offline narrative</div>").unwrap();

        let renderer = FileNarrativeRenderer::new(&path);
        let narrative = renderer.render(&measure(), "").unwrap();

        assert_eq!(narrative, "<div>offline narrative</div>");
    }

    #[test]
    fn test_file_renderer_fails_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = FileNarrativeRenderer::new(dir.path().join("missing.html"));

        let err = renderer.render(&measure(), "").unwrap_err();
        assert!(matches!(err, NarrativeError::Read(_)));
    }
}

//! Archive assembly
//!
//! Writes the export entries in their contractual order: the bundle in
//! JSON then XML, the CQL of each library, each library resource in both
//! formats, and the narrative last. The narrative is fetched before the
//! first byte is written so a rendering failure never leaves a partial
//! archive behind.

use crate::error::{ExportError, ExportErrorKind, Result};
use crate::file_names::{export_file_name, narrative_file_name};
use crate::narrative::NarrativeRenderer;
use base64::prelude::*;
use mensura_fhir::{Bundle, Library};
use mensura_format::Format;
use mensura_measure::Measure;
use serde_json::Value;
use std::io::{Cursor, Seek, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const TEXT_CQL: &str = "text/cql";
const CQL_DIRECTORY: &str = "/cql/";
const RESOURCES_DIRECTORY: &str = "/resources/";

/// Packages measure export archives.
pub struct ExportService<R> {
    narrative: R,
}

impl<R: NarrativeRenderer> ExportService<R> {
    pub fn new(narrative: R) -> Self {
        Self { narrative }
    }

    /// Package every export artifact for a measure into `writer`.
    pub fn create_export<W: Write + Seek>(
        &self,
        measure: &Measure,
        bundle: &Bundle,
        writer: W,
        access_token: &str,
    ) -> Result<()> {
        let narrative = self
            .narrative
            .render(measure, access_token)
            .map_err(|err| export_error(measure, err.into()))?;

        write_archive(measure, bundle, writer, &narrative)
            .map_err(|kind| export_error(measure, kind))
    }

    /// Package exports in memory and return the archive bytes.
    ///
    /// On failure no bytes escape; the caller gets the export error only.
    pub fn export_bytes(
        &self,
        measure: &Measure,
        bundle: &Bundle,
        access_token: &str,
    ) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        self.create_export(measure, bundle, &mut cursor, access_token)?;
        Ok(cursor.into_inner())
    }
}

fn write_archive<W: Write + Seek>(
    measure: &Measure,
    bundle: &Bundle,
    writer: W,
    narrative: &str,
) -> std::result::Result<(), ExportErrorKind> {
    let base_name = export_file_name(measure);
    tracing::info!(file = %base_name, "Generating exports");

    let mut archive = ZipWriter::new(writer);

    add_entry(
        &mut archive,
        &format!("{base_name}.json"),
        mensura_format::encode(bundle, Format::Json)?.as_bytes(),
    )?;
    add_entry(
        &mut archive,
        &format!("{base_name}.xml"),
        mensura_format::encode(bundle, Format::Xml)?.as_bytes(),
    )?;

    let libraries = library_entries(bundle)?;
    for (library, _) in &libraries {
        let name = library.name.as_deref().unwrap_or_default();
        add_entry(
            &mut archive,
            &format!("{CQL_DIRECTORY}{name}.cql"),
            &cql_bytes(library)?,
        )?;
    }
    for (library, resource) in &libraries {
        let name = library.name.as_deref().unwrap_or_default();
        let path = format!("{RESOURCES_DIRECTORY}library-{name}");
        add_entry(
            &mut archive,
            &format!("{path}.json"),
            mensura_format::encode_value(resource, Format::Json)?.as_bytes(),
        )?;
        add_entry(
            &mut archive,
            &format!("{path}.xml"),
            mensura_format::encode_value(resource, Format::Xml)?.as_bytes(),
        )?;
    }

    add_entry(
        &mut archive,
        &narrative_file_name(measure),
        narrative.as_bytes(),
    )?;

    archive.finish()?;
    tracing::debug!(file = %base_name, entries = 3 + 3 * libraries.len(), "Export archive finished");
    Ok(())
}

/// Library entries paired with their raw resource values. The raw value
/// is what gets re-encoded so foreign elements survive the export.
fn library_entries(bundle: &Bundle) -> std::result::Result<Vec<(Library, &Value)>, ExportErrorKind> {
    bundle
        .resources_of_type("Library")
        .map(|value| {
            Library::from_value(value)
                .map(|library| (library, value))
                .map_err(ExportErrorKind::from)
        })
        .collect()
}

fn cql_bytes(library: &Library) -> std::result::Result<Vec<u8>, ExportErrorKind> {
    match library
        .attachment(TEXT_CQL)
        .and_then(|attachment| attachment.data.as_deref())
    {
        Some(data) => Ok(BASE64_STANDARD.decode(data)?),
        // A library without embedded CQL still gets its entry.
        None => Ok(Vec::new()),
    }
}

fn add_entry<W: Write + Seek>(
    archive: &mut ZipWriter<W>,
    path: &str,
    bytes: &[u8],
) -> std::result::Result<(), ExportErrorKind> {
    archive.start_file(path, SimpleFileOptions::default())?;
    archive.write_all(bytes)?;
    Ok(())
}

fn export_error(measure: &Measure, kind: ExportErrorKind) -> ExportError {
    tracing::error!(measure_id = %measure.id, error = %kind, "Export generation failed");
    ExportError::new(measure.id.clone(), kind)
}

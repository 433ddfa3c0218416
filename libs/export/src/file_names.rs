//! Export artifact naming

use mensura_measure::Measure;

/// Base name of the bundle entries in the export archive.
///
/// QI-Core model tags collapse to the `FHIR` suffix download consumers
/// key on; any other model tag is used as written.
pub fn export_file_name(measure: &Measure) -> String {
    let model = if measure.model.starts_with("QI-Core") {
        "FHIR"
    } else {
        measure.model.as_str()
    };
    format!("{}-v{}-{}", measure.ecqm_title, measure.version, model)
}

/// Name of the human readable narrative entry.
pub fn narrative_file_name(measure: &Measure) -> String {
    format!("{}-{}-FHIR.html", measure.ecqm_title, measure.version)
}

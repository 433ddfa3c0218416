//! Authored measure to FHIR R4 Measure translation
//!
//! Produces the CQF-measures conformant `Measure` resource for an
//! authored quality measure: population criteria groups with their
//! scoring and basis extensions, stratifiers, measure observations,
//! supplemental data, and the publishing metadata downstream tooling
//! expects. Translation is total; optional content the author left out
//! becomes absent FHIR elements.

pub mod translator;

pub use translator::{MeasureTranslator, UNKNOWN};

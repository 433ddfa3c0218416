//! FHIR R4 resource models
//!
//! Typed structures for the resources this workspace assembles and
//! consumes: Measure, Library, and Bundle, plus the data types they are
//! built from. The models are deliberately partial. They cover the
//! elements measure translation and export packaging read or write, and
//! keep open content as `serde_json::Value` so foreign elements survive a
//! round trip.

pub mod bundle;
pub mod datatypes;
pub mod library;
pub mod measure;
pub mod uris;

pub use bundle::{Bundle, BundleEntry, BundleType};
pub use datatypes::{
    Attachment, CodeableConcept, Coding, ContactDetail, ContactPoint, Expression, Extension,
    ExtensionValue, Meta, Period,
};
pub use library::Library;
pub use measure::{
    Measure, MeasureGroup, MeasureGroupPopulation, MeasureGroupStratifier,
    MeasureSupplementalData,
};

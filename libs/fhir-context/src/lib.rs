//! Model-keyed FHIR encoding contexts
//!
//! Measure content is authored against a model family such as QI-Core
//! v4.1.1. An [`EncodingContext`] binds that family to its wire formats
//! and conformance packages so translation, validation, and export all
//! agree on how artifacts are encoded. Model families without a FHIR
//! representation are rejected up front.

pub mod context;
pub mod error;

pub use context::{context_for, context_for_tag, parse_bundle_for, validator_for, EncodingContext};
pub use error::{Error, Result};

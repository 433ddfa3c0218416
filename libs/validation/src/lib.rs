//! Bundle validation
//!
//! Validates assembled measure bundles in three layers: cheap business
//! rules first (profile declarations, resource id uniqueness), then a
//! structural standards pass configured per model family. Checks
//! accumulate issues and never fail fast; an empty issue list is success.
//! The document-level workflow wraps everything into a transport-shaped
//! [`ValidationResponse`].

pub mod checks;
pub mod issue;
pub mod service;
pub mod standards;

pub use checks::{check_id_uniqueness, check_profile_declarations};
pub use issue::{IssueCode, IssueSeverity, ValidationIssue, ValidationOutcome};
pub use service::{BundleValidationService, ValidationResponse};
pub use standards::{ConformancePackage, StandardsValidator};

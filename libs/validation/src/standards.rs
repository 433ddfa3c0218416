//! Structural standards validation
//!
//! The deterministic subset of standards conformance this service decides
//! locally: document shape, resource identity, metadata and extension
//! structure, and bundle entry payloads. Terminology and full profile
//! evaluation stay with the conformance tooling the package set names.

use crate::issue::{IssueCode, ValidationIssue, ValidationOutcome};
use serde_json::{Map, Value};
use std::fmt;

/// A conformance package the validator is configured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConformancePackage {
    pub id: &'static str,
    pub version: &'static str,
}

impl ConformancePackage {
    pub const fn new(id: &'static str, version: &'static str) -> Self {
        Self { id, version }
    }
}

impl fmt::Display for ConformancePackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.id, self.version)
    }
}

/// Standards validator bound to a model family's conformance packages.
pub struct StandardsValidator {
    packages: Vec<ConformancePackage>,
}

impl StandardsValidator {
    pub fn new(packages: Vec<ConformancePackage>) -> Self {
        Self { packages }
    }

    pub fn packages(&self) -> &[ConformancePackage] {
        &self.packages
    }

    /// Validate a document, accumulating one issue per violation.
    pub fn validate(&self, document: &Value) -> ValidationOutcome {
        let packages = self
            .packages
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        tracing::debug!(packages = %packages, "Running standards validation");

        let mut issues = Vec::new();
        let resource_type = document
            .get("resourceType")
            .and_then(Value::as_str)
            .map(str::to_string);

        // Issue locations are rooted at the resource type name.
        let root_path = resource_type.as_deref().unwrap_or("Resource");
        match document.as_object() {
            Some(obj) => self.check_resource(obj, root_path, &mut issues),
            None => issues.push(ValidationIssue::error(
                IssueCode::Invalid,
                "Document root must be a resource object".to_string(),
            )),
        }

        tracing::debug!(
            issues = issues.len(),
            "Standards validation finished"
        );
        ValidationOutcome::from_issues(resource_type, issues)
    }

    fn check_resource(&self, resource: &Map<String, Value>, path: &str, issues: &mut Vec<ValidationIssue>) {
        match resource.get("resourceType") {
            Some(Value::String(name)) if name.starts_with(|c: char| c.is_ascii_uppercase()) => {}
            Some(Value::String(name)) => issues.push(
                ValidationIssue::error(
                    IssueCode::Structure,
                    format!("Unrecognized resource type [{name}]"),
                )
                .with_location(path.to_string()),
            ),
            _ => issues.push(
                ValidationIssue::error(
                    IssueCode::Required,
                    "Resource is missing its resourceType".to_string(),
                )
                .with_location(path.to_string()),
            ),
        }

        if let Some(id) = resource.get("id") {
            if !id.is_string() {
                issues.push(
                    ValidationIssue::error(
                        IssueCode::Value,
                        "Resource id must be a string".to_string(),
                    )
                    .with_location(format!("{path}.id")),
                );
            }
        }

        if let Some(meta) = resource.get("meta") {
            self.check_meta(meta, path, issues);
        }

        if let Some(extensions) = resource.get("extension") {
            self.check_extensions(extensions, path, issues);
        }

        if let Some(entries) = resource.get("entry").and_then(Value::as_array) {
            for (idx, entry) in entries.iter().enumerate() {
                self.check_entry(entry, &format!("{path}.entry[{idx}]"), issues);
            }
        }
    }

    fn check_meta(&self, meta: &Value, path: &str, issues: &mut Vec<ValidationIssue>) {
        let Some(meta) = meta.as_object() else {
            issues.push(
                ValidationIssue::error(
                    IssueCode::Structure,
                    "meta must be an object".to_string(),
                )
                .with_location(format!("{path}.meta")),
            );
            return;
        };

        if let Some(profile) = meta.get("profile") {
            let all_strings = profile
                .as_array()
                .is_some_and(|p| p.iter().all(Value::is_string));
            if !all_strings {
                issues.push(
                    ValidationIssue::error(
                        IssueCode::Structure,
                        "meta.profile must be an array of canonical URLs".to_string(),
                    )
                    .with_location(format!("{path}.meta.profile")),
                );
            }
        }
    }

    fn check_extensions(&self, extensions: &Value, path: &str, issues: &mut Vec<ValidationIssue>) {
        let Some(extensions) = extensions.as_array() else {
            issues.push(
                ValidationIssue::error(
                    IssueCode::Structure,
                    "extension must be an array".to_string(),
                )
                .with_location(format!("{path}.extension")),
            );
            return;
        };

        for (idx, extension) in extensions.iter().enumerate() {
            let has_url = extension
                .get("url")
                .and_then(Value::as_str)
                .is_some_and(|url| !url.is_empty());
            if !has_url {
                issues.push(
                    ValidationIssue::error(
                        IssueCode::Required,
                        "Extension is missing its url".to_string(),
                    )
                    .with_location(format!("{path}.extension[{idx}]")),
                );
            }
        }
    }

    fn check_entry(&self, entry: &Value, path: &str, issues: &mut Vec<ValidationIssue>) {
        let Some(entry) = entry.as_object() else {
            issues.push(
                ValidationIssue::error(
                    IssueCode::Structure,
                    "Bundle entry must be an object".to_string(),
                )
                .with_location(path.to_string()),
            );
            return;
        };

        match entry.get("resource") {
            Some(Value::Object(resource)) => {
                self.check_resource(resource, &format!("{path}.resource"), issues)
            }
            Some(_) => issues.push(
                ValidationIssue::error(
                    IssueCode::Structure,
                    "Bundle entry resource must be an object".to_string(),
                )
                .with_location(format!("{path}.resource")),
            ),
            None => {}
        }
    }
}

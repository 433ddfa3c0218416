//! Bundle validation workflow
//!
//! Runs a submitted document through parsing, the root resource gate,
//! profile declaration and id uniqueness checks, and finally standards
//! validation. Early gates reject with a 400 response; only documents
//! that reach standards validation get a 200, with `successful`
//! reflecting the outcome.

use crate::checks::{check_id_uniqueness, check_profile_declarations};
use crate::issue::{issues_to_operation_outcome, IssueCode, ValidationIssue, ValidationOutcome};
use crate::standards::StandardsValidator;
use mensura_fhir::Bundle;
use mensura_format::{parse_lenient, Format};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const PARSE_ERROR_MESSAGE: &str = "An error occurred while parsing the resource";
pub const NOT_A_BUNDLE_MESSAGE: &str = "Resource must have resourceType of 'Bundle'";
pub const MISSING_PROFILES_MESSAGE: &str =
    "Some resources in the bundle are missing required profile declarations.";
pub const DUPLICATE_IDS_MESSAGE: &str =
    "Some resources in the bundle have duplicate resource IDs.";

/// Outcome of a validation request, shaped for API consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResponse {
    pub code: u16,
    pub successful: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub outcome_response: Value,
}

impl ValidationResponse {
    /// A 400 rejection raised by one of the early gates.
    pub fn rejected(message: &str, issues: &[ValidationIssue]) -> Self {
        Self {
            code: 400,
            successful: false,
            message: Some(message.to_string()),
            outcome_response: issues_to_operation_outcome(issues),
        }
    }

    /// A 200 response carrying the standards validation outcome.
    pub fn evaluated(outcome: &ValidationOutcome) -> Self {
        Self {
            code: 200,
            successful: outcome.valid,
            message: None,
            outcome_response: outcome.to_operation_outcome(),
        }
    }
}

/// Validates measure bundles before they are packaged or published.
pub struct BundleValidationService {
    standards: StandardsValidator,
}

impl BundleValidationService {
    pub fn new(standards: StandardsValidator) -> Self {
        Self { standards }
    }

    /// Validate a JSON document submitted as a measure bundle.
    pub fn validate_document(&self, document: &str) -> ValidationResponse {
        let value = match parse_lenient(Format::Json, document) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(error = %err, "Document failed to parse");
                let issue =
                    ValidationIssue::error(IssueCode::Invalid, format!("Parse failure: {err}"));
                return ValidationResponse::rejected(PARSE_ERROR_MESSAGE, &[issue]);
            }
        };

        // The root gate tolerates casing; the standards pass still flags
        // a miscased resourceType.
        let resource_type = value.get("resourceType").and_then(Value::as_str);
        let is_bundle = resource_type.is_some_and(|name| name.eq_ignore_ascii_case("Bundle"));
        if !is_bundle {
            tracing::debug!(
                resource_type = resource_type.unwrap_or("<none>"),
                "Document is not a bundle"
            );
            let issue = ValidationIssue::error(
                IssueCode::Structure,
                format!(
                    "Expected a Bundle resource but found [{}]",
                    resource_type.unwrap_or("none")
                ),
            );
            return ValidationResponse::rejected(NOT_A_BUNDLE_MESSAGE, &[issue]);
        }

        let bundle = match Bundle::from_value(&value) {
            Ok(bundle) => bundle,
            Err(err) => {
                tracing::debug!(error = %err, "Bundle failed to decode");
                let issue =
                    ValidationIssue::error(IssueCode::Invalid, format!("Parse failure: {err}"));
                return ValidationResponse::rejected(PARSE_ERROR_MESSAGE, &[issue]);
            }
        };

        let profile_issues = check_profile_declarations(&bundle);
        if !profile_issues.is_empty() {
            return ValidationResponse::rejected(MISSING_PROFILES_MESSAGE, &profile_issues);
        }

        let duplicate_issues = check_id_uniqueness(&bundle);
        if !duplicate_issues.is_empty() {
            return ValidationResponse::rejected(DUPLICATE_IDS_MESSAGE, &duplicate_issues);
        }

        let outcome = self.standards.validate(&value);
        tracing::info!(
            valid = outcome.valid,
            errors = outcome.error_count(),
            warnings = outcome.warning_count(),
            "Bundle validation finished"
        );
        ValidationResponse::evaluated(&outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standards::ConformancePackage;
    use serde_json::json;

    fn service() -> BundleValidationService {
        BundleValidationService::new(StandardsValidator::new(vec![ConformancePackage::new(
            "hl7.fhir.r4.core",
            "4.0.1",
        )]))
    }

    fn entry(resource: Value) -> Value {
        json!({ "resource": resource })
    }

    #[test]
    fn test_unparseable_document_is_rejected() {
        let response = service().validate_document("{ not json");

        assert_eq!(response.code, 400);
        assert!(!response.successful);
        assert_eq!(response.message.as_deref(), Some(PARSE_ERROR_MESSAGE));
        assert_eq!(
            response.outcome_response["resourceType"],
            "OperationOutcome"
        );
    }

    #[test]
    fn test_non_bundle_root_is_rejected() {
        let response = service().validate_document(r#"{"resourceType": "Measure", "id": "m1"}"#);

        assert_eq!(response.code, 400);
        assert_eq!(response.message.as_deref(), Some(NOT_A_BUNDLE_MESSAGE));
    }

    #[test]
    fn test_root_type_compare_ignores_case() {
        let document = json!({
            "resourceType": "bundle",
            "type": "transaction",
            "entry": [entry(json!({
                "resourceType": "Measure",
                "id": "m1",
                "meta": { "profile": ["http://example.org/measure"] }
            }))]
        });
        let response = service().validate_document(&document.to_string());

        // Passes the gate; the standards pass reports the miscased type.
        assert_eq!(response.code, 200);
        assert!(!response.successful);
        assert!(response.message.is_none());
    }

    #[test]
    fn test_missing_profiles_are_rejected() {
        let document = json!({
            "resourceType": "Bundle",
            "type": "transaction",
            "entry": [entry(json!({ "resourceType": "Measure", "id": "m1" }))]
        });
        let response = service().validate_document(&document.to_string());

        assert_eq!(response.code, 400);
        assert_eq!(response.message.as_deref(), Some(MISSING_PROFILES_MESSAGE));
        let issues = response.outcome_response["issue"].as_array().unwrap();
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let measure = json!({
            "resourceType": "Measure",
            "id": "m1",
            "meta": { "profile": ["http://example.org/profile"] }
        });
        let document = json!({
            "resourceType": "Bundle",
            "type": "transaction",
            "entry": [entry(measure.clone()), entry(measure)]
        });
        let response = service().validate_document(&document.to_string());

        assert_eq!(response.code, 400);
        assert_eq!(response.message.as_deref(), Some(DUPLICATE_IDS_MESSAGE));
    }

    #[test]
    fn test_clean_bundle_passes() {
        let document = json!({
            "resourceType": "Bundle",
            "type": "transaction",
            "entry": [
                entry(json!({
                    "resourceType": "Measure",
                    "id": "m1",
                    "meta": { "profile": ["http://example.org/measure"] }
                })),
                entry(json!({
                    "resourceType": "Library",
                    "id": "l1",
                    "meta": { "profile": ["http://example.org/library"] }
                }))
            ]
        });
        let response = service().validate_document(&document.to_string());

        assert_eq!(response.code, 200);
        assert!(response.successful);
        assert!(response.message.is_none());
        assert_eq!(
            response.outcome_response["resourceType"],
            "OperationOutcome"
        );
    }

    #[test]
    fn test_standards_failures_still_return_200() {
        let document = json!({
            "resourceType": "Bundle",
            "type": "transaction",
            "entry": [entry(json!({
                "resourceType": "Measure",
                "id": "m1",
                "meta": { "profile": ["http://example.org/measure"] },
                "extension": [{ "valueCode": "boolean" }]
            }))]
        });
        let response = service().validate_document(&document.to_string());

        assert_eq!(response.code, 200);
        assert!(!response.successful);
        assert!(response.message.is_none());
    }

    #[test]
    fn test_response_serializes_camel_case() {
        let response = ValidationResponse::rejected(PARSE_ERROR_MESSAGE, &[]);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["code"], 400);
        assert_eq!(value["successful"], false);
        assert!(value.get("outcomeResponse").is_some());
    }
}

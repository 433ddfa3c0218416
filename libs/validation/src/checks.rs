//! Business-rule checks over assembled bundles
//!
//! Both checks scan every entry and accumulate issues; they never stop at
//! the first finding. An empty result means the bundle passed the check.

use crate::issue::{IssueCode, ValidationIssue};
use mensura_fhir::Bundle;
use serde_json::Value;
use std::collections::HashSet;

/// Flag every entry resource that does not declare conformance to at
/// least one profile in `meta.profile`.
pub fn check_profile_declarations(bundle: &Bundle) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for (idx, entry) in bundle.entries().iter().enumerate() {
        let Some(resource) = entry.resource.as_ref() else {
            continue;
        };
        let declared = resource
            .pointer("/meta/profile")
            .and_then(Value::as_array)
            .is_some_and(|profiles| !profiles.is_empty());
        if !declared {
            let resource_type = resource_type_of(resource);
            let id = resource.get("id").and_then(Value::as_str).unwrap_or("(none)");
            issues.push(
                ValidationIssue::error(
                    IssueCode::BusinessRule,
                    format!(
                        "Resource of type [{resource_type}] with id [{id}] must declare conformance to at least one profile"
                    ),
                )
                .with_location(format!("Bundle.entry[{idx}].resource")),
            );
        }
    }
    tracing::debug!(issues = issues.len(), "Checked bundle profile declarations");
    issues
}

/// Flag every `resourceType/id` pair that occurs more than once across
/// the bundle entries. The comparison is case-sensitive and each
/// duplicated pair is reported once, at its first reoccurrence.
pub fn check_id_uniqueness(bundle: &Bundle) -> Vec<ValidationIssue> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut reported: HashSet<String> = HashSet::new();
    let mut issues = Vec::new();

    for (idx, entry) in bundle.entries().iter().enumerate() {
        let Some(resource) = entry.resource.as_ref() else {
            continue;
        };
        let Some(id) = resource.get("id").and_then(Value::as_str) else {
            continue;
        };
        let key = format!("{}/{id}", resource_type_of(resource));
        if !seen.insert(key.clone()) && reported.insert(key.clone()) {
            issues.push(
                ValidationIssue::error(
                    IssueCode::Duplicate,
                    format!("Bundle contains duplicate resources with identifier [{key}]"),
                )
                .with_location(format!("Bundle.entry[{idx}].resource")),
            );
        }
    }
    tracing::debug!(issues = issues.len(), "Checked bundle resource id uniqueness");
    issues
}

fn resource_type_of(resource: &Value) -> &str {
    resource
        .get("resourceType")
        .and_then(Value::as_str)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bundle_with_resources(resources: Vec<Value>) -> Bundle {
        let entries: Vec<Value> = resources
            .into_iter()
            .map(|resource| json!({ "resource": resource }))
            .collect();
        Bundle::from_value(&json!({
            "resourceType": "Bundle",
            "type": "transaction",
            "entry": entries
        }))
        .unwrap()
    }

    #[test]
    fn test_profile_declarations_pass() {
        let bundle = bundle_with_resources(vec![json!({
            "resourceType": "Measure",
            "id": "m1",
            "meta": { "profile": ["http://example.org/profile"] }
        })]);
        assert!(check_profile_declarations(&bundle).is_empty());
    }

    #[test]
    fn test_missing_and_empty_profiles_are_flagged() {
        let bundle = bundle_with_resources(vec![
            json!({ "resourceType": "Measure", "id": "m1" }),
            json!({ "resourceType": "Library", "id": "l1", "meta": { "profile": [] } }),
            json!({
                "resourceType": "Library",
                "id": "l2",
                "meta": { "profile": ["http://example.org/profile"] }
            }),
        ]);

        let issues = check_profile_declarations(&bundle);
        assert_eq!(issues.len(), 2);
        assert!(issues[0].diagnostics.contains("[Measure]"));
        assert!(issues[0].diagnostics.contains("[m1]"));
        assert_eq!(issues[1].location.as_deref(), Some("Bundle.entry[1].resource"));
    }

    #[test]
    fn test_unique_ids_pass() {
        let bundle = bundle_with_resources(vec![
            json!({ "resourceType": "Measure", "id": "shared" }),
            json!({ "resourceType": "Library", "id": "shared" }),
        ]);
        // Same id under different resource types is allowed.
        assert!(check_id_uniqueness(&bundle).is_empty());
    }

    #[test]
    fn test_duplicate_ids_reported_once_per_key() {
        let bundle = bundle_with_resources(vec![
            json!({ "resourceType": "Library", "id": "dup" }),
            json!({ "resourceType": "Library", "id": "dup" }),
            json!({ "resourceType": "Library", "id": "dup" }),
            json!({ "resourceType": "Measure", "id": "m1" }),
        ]);

        let issues = check_id_uniqueness(&bundle);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].diagnostics.contains("[Library/dup]"));
    }

    #[test]
    fn test_id_comparison_is_case_sensitive() {
        let bundle = bundle_with_resources(vec![
            json!({ "resourceType": "Library", "id": "Dup" }),
            json!({ "resourceType": "Library", "id": "dup" }),
        ]);
        assert!(check_id_uniqueness(&bundle).is_empty());
    }

    #[test]
    fn test_resources_without_id_are_skipped() {
        let bundle = bundle_with_resources(vec![
            json!({ "resourceType": "Library" }),
            json!({ "resourceType": "Library" }),
        ]);
        assert!(check_id_uniqueness(&bundle).is_empty());
    }
}

//! Validation issues and outcomes

use serde_json::Value;
use std::fmt;

/// Validation result for a single resource
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    pub resource_type: Option<String>,
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationOutcome {
    /// Build an outcome from accumulated issues. The outcome is valid
    /// when no issue reaches error severity.
    pub fn from_issues(resource_type: Option<String>, issues: Vec<ValidationIssue>) -> Self {
        let valid = !issues
            .iter()
            .any(|i| matches!(i.severity, IssueSeverity::Error | IssueSeverity::Fatal));
        Self {
            resource_type,
            valid,
            issues,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.valid
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| matches!(i.severity, IssueSeverity::Error | IssueSeverity::Fatal))
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Warning)
            .count()
    }

    /// Render as a FHIR OperationOutcome document.
    pub fn to_operation_outcome(&self) -> Value {
        issues_to_operation_outcome(&self.issues)
    }
}

/// Render a list of issues as a FHIR OperationOutcome document.
pub fn issues_to_operation_outcome(issues: &[ValidationIssue]) -> Value {
    serde_json::json!({
        "resourceType": "OperationOutcome",
        "issue": issues.iter().map(|i| i.to_json()).collect::<Vec<_>>()
    })
}

/// Individual validation issue
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub severity: IssueSeverity,
    pub code: IssueCode,
    pub diagnostics: String,
    pub location: Option<String>,
}

impl ValidationIssue {
    pub fn error(code: IssueCode, diagnostics: String) -> Self {
        Self {
            severity: IssueSeverity::Error,
            code,
            diagnostics,
            location: None,
        }
    }

    pub fn warning(code: IssueCode, diagnostics: String) -> Self {
        Self {
            severity: IssueSeverity::Warning,
            code,
            diagnostics,
            location: None,
        }
    }

    pub fn information(code: IssueCode, diagnostics: String) -> Self {
        Self {
            severity: IssueSeverity::Information,
            code,
            diagnostics,
            location: None,
        }
    }

    pub fn with_location(mut self, location: String) -> Self {
        self.location = Some(location);
        self
    }

    fn to_json(&self) -> Value {
        let mut issue = serde_json::json!({
            "severity": self.severity.to_string(),
            "code": self.code.to_string(),
            "diagnostics": self.diagnostics,
        });

        if let Some(ref loc) = self.location {
            issue["location"] = serde_json::json!([loc]);
        }

        issue
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    Fatal,
    Error,
    Warning,
    Information,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Fatal => "fatal",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Information => "information",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueCode {
    Invalid,
    Structure,
    Required,
    Value,
    Duplicate,
    BusinessRule,
    Processing,
    NotSupported,
    Informational,
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Invalid => "invalid",
            Self::Structure => "structure",
            Self::Required => "required",
            Self::Value => "value",
            Self::Duplicate => "duplicate",
            Self::BusinessRule => "business-rule",
            Self::Processing => "processing",
            Self::NotSupported => "not-supported",
            Self::Informational => "informational",
        };
        write!(f, "{}", s)
    }
}

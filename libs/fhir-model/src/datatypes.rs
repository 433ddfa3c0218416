//! FHIR data types
//!
//! The general-purpose data types shared by the resource models in this
//! crate. Optional elements are skipped during serialization so encoded
//! resources only carry what was populated.

use serde::{Deserialize, Serialize};

/// A reference to a code defined by a terminology system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Coding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

/// A concept, possibly coded in one or more terminologies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CodeableConcept {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coding: Option<Vec<Coding>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl CodeableConcept {
    /// A concept carrying a single coding.
    pub fn from_coding(coding: Coding) -> Self {
        Self {
            coding: Some(vec![coding]),
            text: None,
        }
    }
}

/// A time period defined by start and end date strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

/// An expression evaluated in a specified language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Expression {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
}

impl Expression {
    pub fn new(language: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            language: Some(language.into()),
            expression: Some(expression.into()),
        }
    }
}

/// Additional content defined by an implementation guide.
///
/// The value choice is flattened so an extension serializes as
/// `{"url": ..., "valueString": ...}` the way the wire format expects.
/// Deserialization goes through a mirror struct because a flattened
/// enum cannot represent a bare extension with no value choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ExtensionRepr")]
pub struct Extension {
    pub url: String,

    #[serde(flatten)]
    pub value: Option<ExtensionValue>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExtensionRepr {
    url: String,
    value_string: Option<String>,
    value_code: Option<String>,
    value_codeable_concept: Option<CodeableConcept>,
}

impl From<ExtensionRepr> for Extension {
    fn from(repr: ExtensionRepr) -> Self {
        let value = if let Some(string) = repr.value_string {
            Some(ExtensionValue::String(string))
        } else if let Some(code) = repr.value_code {
            Some(ExtensionValue::Code(code))
        } else {
            repr.value_codeable_concept
                .map(ExtensionValue::CodeableConcept)
        };
        Self {
            url: repr.url,
            value,
        }
    }
}

/// The value choice of an extension, limited to the types measure
/// translation produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExtensionValue {
    #[serde(rename = "valueString")]
    String(String),

    #[serde(rename = "valueCode")]
    Code(String),

    #[serde(rename = "valueCodeableConcept")]
    CodeableConcept(CodeableConcept),
}

impl Extension {
    pub fn string(url: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            value: Some(ExtensionValue::String(value.into())),
        }
    }

    pub fn code(url: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            value: Some(ExtensionValue::Code(value.into())),
        }
    }

    pub fn codeable_concept(url: impl Into<String>, value: CodeableConcept) -> Self {
        Self {
            url: url.into(),
            value: Some(ExtensionValue::CodeableConcept(value)),
        }
    }
}

/// Contact information for a responsible party.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub telecom: Option<Vec<ContactPoint>>,
}

/// Technology-mediated contact details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ContactPoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Metadata about a resource: version, last change, declared profiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Vec<String>>,
}

/// Content in a format defined elsewhere, carried inline as base64 data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

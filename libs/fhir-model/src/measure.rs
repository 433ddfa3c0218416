//! FHIR Measure resource model
//!
//! Covers the elements measure translation populates. Field order follows
//! the R4 element order so encoded output reads like server output.

use crate::datatypes::{
    CodeableConcept, ContactDetail, Expression, Extension, Meta, Period,
};
use serde::{Deserialize, Serialize};

/// FHIR Measure resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measure {
    /// Resource type - always "Measure"
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    /// Canonical identifier for this measure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Computable name (matches the CQL library name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Human-readable title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub experimental: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Vec<ContactDetail>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,

    /// The period the measure content applies to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_period: Option<Period>,

    /// Canonical URLs of the logic libraries the criteria reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub disclaimer: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,

    /// Population criteria groups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<Vec<MeasureGroup>>,

    /// What other data should be reported with the measure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplemental_data: Option<Vec<MeasureSupplementalData>>,
}

fn default_resource_type() -> String {
    "Measure".to_string()
}

impl Default for Measure {
    fn default() -> Self {
        Self {
            resource_type: default_resource_type(),
            id: None,
            meta: None,
            url: None,
            version: None,
            name: None,
            title: None,
            experimental: None,
            publisher: None,
            contact: None,
            purpose: None,
            copyright: None,
            effective_period: None,
            library: None,
            disclaimer: None,
            rationale: None,
            group: None,
            supplemental_data: None,
        }
    }
}

/// A population criteria group of a Measure resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MeasureGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<Vec<MeasureGroupPopulation>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stratifier: Option<Vec<MeasureGroupStratifier>>,
}

/// A population criteria within a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MeasureGroupPopulation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub criteria: Option<Expression>,
}

/// A stratifier criteria within a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MeasureGroupStratifier {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub criteria: Option<Expression>,
}

/// What other data should be reported with the measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MeasureSupplementalData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub criteria: Option<Expression>,
}

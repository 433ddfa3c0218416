//! Measure root model

use crate::error::Result;
use crate::group::Group;
use crate::model_type::ModelType;
use crate::version::Version;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A clinical quality measure as produced by the authoring layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Measure {
    /// Identifier assigned by the authoring layer
    pub id: String,

    /// Human-readable measure title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measure_name: Option<String>,

    /// Computable name shared with the measure's CQL library
    pub cql_library_name: String,

    /// Short title used to name export artifacts
    pub ecqm_title: String,

    /// Authoring version, rendered with a three-digit revision
    pub version: Version,

    /// Model family tag, e.g. "QI-Core v4.1.1"
    pub model: String,

    /// Opaque revision identifier of this measure document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement_period_start: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement_period_end: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_at: Option<DateTime<Utc>>,

    /// Narrative metadata (steward, copyright, ...)
    #[serde(default)]
    pub measure_meta_data: MeasureMetaData,

    /// Population criteria groups
    #[serde(default)]
    pub groups: Vec<Group>,

    /// Supplemental data element definitions
    #[serde(default)]
    pub supplemental_data: Vec<DefDescPair>,

    /// Risk adjustment variable definitions
    #[serde(default)]
    pub risk_adjustments: Vec<DefDescPair>,
}

impl Measure {
    /// Parse the model tag into its closed enumeration.
    pub fn model_type(&self) -> Result<ModelType> {
        self.model.parse()
    }
}

/// Narrative metadata of a measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MeasureMetaData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steward: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub disclaimer: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

/// A CQL definition name paired with its description. Used for both
/// supplemental data elements and risk adjustment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefDescPair {
    pub definition: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

//! Population criteria groups
//!
//! A group bundles the population criteria, measure observations, and
//! stratifications that are scored together. Collections that the
//! authoring layer never touched stay absent (`None`) and are observable
//! as such downstream; an explicitly emptied list deserializes to an
//! empty vector instead.

use crate::population::PopulationType;
use serde::{Deserialize, Serialize};

/// A population criteria group of a measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Identifier assigned by the authoring layer
    pub id: String,

    /// Scoring method label ("Proportion", "Continuous Variable", ...)
    pub scoring: String,

    /// Unit the score is expressed in, when one was selected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scoring_unit: Option<ScoringUnit>,

    /// Type each population criteria evaluates to ("boolean" or a resource type)
    #[serde(default)]
    pub population_basis: String,

    /// Population criteria in authoring order
    #[serde(default)]
    pub populations: Vec<Population>,

    /// Observation definitions (continuous-variable and ratio measures)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measure_observations: Option<Vec<MeasureObservation>>,

    /// Stratification criteria, absent when none were authored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stratifications: Option<Vec<Stratification>>,
}

/// A single population criteria within a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Population {
    pub id: String,

    /// Role this criteria plays in the group
    pub name: PopulationType,

    /// Name of the CQL definition that evaluates this population
    #[serde(default)]
    pub definition: String,

    /// For initial populations of ratio measures: which side this
    /// population feeds (numerator or denominator)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub association_type: Option<PopulationType>,
}

/// An observation computed over a population (for example "Median ED time").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureObservation {
    pub id: String,

    /// Name of the CQL function that computes the observation
    #[serde(default)]
    pub definition: String,

    /// Aggregation applied across the population ("Median", "Sum", ...)
    #[serde(default)]
    pub aggregate_method: String,

    /// Id of the population this observation observes, when linked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub criteria_reference: Option<String>,
}

/// A stratification criteria within a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stratification {
    /// Identifier, when the authoring layer assigned one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Name of the CQL definition that evaluates the stratum
    #[serde(default)]
    pub cql_definition: String,

    /// Population this stratification applies to
    pub association: PopulationType,
}

/// Unit a group's score is expressed in.
///
/// The authoring layer sends either a bare label (possibly blank) or a
/// coded unit picked from a terminology, so the wire form is untagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScoringUnit {
    Coded(CodedScoringUnit),
    Label(String),
}

/// A scoring unit carrying a terminology coding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodedScoringUnit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    pub value: ScoringUnitCode,
}

/// The coding of a scoring unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringUnitCode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    pub code: String,
}

impl ScoringUnit {
    /// Whether this unit carries anything worth translating. A blank
    /// label counts as absent.
    pub fn is_present(&self) -> bool {
        match self {
            ScoringUnit::Label(label) => !label.trim().is_empty(),
            ScoringUnit::Coded(_) => true,
        }
    }
}

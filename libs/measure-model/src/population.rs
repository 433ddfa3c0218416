//! Population criteria types
//!
//! The closed set of population roles a criteria expression can play
//! within a group. Codes follow the FHIR measure-population vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a population criteria within a measure group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PopulationType {
    InitialPopulation,
    Numerator,
    NumeratorExclusion,
    Denominator,
    DenominatorExclusion,
    DenominatorException,
    MeasurePopulation,
    MeasurePopulationExclusion,
    MeasureObservation,
}

impl PopulationType {
    /// Terminology code for this population type.
    pub fn to_code(&self) -> &'static str {
        match self {
            PopulationType::InitialPopulation => "initial-population",
            PopulationType::Numerator => "numerator",
            PopulationType::NumeratorExclusion => "numerator-exclusion",
            PopulationType::Denominator => "denominator",
            PopulationType::DenominatorExclusion => "denominator-exclusion",
            PopulationType::DenominatorException => "denominator-exception",
            PopulationType::MeasurePopulation => "measure-population",
            PopulationType::MeasurePopulationExclusion => "measure-population-exclusion",
            PopulationType::MeasureObservation => "measure-observation",
        }
    }

    /// Human-readable display for this population type.
    pub fn display(&self) -> &'static str {
        match self {
            PopulationType::InitialPopulation => "Initial Population",
            PopulationType::Numerator => "Numerator",
            PopulationType::NumeratorExclusion => "Numerator Exclusion",
            PopulationType::Denominator => "Denominator",
            PopulationType::DenominatorExclusion => "Denominator Exclusion",
            PopulationType::DenominatorException => "Denominator Exception",
            PopulationType::MeasurePopulation => "Measure Population",
            PopulationType::MeasurePopulationExclusion => "Measure Population Exclusion",
            PopulationType::MeasureObservation => "Measure Observation",
        }
    }
}

impl fmt::Display for PopulationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_from_code() {
        let pop: PopulationType = serde_json::from_value(json!("initial-population")).unwrap();
        assert_eq!(pop, PopulationType::InitialPopulation);

        let pop: PopulationType =
            serde_json::from_value(json!("measure-population-exclusion")).unwrap();
        assert_eq!(pop, PopulationType::MeasurePopulationExclusion);
    }

    #[test]
    fn test_unknown_code_rejected() {
        let result = serde_json::from_value::<PopulationType>(json!("not-a-population"));
        assert!(result.is_err());
    }

    #[test]
    fn test_code_and_display() {
        assert_eq!(PopulationType::DenominatorException.to_code(), "denominator-exception");
        assert_eq!(PopulationType::DenominatorException.display(), "Denominator Exception");
        assert_eq!(PopulationType::Numerator.to_code(), "numerator");
        assert_eq!(PopulationType::Numerator.display(), "Numerator");
    }

    #[test]
    fn test_serialize_matches_code() {
        for pop in [
            PopulationType::InitialPopulation,
            PopulationType::MeasureObservation,
            PopulationType::DenominatorExclusion,
        ] {
            let value = serde_json::to_value(pop).unwrap();
            assert_eq!(value, json!(pop.to_code()));
        }
    }
}

//! Canonical URIs used across translated measure artifacts

/// Code system for population criteria roles.
pub const POPULATION_SYSTEM_URI: &str = "http://terminology.hl7.org/CodeSystem/measure-population";

/// Code system for measure scoring methods.
pub const SCORING_SYSTEM_URI: &str = "http://terminology.hl7.org/CodeSystem/measure-scoring";

/// Code system for supplemental data usage.
pub const MEASURE_DATA_USAGE_URI: &str =
    "http://terminology.hl7.org/CodeSystem/measure-data-usage";

/// Extension and profile URLs from the CQF measures implementation guide.
pub mod cqfm {
    pub const SCORING_URI: &str =
        "http://hl7.org/fhir/us/cqfmeasures/StructureDefinition/cqfm-scoring";

    pub const SCORING_UNIT_URI: &str =
        "http://hl7.org/fhir/us/cqfmeasures/StructureDefinition/cqfm-scoringUnit";

    pub const POPULATION_BASIS_URI: &str =
        "http://hl7.org/fhir/us/cqfmeasures/StructureDefinition/cqfm-populationBasis";

    pub const AGGREGATE_METHOD_URI: &str =
        "http://hl7.org/fhir/us/cqfmeasures/StructureDefinition/cqfm-aggregateMethod";

    pub const CRITERIA_REFERENCE_URI: &str =
        "http://hl7.org/fhir/us/cqfmeasures/StructureDefinition/cqfm-criteriaReference";

    pub const APPLIES_TO_URI: &str =
        "http://hl7.org/fhir/us/cqfmeasures/StructureDefinition/cqfm-appliesTo";

    pub const COMPUTABLE_MEASURE_PROFILE_URI: &str =
        "http://hl7.org/fhir/us/cqfmeasures/StructureDefinition/computable-measure-cqfm";

    pub const PUBLISHABLE_MEASURE_PROFILE_URI: &str =
        "http://hl7.org/fhir/us/cqfmeasures/StructureDefinition/publishable-measure-cqfm";

    pub const EXECUTABLE_MEASURE_PROFILE_URI: &str =
        "http://hl7.org/fhir/us/cqfmeasures/StructureDefinition/executable-measure-cqfm";
}

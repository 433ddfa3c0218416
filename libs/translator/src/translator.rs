//! Field-by-field construction of the FHIR measure

use chrono::SecondsFormat;
use mensura_fhir::uris::{cqfm, MEASURE_DATA_USAGE_URI, POPULATION_SYSTEM_URI, SCORING_SYSTEM_URI};
use mensura_fhir::{
    CodeableConcept, Coding, ContactDetail, ContactPoint, Expression, Extension, ExtensionValue,
    MeasureGroup, MeasureGroupPopulation, MeasureGroupStratifier, MeasureSupplementalData, Meta,
    Period,
};
use mensura_measure::{
    DefDescPair, Group, Measure, Population, PopulationType, ScoringUnit, Stratification,
};

/// Placeholder for publishing metadata the author left blank.
pub const UNKNOWN: &str = "UNKNOWN";

/// Criteria expressions name CQL definitions in this language.
const CQL_IDENTIFIER: &str = "text/cql.identifier";
/// Supplemental data criteria use the hyphenated language code.
const CQL_IDENTIFIER_HYPHENATED: &str = "text/cql-identifier";

/// Translates authored quality measures into FHIR R4 `Measure` resources.
pub struct MeasureTranslator {
    fhir_base_url: String,
}

impl MeasureTranslator {
    pub fn new(fhir_base_url: impl Into<String>) -> Self {
        Self {
            fhir_base_url: fhir_base_url.into(),
        }
    }

    /// Build the FHIR measure for an authored measure.
    pub fn translate(&self, measure: &Measure) -> mensura_fhir::Measure {
        tracing::debug!(
            measure_id = %measure.id,
            library = %measure.cql_library_name,
            "Translating measure to FHIR"
        );

        let meta_data = &measure.measure_meta_data;
        mensura_fhir::Measure {
            meta: Some(build_meta(measure)),
            url: Some(format!(
                "{}/Measure/{}",
                self.fhir_base_url, measure.cql_library_name
            )),
            version: Some(measure.version.to_string()),
            name: Some(measure.cql_library_name.clone()),
            title: measure.measure_name.clone(),
            experimental: Some(true),
            publisher: Some(or_unknown(meta_data.steward.as_deref())),
            contact: Some(build_contact_details()),
            purpose: Some(UNKNOWN.to_string()),
            copyright: Some(or_unknown(meta_data.copyright.as_deref())),
            effective_period: build_effective_period(measure),
            library: Some(vec![format!(
                "{}/Library/{}",
                self.fhir_base_url, measure.cql_library_name
            )]),
            disclaimer: Some(or_unknown(meta_data.disclaimer.as_deref())),
            rationale: meta_data.rationale.clone(),
            group: build_groups(&measure.groups),
            supplemental_data: build_supplemental_data(measure),
            ..Default::default()
        }
    }
}

fn or_unknown(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => UNKNOWN.to_string(),
    }
}

fn build_meta(measure: &Measure) -> Meta {
    Meta {
        version_id: measure.version_id.clone(),
        last_updated: measure
            .last_modified_at
            .map(|at| at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        profile: Some(vec![
            cqfm::COMPUTABLE_MEASURE_PROFILE_URI.to_string(),
            cqfm::PUBLISHABLE_MEASURE_PROFILE_URI.to_string(),
            cqfm::EXECUTABLE_MEASURE_PROFILE_URI.to_string(),
        ]),
    }
}

fn build_effective_period(measure: &Measure) -> Option<Period> {
    if measure.measurement_period_start.is_none() && measure.measurement_period_end.is_none() {
        return None;
    }
    // Measurement periods carry day precision.
    Some(Period {
        start: measure
            .measurement_period_start
            .map(|date| date.format("%Y-%m-%d").to_string()),
        end: measure
            .measurement_period_end
            .map(|date| date.format("%Y-%m-%d").to_string()),
    })
}

fn build_contact_details() -> Vec<ContactDetail> {
    vec![ContactDetail {
        name: None,
        telecom: Some(vec![ContactPoint {
            system: Some("url".to_string()),
            value: Some("https://cms.gov".to_string()),
        }]),
    }]
}

fn build_groups(groups: &[Group]) -> Option<Vec<MeasureGroup>> {
    if groups.is_empty() {
        return None;
    }
    Some(groups.iter().map(build_group).collect())
}

fn build_group(group: &Group) -> MeasureGroup {
    let mut populations = build_populations(group);
    populations.extend(build_observations(group));

    // Execution engines expect the boolean basis lowercased; every other
    // basis keeps the author's casing.
    let population_basis = if group.population_basis.eq_ignore_ascii_case("boolean") {
        "boolean".to_string()
    } else {
        group.population_basis.clone()
    };

    let mut extensions = vec![
        Extension {
            url: cqfm::SCORING_URI.to_string(),
            value: build_scoring_concept(&group.scoring).map(ExtensionValue::CodeableConcept),
        },
        Extension {
            url: cqfm::POPULATION_BASIS_URI.to_string(),
            value: (!population_basis.is_empty()).then_some(ExtensionValue::Code(population_basis)),
        },
    ];
    if let Some(unit) = group.scoring_unit.as_ref().filter(|unit| unit.is_present()) {
        extensions.push(Extension::codeable_concept(
            cqfm::SCORING_UNIT_URI,
            build_scoring_unit_concept(unit),
        ));
    }

    MeasureGroup {
        id: Some(group.id.clone()),
        extension: Some(extensions),
        population: Some(populations),
        stratifier: build_stratifiers(group.stratifications.as_deref()),
    }
}

fn build_populations(group: &Group) -> Vec<MeasureGroupPopulation> {
    group
        .populations
        .iter()
        .map(|population| MeasureGroupPopulation {
            id: Some(population.id.clone()),
            extension: build_criteria_reference(population, group),
            code: Some(population_concept(population.name)),
            criteria: Some(Expression::new(
                CQL_IDENTIFIER,
                population.definition.clone(),
            )),
        })
        .collect()
}

/// Back-reference from a numerator or denominator to the initial
/// population associated with it. When several initial populations carry
/// the same association the last one wins.
fn build_criteria_reference(population: &Population, group: &Group) -> Option<Vec<Extension>> {
    if !matches!(
        population.name,
        PopulationType::Numerator | PopulationType::Denominator
    ) {
        return None;
    }

    group
        .populations
        .iter()
        .filter(|pop| {
            pop.name == PopulationType::InitialPopulation
                && pop.association_type == Some(population.name)
        })
        .last()
        .map(|pop| vec![Extension::string(cqfm::CRITERIA_REFERENCE_URI, pop.id.clone())])
}

fn build_observations(group: &Group) -> Vec<MeasureGroupPopulation> {
    let Some(observations) = group.measure_observations.as_ref() else {
        return Vec::new();
    };

    observations
        .iter()
        .map(|observation| {
            let mut extensions = vec![Extension::string(
                cqfm::AGGREGATE_METHOD_URI,
                observation.aggregate_method.clone(),
            )];
            if let Some(reference) = observation
                .criteria_reference
                .as_deref()
                .filter(|reference| !reference.trim().is_empty())
            {
                extensions.push(Extension::string(cqfm::CRITERIA_REFERENCE_URI, reference));
            }

            MeasureGroupPopulation {
                id: Some(observation.id.clone()),
                extension: Some(extensions),
                code: Some(population_concept(PopulationType::MeasureObservation)),
                criteria: Some(Expression::new(
                    CQL_IDENTIFIER,
                    observation.definition.clone(),
                )),
            }
        })
        .collect()
}

fn build_stratifiers(
    stratifications: Option<&[Stratification]>,
) -> Option<Vec<MeasureGroupStratifier>> {
    let stratifications = stratifications.filter(|s| !s.is_empty())?;

    let stratifiers = stratifications
        .iter()
        .enumerate()
        .map(|(index, stratification)| {
            // An author-supplied id wins; otherwise the 1-based position.
            let id = match stratification.id.as_deref() {
                Some(id) if !id.trim().is_empty() => id.to_string(),
                _ => (index + 1).to_string(),
            };

            MeasureGroupStratifier {
                id: Some(id),
                extension: Some(vec![Extension::codeable_concept(
                    cqfm::APPLIES_TO_URI,
                    population_concept(stratification.association),
                )]),
                criteria: Some(Expression::new(
                    CQL_IDENTIFIER,
                    stratification.cql_definition.clone(),
                )),
            }
        })
        .collect();

    Some(stratifiers)
}

fn population_concept(population_type: PopulationType) -> CodeableConcept {
    CodeableConcept::from_coding(Coding {
        system: Some(POPULATION_SYSTEM_URI.to_string()),
        code: Some(population_type.to_code().to_string()),
        display: Some(population_type.display().to_string()),
    })
}

fn build_scoring_concept(scoring: &str) -> Option<CodeableConcept> {
    if scoring.is_empty() {
        return None;
    }
    let mut code = scoring.to_lowercase();
    if code == "continuous variable" {
        code = "continuous-variable".to_string();
    }
    Some(CodeableConcept::from_coding(Coding {
        system: Some(SCORING_SYSTEM_URI.to_string()),
        code: Some(code),
        display: Some(scoring.to_string()),
    }))
}

fn build_scoring_unit_concept(unit: &ScoringUnit) -> CodeableConcept {
    match unit {
        ScoringUnit::Label(label) => CodeableConcept::from_coding(Coding {
            system: None,
            code: Some(label.clone()),
            display: Some(label.clone()),
        }),
        ScoringUnit::Coded(coded) => CodeableConcept::from_coding(Coding {
            system: coded.value.system.clone(),
            code: Some(coded.value.code.clone()),
            display: coded.label.clone(),
        }),
    }
}

fn build_supplemental_data(measure: &Measure) -> Option<Vec<MeasureSupplementalData>> {
    let mut components: Vec<MeasureSupplementalData> = measure
        .supplemental_data
        .iter()
        .map(|pair| supplemental_component(pair, "supplemental-data"))
        .collect();
    components.extend(
        measure
            .risk_adjustments
            .iter()
            .map(|pair| supplemental_component(pair, "risk-adjustment-factor")),
    );

    if components.is_empty() {
        None
    } else {
        Some(components)
    }
}

fn supplemental_component(pair: &DefDescPair, usage_code: &str) -> MeasureSupplementalData {
    MeasureSupplementalData {
        id: Some(pair.definition.to_lowercase().replace(' ', "-")),
        usage: Some(vec![CodeableConcept::from_coding(Coding {
            system: Some(MEASURE_DATA_USAGE_URI.to_string()),
            code: Some(usage_code.to_string()),
            display: None,
        })]),
        description: pair.description.clone(),
        criteria: Some(Expression::new(
            CQL_IDENTIFIER_HYPHENATED,
            pair.definition.clone(),
        )),
    }
}

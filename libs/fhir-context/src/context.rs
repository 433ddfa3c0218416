//! Context lookup and the encoding operations it gates

use crate::error::{Error, Result};
use mensura_fhir::Bundle;
use mensura_format::Format;
use mensura_measure::ModelType;
use mensura_validation::{ConformancePackage, StandardsValidator};
use serde::Serialize;
use serde_json::Value;

const QI_CORE_411_PACKAGES: &[ConformancePackage] = &[
    ConformancePackage::new("hl7.fhir.r4.core", "4.0.1"),
    ConformancePackage::new("hl7.fhir.us.core", "3.1.1"),
    ConformancePackage::new("hl7.fhir.us.qicore", "4.1.1"),
];

const QI_CORE_600_PACKAGES: &[ConformancePackage] = &[
    ConformancePackage::new("hl7.fhir.r4.core", "4.0.1"),
    ConformancePackage::new("hl7.fhir.us.core", "6.1.0"),
    ConformancePackage::new("hl7.fhir.us.qicore", "6.0.0"),
];

/// Encoding context for one model family.
///
/// Construction goes through [`context_for`] so a context always refers
/// to a model this service can express in FHIR R4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingContext {
    model: ModelType,
    packages: &'static [ConformancePackage],
}

impl EncodingContext {
    pub fn model(&self) -> ModelType {
        self.model
    }

    /// Conformance packages artifacts of this model validate against.
    pub fn packages(&self) -> &'static [ConformancePackage] {
        self.packages
    }

    /// Encode a resource in the given format.
    pub fn encode<T: Serialize>(&self, resource: &T, format: Format) -> Result<String> {
        Ok(mensura_format::encode(resource, format)?)
    }

    /// Encode an untyped resource in the given format.
    pub fn encode_value(&self, resource: &Value, format: Format) -> Result<String> {
        Ok(mensura_format::encode_value(resource, format)?)
    }

    /// Strictly parse a bundle document.
    pub fn parse_bundle(&self, format: Format, input: &str) -> Result<Bundle> {
        Ok(mensura_format::decode(format, input, "Bundle")?)
    }

    /// Standards validator configured with this model's packages.
    pub fn validator(&self) -> StandardsValidator {
        StandardsValidator::new(self.packages.to_vec())
    }
}

/// Look up the encoding context for a model type.
pub fn context_for(model: ModelType) -> Result<EncodingContext> {
    let packages = match model {
        ModelType::QiCore411 => QI_CORE_411_PACKAGES,
        ModelType::QiCore600 => QI_CORE_600_PACKAGES,
        ModelType::Qdm56 => {
            return Err(Error::UnsupportedModel {
                model: model.tag().to_string(),
            })
        }
    };

    tracing::debug!(model = model.tag(), "Resolved FHIR encoding context");
    Ok(EncodingContext { model, packages })
}

/// Look up the encoding context for a model tag such as `QI-Core v4.1.1`.
pub fn context_for_tag(tag: &str) -> Result<EncodingContext> {
    context_for(tag.parse::<ModelType>()?)
}

/// Standards validator for a model type.
pub fn validator_for(model: ModelType) -> Result<StandardsValidator> {
    Ok(context_for(model)?.validator())
}

/// Strictly parse a bundle document for a model type.
pub fn parse_bundle_for(model: ModelType, format: Format, input: &str) -> Result<Bundle> {
    context_for(model)?.parse_bundle(format, input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mensura_fhir::BundleType;

    #[test]
    fn test_qi_core_contexts_resolve() {
        let ctx = context_for(ModelType::QiCore411).unwrap();
        assert_eq!(ctx.model(), ModelType::QiCore411);
        assert_eq!(ctx.packages().len(), 3);
        assert_eq!(ctx.packages()[2].to_string(), "hl7.fhir.us.qicore#4.1.1");

        let ctx = context_for(ModelType::QiCore600).unwrap();
        assert_eq!(ctx.packages()[1].to_string(), "hl7.fhir.us.core#6.1.0");
    }

    #[test]
    fn test_qdm_has_no_context() {
        let err = context_for(ModelType::Qdm56).unwrap_err();
        assert!(matches!(err, Error::UnsupportedModel { .. }));
        assert!(err.to_string().contains("QDM v5.6"));
    }

    #[test]
    fn test_context_for_tag() {
        let ctx = context_for_tag("QI-Core v6.0.0").unwrap();
        assert_eq!(ctx.model(), ModelType::QiCore600);

        let err = context_for_tag("QDM v99").unwrap_err();
        assert!(matches!(err, Error::Model(_)));
    }

    #[test]
    fn test_bundle_round_trips_through_context() {
        let ctx = context_for(ModelType::QiCore411).unwrap();
        let bundle = Bundle::new(BundleType::Transaction);

        for format in [Format::Json, Format::Xml] {
            let encoded = ctx.encode(&bundle, format).unwrap();
            let parsed = ctx.parse_bundle(format, &encoded).unwrap();
            assert_eq!(parsed.bundle_type, BundleType::Transaction);
        }
    }

    #[test]
    fn test_parse_bundle_rejects_other_resources() {
        let ctx = context_for(ModelType::QiCore411).unwrap();
        let err = ctx
            .parse_bundle(Format::Json, r#"{"resourceType": "Measure"}"#)
            .unwrap_err();
        assert!(matches!(err, Error::Malformed(_)));
    }

    #[test]
    fn test_validator_carries_model_packages() {
        let validator = validator_for(ModelType::QiCore411).unwrap();
        assert_eq!(validator.packages().len(), 3);
        assert_eq!(validator.packages()[0].id, "hl7.fhir.r4.core");
    }

    #[test]
    fn test_parse_bundle_for_model() {
        let bundle = parse_bundle_for(
            ModelType::QiCore411,
            Format::Json,
            r#"{"resourceType": "Bundle", "type": "collection"}"#,
        )
        .unwrap();
        assert_eq!(bundle.bundle_type, BundleType::Collection);

        let err = parse_bundle_for(ModelType::Qdm56, Format::Json, "{}").unwrap_err();
        assert!(matches!(err, Error::UnsupportedModel { .. }));
    }
}

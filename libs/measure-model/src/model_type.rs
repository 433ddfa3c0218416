//! Clinical information model families
//!
//! A measure declares the model family its CQL was authored against as a
//! free-text tag ("QI-Core v4.1.1"). Downstream components dispatch on the
//! parsed [`ModelType`] so that an unknown tag is rejected at the boundary
//! instead of leaking into resource assembly.

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Model family a measure is authored against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelType {
    /// QI-Core 4.1.1, built on FHIR R4 / US Core 4
    QiCore411,
    /// QI-Core 6.0.0, built on FHIR R4 / US Core 6
    QiCore600,
    /// QDM 5.6, the legacy quality data model (no FHIR resource form)
    Qdm56,
}

impl ModelType {
    pub const ALL: [ModelType; 3] = [ModelType::QiCore411, ModelType::QiCore600, ModelType::Qdm56];

    /// The tag string as it appears in authoring payloads.
    pub fn tag(&self) -> &'static str {
        match self {
            ModelType::QiCore411 => "QI-Core v4.1.1",
            ModelType::QiCore600 => "QI-Core v6.0.0",
            ModelType::Qdm56 => "QDM v5.6",
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ModelType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelType::ALL
            .into_iter()
            .find(|model| model.tag() == s)
            .ok_or_else(|| Error::UnknownModel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip() {
        for model in ModelType::ALL {
            let parsed: ModelType = model.tag().parse().unwrap();
            assert_eq!(parsed, model);
            assert_eq!(model.to_string(), model.tag());
        }
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let err = "QI-Core v5.0.0".parse::<ModelType>().unwrap_err();
        assert!(err.to_string().contains("QI-Core v5.0.0"));
        assert!("qdm v5.6".parse::<ModelType>().is_err());
    }
}

//! Measure version
//!
//! Versions travel as `{major, minor, revision}` objects in authoring
//! payloads and render as `major.minor.revision` with the revision padded
//! to three digits ("1.0.000"). The padded form is what downstream
//! artifacts (resource versions, export file names) carry.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Semantic version of a measure as assigned by the authoring layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub revision: u32,
}

impl Version {
    pub fn new(major: u32, minor: u32, revision: u32) -> Self {
        Self {
            major,
            minor,
            revision,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{:03}", self.major, self.minor, self.revision)
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('.');
        let mut next = || {
            parts
                .next()
                .and_then(|p| p.parse::<u32>().ok())
                .ok_or_else(|| Error::InvalidVersion(s.to_string()))
        };
        let version = Version::new(next()?, next()?, next()?);
        if parts.next().is_some() {
            return Err(Error::InvalidVersion(s.to_string()));
        }
        Ok(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_pads_revision() {
        assert_eq!(Version::new(1, 0, 0).to_string(), "1.0.000");
        assert_eq!(Version::new(2, 13, 7).to_string(), "2.13.007");
        assert_eq!(Version::new(0, 0, 123).to_string(), "0.0.123");
    }

    #[test]
    fn test_from_str_round_trip() {
        let version: Version = "1.0.000".parse().unwrap();
        assert_eq!(version, Version::new(1, 0, 0));
        assert_eq!(version.to_string(), "1.0.000");

        let version: Version = "3.2.1".parse().unwrap();
        assert_eq!(version, Version::new(3, 2, 1));
    }

    #[test]
    fn test_from_str_rejects_malformed() {
        assert!("1.0".parse::<Version>().is_err());
        assert!("1.0.0.0".parse::<Version>().is_err());
        assert!("1.x.0".parse::<Version>().is_err());
        assert!("".parse::<Version>().is_err());
    }

    #[test]
    fn test_deserialize_from_object() {
        let version: Version =
            serde_json::from_value(json!({"major": 1, "minor": 2, "revision": 3})).unwrap();
        assert_eq!(version, Version::new(1, 2, 3));
    }
}

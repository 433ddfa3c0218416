//! Clinical quality measure authoring model
//!
//! This crate provides the measure structures produced by the authoring
//! layer: a measure with metadata, population criteria groups, measure
//! observations, stratifications, and supplemental data definitions.
//! These are the inputs to translation and export; they carry CQL
//! definition names rather than evaluated criteria.
//!
//! # Example
//!
//! ```rust
//! use mensura_measure::{Measure, PopulationType};
//! use serde_json::json;
//!
//! let measure: Measure = serde_json::from_value(json!({
//!     "id": "measure-1",
//!     "measureName": "Example Measure",
//!     "cqlLibraryName": "ExampleMeasure",
//!     "ecqmTitle": "Example",
//!     "version": { "major": 1, "minor": 0, "revision": 0 },
//!     "model": "QI-Core v4.1.1",
//!     "groups": [{
//!         "id": "group-1",
//!         "scoring": "Proportion",
//!         "populationBasis": "boolean",
//!         "populations": [{
//!             "id": "pop-1",
//!             "name": "initial-population",
//!             "definition": "Initial Population"
//!         }]
//!     }]
//! })).unwrap();
//!
//! assert_eq!(measure.version.to_string(), "1.0.000");
//! assert_eq!(measure.groups[0].populations[0].name, PopulationType::InitialPopulation);
//! ```

pub mod error;
pub mod group;
pub mod measure;
pub mod model_type;
pub mod population;
pub mod version;

pub use error::{Error, Result};
pub use group::{
    CodedScoringUnit, Group, MeasureObservation, Population, ScoringUnit, ScoringUnitCode,
    Stratification,
};
pub use measure::{DefDescPair, Measure, MeasureMetaData};
pub use model_type::ModelType;
pub use population::PopulationType;
pub use version::Version;

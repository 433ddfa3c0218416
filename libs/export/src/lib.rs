//! Measure export packaging
//!
//! Assembles the downloadable ZIP archive for a measure: the measure
//! bundle in JSON and XML, the raw CQL of every library in the bundle,
//! each library resource in both formats, and the human readable
//! narrative fetched from the rendering service. Entry order inside the
//! archive is a contract; consumers enumerate entries positionally.

pub mod error;
pub mod file_names;
pub mod narrative;
pub mod packager;

pub use error::{ExportError, ExportErrorKind, Result};
pub use file_names::{export_file_name, narrative_file_name};
pub use narrative::{FileNarrativeRenderer, HttpNarrativeRenderer, NarrativeError, NarrativeRenderer};
pub use packager::ExportService;

//! mofx core - MOF configuration parsing and rule diffing
//!
//! This crate turns compiled DSC configuration documents (MOF) into a
//! catalog of STIG rules and compares two such catalogs:
//! - Tolerant line-oriented MOF parsing into instances
//! - Rule aggregation keyed by the `V-####` ids embedded in `ResourceID`
//! - Value normalization that suppresses PowerStig version noise
//! - Per-rule status, per-property rows and LCS-aligned raw line views
//!
//! Parsing and diffing never fail; only file and configuration edges return
//! errors.

pub mod aggregate;
pub mod config;
pub mod diff;
pub mod errors;
pub mod inspect;
pub mod loader;
pub mod logging_facility;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod present;

// Logging macros refer to schema constants through this path.
pub use mofx_core_types;

// Re-export commonly used types
pub use config::MofxConfig;
pub use errors::{ExError, ExErrorKind, MofxError, Result};
pub use loader::{load_document, load_pair};
pub use model::{Document, Instance, PropertyMap, Rule};
pub use normalize::{equivalent, normalize};

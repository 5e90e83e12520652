//! Rule diff engine.
//!
//! Compares the rule catalogs of two MOF documents and produces data for
//! review: an [`OverallStatus`] per rule, per-property [`DiffRow`]s for one
//! rule pair, and an LCS-aligned view of the rules' raw lines.
//!
//! ## Entry points
//!
//! ```
//! use mofx_core::diff::{compare_documents, OverallStatus};
//! use mofx_core::Document;
//!
//! let a = Document::parse("instance of X\n{\nResourceID = \"[Registry]V-1\";\n};");
//! let b = a.clone();
//! let results = compare_documents(&a, &b);
//! assert_eq!(results[0].status, OverallStatus::Match);
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: results are ordered by rule id; rows by key.
//! - **Version noise suppression**: values that only differ by an embedded
//!   PowerStig version are reported as `VersionOnly`, never `Different`.
//! - **Localized line changes**: one inserted or deleted raw line marks only
//!   that line as changed.

pub mod align;
pub mod engine;
pub mod model;
pub mod rows;
pub mod summary;

pub use align::{align_lines, align_rules, truncate_line, DEFAULT_MAX_LINE_LEN};
pub use engine::{compare_documents, group_by_category, overall_status, rule_detail};
pub use model::{AlignedLinePair, DiffRow, DiffStatus, OverallStatus, RuleComparison, RuleDetail};
pub use rows::{diff_rows, info_rows};

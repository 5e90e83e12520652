//! Diff output types.
//!
//! All types implement `Debug, Clone, Serialize, PartialEq`.

use crate::model::Instance;
use serde::Serialize;
use std::fmt;

/// Classification of one property across two rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum DiffStatus {
    /// Trimmed values are identical
    Same,
    /// Values differ only in an embedded version or cosmetic noise
    VersionOnly,
    /// Values differ
    Different,
    /// Present only in the second document
    MissingInDoc1,
    /// Present only in the first document
    MissingInDoc2,
    /// Informational row, not a property
    Info,
}

impl DiffStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DiffStatus::Same => "Same",
            DiffStatus::VersionOnly => "Version Only",
            DiffStatus::Different => "Different",
            DiffStatus::MissingInDoc1 => "Missing in File 1",
            DiffStatus::MissingInDoc2 => "Missing in File 2",
            DiffStatus::Info => "Info",
        }
    }
}

impl fmt::Display for DiffStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of comparing one rule id across two documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum OverallStatus {
    Match,
    VersionOnly,
    Different,
    /// The rule exists on both sides but one side has no parsed properties
    ParsingError,
    MissingInDoc1,
    MissingInDoc2,
}

impl OverallStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OverallStatus::Match => "Match",
            OverallStatus::VersionOnly => "Version Only",
            OverallStatus::Different => "Different",
            OverallStatus::ParsingError => "Parsing Error",
            OverallStatus::MissingInDoc1 => "Missing in File 1",
            OverallStatus::MissingInDoc2 => "Missing in File 2",
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            OverallStatus::MissingInDoc1 | OverallStatus::MissingInDoc2
        )
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One property of a rule pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffRow {
    pub key: String,
    pub value_in_doc1: Option<String>,
    pub value_in_doc2: Option<String>,
    pub status: DiffStatus,
}

/// One entry of the aligned raw-line view
///
/// A one-sided entry (insertion or deletion) has the other side `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlignedLinePair {
    pub line_from_doc1: Option<String>,
    pub line_from_doc2: Option<String>,
    pub changed: bool,
}

impl AlignedLinePair {
    pub fn new(line_from_doc1: Option<String>, line_from_doc2: Option<String>, changed: bool) -> Self {
        Self {
            line_from_doc1,
            line_from_doc2,
            changed,
        }
    }
}

/// Summary line for one rule id in a whole-document comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleComparison {
    pub rule_id: String,
    pub category: String,
    pub status: OverallStatus,
    /// Human-readable explanation of the status
    pub details: String,
}

/// Everything the detail view needs for one rule id
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleDetail {
    pub rule_id: String,
    pub status: OverallStatus,
    /// Property rows sorted by key, followed by the `Info` rows
    pub rows: Vec<DiffRow>,
    pub lines: Vec<AlignedLinePair>,
    pub instances_in_doc1: Vec<Instance>,
    pub instances_in_doc2: Vec<Instance>,
}

//! Presentation helpers for comparison results
//!
//! Filtering, sorting and plain-text export of the data produced by
//! [`crate::diff`]. Nothing here changes a classification; it only decides
//! what is shown and in which order.

use crate::diff::{DiffRow, DiffStatus, OverallStatus, RuleComparison};
use serde::Deserialize;
use std::cmp::Ordering;

/// Status toggles for a comparison listing
///
/// With every toggle off the listing is unfiltered. `ParsingError` results
/// are always shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatusFilter {
    pub different: bool,
    pub missing: bool,
    pub matches: bool,
    pub version_only: bool,
}

impl StatusFilter {
    pub fn is_empty(&self) -> bool {
        !(self.different || self.missing || self.matches || self.version_only)
    }

    /// Whether a result with `status` passes the filter
    pub fn allows(&self, status: OverallStatus) -> bool {
        if self.is_empty() {
            return true;
        }
        match status {
            OverallStatus::ParsingError => true,
            OverallStatus::Different => self.different,
            OverallStatus::MissingInDoc1 | OverallStatus::MissingInDoc2 => self.missing,
            OverallStatus::Match => self.matches,
            OverallStatus::VersionOnly => self.version_only,
        }
    }

    /// Keep the results that pass, preserving order
    pub fn apply<'a>(&self, results: &'a [RuleComparison]) -> Vec<&'a RuleComparison> {
        results.iter().filter(|r| self.allows(r.status)).collect()
    }
}

/// Row-level visibility toggles for the property table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowFilter {
    pub hide_same: bool,
    pub hide_version_only: bool,
}

impl RowFilter {
    /// `Info` rows are never hidden.
    pub fn allows(&self, row: &DiffRow) -> bool {
        match row.status {
            DiffStatus::Same => !self.hide_same,
            DiffStatus::VersionOnly => !self.hide_version_only,
            _ => true,
        }
    }

    pub fn apply<'a>(&self, rows: &'a [DiffRow]) -> Vec<&'a DiffRow> {
        rows.iter().filter(|row| self.allows(row)).collect()
    }
}

/// Sortable columns of the property table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowColumn {
    Key,
    Doc1,
    Doc2,
    Status,
}

/// Click-to-sort state: requesting the active column again flips direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowSort {
    pub column: Option<RowColumn>,
    pub descending: bool,
}

impl RowSort {
    pub fn request(&mut self, column: RowColumn) {
        if self.column == Some(column) {
            self.descending = !self.descending;
        } else {
            self.column = Some(column);
            self.descending = false;
        }
    }

    /// Stable sort of `rows` by the active column; no-op when none is set.
    ///
    /// Text columns compare case-insensitively; an absent value sorts
    /// before any present one.
    pub fn apply(&self, rows: &mut [DiffRow]) {
        let Some(column) = self.column else {
            return;
        };
        rows.sort_by(|a, b| {
            let ordering = compare_rows(column, a, b);
            if self.descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
    }
}

fn compare_rows(column: RowColumn, a: &DiffRow, b: &DiffRow) -> Ordering {
    match column {
        RowColumn::Key => compare_text(Some(&a.key), Some(&b.key)),
        RowColumn::Doc1 => compare_text(a.value_in_doc1.as_deref(), b.value_in_doc1.as_deref()),
        RowColumn::Doc2 => compare_text(a.value_in_doc2.as_deref(), b.value_in_doc2.as_deref()),
        RowColumn::Status => a.status.label().cmp(b.status.label()),
    }
}

fn compare_text(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// `rule_id<TAB>status<TAB>details`, one line per result
pub fn export_comparisons<'a, I>(results: I) -> String
where
    I: IntoIterator<Item = &'a RuleComparison>,
{
    results
        .into_iter()
        .map(|r| format!("{}\t{}\t{}", r.rule_id, r.status, r.details))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `key: [v1] vs [v2] (status)`, one line per row
pub fn export_rows<'a, I>(rows: I) -> String
where
    I: IntoIterator<Item = &'a DiffRow>,
{
    rows.into_iter()
        .map(|row| {
            format!(
                "{}: [{}] vs [{}] ({})",
                row.key,
                row.value_in_doc1.as_deref().unwrap_or_default(),
                row.value_in_doc2.as_deref().unwrap_or_default(),
                row.status
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `key: value`, one line per property in the order given
pub fn export_properties<I, K, V>(properties: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    properties
        .into_iter()
        .map(|(key, value)| format!("{}: {}", key.as_ref(), value.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::display_properties;
    use crate::model::PropertyMap;

    fn comparison(rule_id: &str, status: OverallStatus) -> RuleComparison {
        RuleComparison {
            rule_id: rule_id.to_string(),
            category: "Registry".to_string(),
            status,
            details: status.label().to_string(),
        }
    }

    fn row(key: &str, v1: Option<&str>, v2: Option<&str>, status: DiffStatus) -> DiffRow {
        DiffRow {
            key: key.to_string(),
            value_in_doc1: v1.map(str::to_string),
            value_in_doc2: v2.map(str::to_string),
            status,
        }
    }

    fn all_statuses() -> Vec<RuleComparison> {
        vec![
            comparison("V-1", OverallStatus::Match),
            comparison("V-2", OverallStatus::VersionOnly),
            comparison("V-3", OverallStatus::Different),
            comparison("V-4", OverallStatus::ParsingError),
            comparison("V-5", OverallStatus::MissingInDoc1),
            comparison("V-6", OverallStatus::MissingInDoc2),
        ]
    }

    #[test]
    fn test_empty_filter_shows_everything() {
        let results = all_statuses();
        assert_eq!(StatusFilter::default().apply(&results).len(), results.len());
    }

    #[test]
    fn test_missing_toggle_covers_both_sides_and_parsing_errors_stay() {
        let results = all_statuses();
        let filter = StatusFilter {
            missing: true,
            ..StatusFilter::default()
        };
        let ids: Vec<&str> = filter
            .apply(&results)
            .iter()
            .map(|r| r.rule_id.as_str())
            .collect();
        assert_eq!(ids, vec!["V-4", "V-5", "V-6"]);
    }

    #[test]
    fn test_combined_toggles() {
        let results = all_statuses();
        let filter = StatusFilter {
            different: true,
            version_only: true,
            ..StatusFilter::default()
        };
        let ids: Vec<&str> = filter
            .apply(&results)
            .iter()
            .map(|r| r.rule_id.as_str())
            .collect();
        assert_eq!(ids, vec!["V-2", "V-3", "V-4"]);
    }

    #[test]
    fn test_row_filter_keeps_info() {
        let rows = vec![
            row("a", Some("1"), Some("1"), DiffStatus::Same),
            row("b", Some("1"), Some("2"), DiffStatus::Different),
            row("c", Some("x"), Some("X"), DiffStatus::VersionOnly),
            row("Instances in File 1", Some("1"), None, DiffStatus::Info),
        ];
        let filter = RowFilter {
            hide_same: true,
            hide_version_only: true,
        };
        let keys: Vec<&str> = filter.apply(&rows).iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["b", "Instances in File 1"]);
    }

    #[test]
    fn test_sort_request_toggles_direction() {
        let mut sort = RowSort::default();
        sort.request(RowColumn::Key);
        assert_eq!(sort.column, Some(RowColumn::Key));
        assert!(!sort.descending);

        sort.request(RowColumn::Key);
        assert!(sort.descending);

        sort.request(RowColumn::Status);
        assert_eq!(sort.column, Some(RowColumn::Status));
        assert!(!sort.descending);
    }

    #[test]
    fn test_sort_by_doc2_puts_absent_first() {
        let mut rows = vec![
            row("a", Some("1"), Some("beta"), DiffStatus::Different),
            row("b", Some("1"), None, DiffStatus::MissingInDoc2),
            row("c", Some("1"), Some("Alpha"), DiffStatus::Different),
        ];
        let sort = RowSort {
            column: Some(RowColumn::Doc2),
            descending: false,
        };
        sort.apply(&mut rows);
        let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["b", "c", "a"]);

        let sort = RowSort {
            column: Some(RowColumn::Doc2),
            descending: true,
        };
        sort.apply(&mut rows);
        let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "c", "b"]);
    }

    #[test]
    fn test_export_formats() {
        let results = vec![comparison("V-1", OverallStatus::Match)];
        assert_eq!(export_comparisons(&results), "V-1\tMatch\tMatch");

        let rows = vec![row("Ensure", Some("Present"), None, DiffStatus::MissingInDoc2)];
        assert_eq!(
            export_rows(&rows),
            "Ensure: [Present] vs [] (Missing in File 2)"
        );

        let props: PropertyMap = [("Key", "k"), ("Ensure", "Present")].into_iter().collect();
        assert_eq!(export_properties(props.iter()), "Key: k\nEnsure: Present");
        assert_eq!(
            export_properties(display_properties(&props)),
            "Key: k\nEnsure: Present"
        );
    }
}

//! Per-property diff rows for one rule pair.

use crate::diff::model::{DiffRow, DiffStatus};
use crate::model::{PropertyMap, Rule};
use crate::normalize::equivalent;
use std::collections::HashSet;

/// Key of the `Info` row carrying the first document's instance count
pub const INSTANCES_IN_DOC1_KEY: &str = "Instances in File 1";
/// Key of the `Info` row carrying the second document's instance count
pub const INSTANCES_IN_DOC2_KEY: &str = "Instances in File 2";

/// Compare two rules property by property.
///
/// Keys are unified case-insensitively; the casing of the first occurrence
/// (first document first) is kept. Rows come back sorted by key. An
/// absent rule behaves like an empty property map.
pub fn diff_rows(rule1: Option<&Rule>, rule2: Option<&Rule>) -> Vec<DiffRow> {
    let empty = PropertyMap::new();
    let details1 = rule1.map(|r| &r.details).unwrap_or(&empty);
    let details2 = rule2.map(|r| &r.details).unwrap_or(&empty);

    let mut seen = HashSet::new();
    let mut rows: Vec<DiffRow> = details1
        .keys()
        .chain(details2.keys())
        .filter(|key| seen.insert(key.to_lowercase()))
        .map(|key| {
            let v1 = details1.get_ignore_case(key);
            let v2 = details2.get_ignore_case(key);
            DiffRow {
                key: key.to_string(),
                value_in_doc1: v1.map(str::to_string),
                value_in_doc2: v2.map(str::to_string),
                status: classify(v1, v2),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        a.key
            .to_lowercase()
            .cmp(&b.key.to_lowercase())
            .then_with(|| a.key.cmp(&b.key))
    });
    rows
}

/// The two `Info` rows reporting contributing-instance counts
pub fn info_rows(instances_in_doc1: usize, instances_in_doc2: usize) -> Vec<DiffRow> {
    vec![
        DiffRow {
            key: INSTANCES_IN_DOC1_KEY.to_string(),
            value_in_doc1: Some(instances_in_doc1.to_string()),
            value_in_doc2: None,
            status: DiffStatus::Info,
        },
        DiffRow {
            key: INSTANCES_IN_DOC2_KEY.to_string(),
            value_in_doc1: None,
            value_in_doc2: Some(instances_in_doc2.to_string()),
            status: DiffStatus::Info,
        },
    ]
}

fn classify(v1: Option<&str>, v2: Option<&str>) -> DiffStatus {
    match (v1, v2) {
        (Some(a), Some(b)) if a.trim() == b.trim() => DiffStatus::Same,
        (Some(_), Some(_)) if equivalent(v1, v2) => DiffStatus::VersionOnly,
        (Some(_), Some(_)) => DiffStatus::Different,
        (Some(_), None) => DiffStatus::MissingInDoc2,
        (None, Some(_)) => DiffStatus::MissingInDoc1,
        // Unreachable for keys drawn from either map.
        (None, None) => DiffStatus::Same,
    }
}

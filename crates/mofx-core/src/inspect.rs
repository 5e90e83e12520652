//! Single-document inspection helpers
//!
//! Grouping and display shaping for browsing one document's rules and
//! instances without a second document to compare against.

use crate::diff::truncate_line;
use crate::model::{Document, PropertyMap, Rule};
use serde::Serialize;
use std::collections::BTreeMap;

/// Keys listed first, in this order, when displaying properties
pub const COMMON_KEYS: [&str; 6] = ["ResourceID", "Key", "Value", "Ensure", "Type", "Path"];

/// Keys picked (ignoring case) for a one-line instance preview
pub const PREVIEW_KEYS: [&str; 5] = ["ResourceID", "Key", "Value", "Name", "Path"];

pub const DEFAULT_PREVIEW_LEN: usize = 120;
pub const EMPTY_PLACEHOLDER: &str = "-";
pub const NO_PROPERTIES_LABEL: &str = "(no properties)";

/// Rules grouped under the class of the instance that first produced them
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassGroup<'a> {
    pub class_name: String,
    pub rules: Vec<&'a Rule>,
}

/// Group a document's rules by contributing class name.
///
/// A rule fed by instances of several classes is listed under each of
/// them. Groups are ordered by class name, rules within a group by id.
/// With `only_skipped`, rules without the skip marker are left out.
pub fn rules_by_class(doc: &Document, only_skipped: bool) -> Vec<ClassGroup<'_>> {
    let mut groups: BTreeMap<&str, Vec<&Rule>> = BTreeMap::new();

    for rule in &doc.rules {
        if only_skipped && !rule.is_skipped {
            continue;
        }
        for instance in doc.contributing_instances(&rule.rule_id) {
            let rules = groups.entry(instance.class_name.as_str()).or_default();
            if !rules.iter().any(|r| r.rule_id == rule.rule_id) {
                rules.push(rule);
            }
        }
    }

    groups
        .into_iter()
        .map(|(class_name, rules)| ClassGroup {
            class_name: class_name.to_string(),
            rules,
        })
        .collect()
}

/// Properties ordered for display: [`COMMON_KEYS`] first, the rest by key
/// case-insensitively.
pub fn display_properties(properties: &PropertyMap) -> Vec<(String, String)> {
    if properties.is_empty() {
        return vec![(
            NO_PROPERTIES_LABEL.to_string(),
            EMPTY_PLACEHOLDER.to_string(),
        )];
    }

    let rank = |key: &str| {
        COMMON_KEYS
            .iter()
            .position(|common| common.eq_ignore_ascii_case(key))
            .unwrap_or(COMMON_KEYS.len())
    };

    let mut entries: Vec<(String, String)> = properties
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    entries.sort_by(|(a, _), (b, _)| {
        rank(a)
            .cmp(&rank(b))
            .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
    });
    entries
}

/// One-line summary of an instance's most identifying properties.
///
/// Picked keys appear in the instance's own property order.
pub fn instance_preview(properties: &PropertyMap, max_len: usize) -> String {
    let mut parts: Vec<String> = properties
        .iter()
        .filter(|(key, _)| PREVIEW_KEYS.iter().any(|pick| pick.eq_ignore_ascii_case(key)))
        .map(|(k, v)| format!("{k}={v}"))
        .collect();

    if parts.is_empty() {
        parts = properties
            .iter()
            .take(3)
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
    }
    if parts.is_empty() {
        return EMPTY_PLACEHOLDER.to_string();
    }

    truncate_line(&parts.join(" | "), max_len)
}

//! Rule aggregation: instances → rule catalog

use crate::model::{Instance, Rule, UNKNOWN_CATEGORY};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// Marker inside a `ResourceID` that flags the rule as skipped
pub const SKIP_MARKER: &str = "[Skip]";

/// `V-1234` with an optional `.suffix`
pub static RULE_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"V-\d+(?:\.\w+)?").expect("valid regex"));

static CATEGORY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]*)\]").expect("valid regex"));

/// All rule ids in `resource_id`, left to right, duplicates preserved
pub fn extract_rule_ids(resource_id: &str) -> Vec<String> {
    RULE_ID_PATTERN
        .find_iter(resource_id)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Contents of the first `[...]` segment, or `"Unknown"`
pub fn extract_category(resource_id: &str) -> String {
    CATEGORY_PATTERN
        .captures(resource_id)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string())
}

/// Group instances into rules keyed by the ids in their `ResourceID`.
///
/// The first instance seen for a rule fixes `is_skipped` and `category`.
/// Every contributing instance merges its properties into `details`
/// without overwriting existing keys and appends its lines to `raw_text`.
/// The returned catalog is sorted by `rule_id`.
pub fn aggregate(instances: &[Instance]) -> Vec<Rule> {
    let mut rules: BTreeMap<String, Rule> = BTreeMap::new();

    for instance in instances {
        let Some(resource_id) = instance.resource_id() else {
            continue;
        };

        for rule_id in extract_rule_ids(resource_id) {
            let rule = rules.entry(rule_id).or_insert_with_key(|id| {
                Rule::new(
                    id.clone(),
                    resource_id.contains(SKIP_MARKER),
                    extract_category(resource_id),
                )
            });
            rule.absorb(&instance.properties);
        }
    }

    rules.into_values().collect()
}

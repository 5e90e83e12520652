//! Human-readable explanations attached to each rule comparison.

use crate::diff::model::OverallStatus;
use crate::model::Rule;

/// Preview length for raw text in `ParsingError` explanations
pub const RAW_PREVIEW_LEN: usize = 100;

const NOT_AVAILABLE: &str = "N/A";

/// Explain `status` for a rule pair.
///
/// The text is informational only; it never influences the status.
pub fn describe(status: OverallStatus, rule1: Option<&Rule>, rule2: Option<&Rule>) -> String {
    match (status, rule1, rule2) {
        (OverallStatus::Match, _, _) => "All properties identical".to_string(),
        (OverallStatus::VersionOnly, _, _) => "Only version tokens differ".to_string(),
        (OverallStatus::ParsingError, Some(r1), Some(r2)) => format!(
            "One or both rules have no parsed details. Raw diff: {}",
            raw_text_diff(&r1.raw_text, &r2.raw_text)
        ),
        (OverallStatus::Different, Some(r1), Some(r2)) => property_differences(r1, r2),
        _ => String::new(),
    }
}

/// `key: v1 vs v2` for every property that is missing or unequal
///
/// Keys of the first rule come first, then keys only the second has.
pub fn property_differences(rule1: &Rule, rule2: &Rule) -> String {
    let left = rule1.details.iter().filter_map(|(key, v1)| {
        match rule2.details.get_ignore_case(key) {
            Some(v2) if v2 == v1 => None,
            other => Some(format!(
                "{}: {} vs {}",
                key,
                v1,
                other.unwrap_or(NOT_AVAILABLE)
            )),
        }
    });
    let right = rule2
        .details
        .iter()
        .filter(|(key, _)| rule1.details.get_ignore_case(key).is_none())
        .map(|(key, v2)| format!("{}: {} vs {}", key, NOT_AVAILABLE, v2));

    left.chain(right).collect::<Vec<_>>().join(", ")
}

/// Short comparison of two raw texts
pub fn raw_text_diff(text1: &str, text2: &str) -> String {
    if text1 == text2 {
        return "Raw text identical".to_string();
    }
    format!(
        "RawText differs. File1: {}, File2: {}",
        preview(text1, RAW_PREVIEW_LEN),
        preview(text2, RAW_PREVIEW_LEN)
    )
}

/// First `len` characters of `text` with `...`, or `EMPTY`
pub fn preview(text: &str, len: usize) -> String {
    if text.is_empty() {
        return "EMPTY".to_string();
    }
    match text.char_indices().nth(len) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

//! Rule comparison engine.
//!
//! [`overall_status`] is the per-rule state machine; [`compare_documents`]
//! applies it to the union of two catalogs and [`rule_detail`] builds the
//! drill-down for one rule id.

use crate::diff::align::align_rules;
use crate::diff::model::{OverallStatus, RuleComparison, RuleDetail};
use crate::diff::rows::{diff_rows, info_rows};
use crate::diff::summary::describe;
use crate::errors::{MofxError, Result};
use crate::model::{Document, PropertyMap, Rule, UNKNOWN_CATEGORY};
use crate::normalize::{equivalent, equivalent_str};
use crate::{log_op_end, log_op_error, log_op_start};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

/// Classify one rule id across two documents.
///
/// Evaluated in priority order: missing on either side, empty details
/// (`ParsingError`), exact match, version-only match (properties *and* raw
/// lines must be equivalent), otherwise `Different`.
pub fn overall_status(rule1: Option<&Rule>, rule2: Option<&Rule>) -> OverallStatus {
    let (rule1, rule2) = match (rule1, rule2) {
        (None, _) => return OverallStatus::MissingInDoc1,
        (_, None) => return OverallStatus::MissingInDoc2,
        (Some(r1), Some(r2)) => (r1, r2),
    };

    if rule1.details.is_empty() || rule2.details.is_empty() {
        return OverallStatus::ParsingError;
    }

    if details_match(&rule1.details, &rule2.details) {
        return OverallStatus::Match;
    }

    if details_equivalent(&rule1.details, &rule2.details)
        && raw_lines_equivalent(&rule1.raw_text, &rule2.raw_text)
    {
        return OverallStatus::VersionOnly;
    }

    OverallStatus::Different
}

/// Same case-insensitive key set on both sides
fn same_keys(d1: &PropertyMap, d2: &PropertyMap) -> bool {
    d1.len() == d2.len()
        && d1.keys().all(|key| d2.contains_key(key))
        && d2.keys().all(|key| d1.contains_key(key))
}

/// Same keys and ordinal-equal trimmed values for every key
fn details_match(d1: &PropertyMap, d2: &PropertyMap) -> bool {
    same_keys(d1, d2)
        && d1.iter().all(|(key, v1)| {
            d2.get_ignore_case(key)
                .map(|v2| v2.trim() == v1.trim())
                .unwrap_or(false)
        })
}

/// Same keys and [`equivalent`] values for every key
fn details_equivalent(d1: &PropertyMap, d2: &PropertyMap) -> bool {
    same_keys(d1, d2)
        && d1
            .iter()
            .all(|(key, v1)| equivalent(Some(v1), d2.get_ignore_case(key)))
}

/// Same line count and [`equivalent`] lines position by position
fn raw_lines_equivalent(raw1: &str, raw2: &str) -> bool {
    let lines1: Vec<&str> = raw1.lines().collect();
    let lines2: Vec<&str> = raw2.lines().collect();
    lines1.len() == lines2.len()
        && lines1
            .iter()
            .zip(&lines2)
            .all(|(a, b)| equivalent_str(a, b))
}

/// Compare every rule id present in either document, ordered by id
pub fn compare_documents(doc1: &Document, doc2: &Document) -> Vec<RuleComparison> {
    let start = Instant::now();
    log_op_start!(
        "compare_documents",
        rule_count_doc1 = doc1.rules.len(),
        rule_count_doc2 = doc2.rules.len()
    );

    let rule_ids: BTreeSet<&str> = doc1.rule_ids().chain(doc2.rule_ids()).collect();

    let results: Vec<RuleComparison> = rule_ids
        .into_iter()
        .map(|rule_id| {
            let rule1 = doc1.rule(rule_id);
            let rule2 = doc2.rule(rule_id);
            let status = overall_status(rule1, rule2);
            RuleComparison {
                rule_id: rule_id.to_string(),
                category: rule1
                    .or(rule2)
                    .map(|r| r.category.clone())
                    .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string()),
                status,
                details: describe(status, rule1, rule2),
            }
        })
        .collect();

    let changed = results
        .iter()
        .filter(|r| r.status != OverallStatus::Match)
        .count();
    log_op_end!(
        "compare_documents",
        duration_ms = start.elapsed().as_millis() as u64,
        rule_count = results.len(),
        changed_count = changed
    );

    results
}

/// Group comparison results by category, categories ascending
pub fn group_by_category(results: &[RuleComparison]) -> BTreeMap<&str, Vec<&RuleComparison>> {
    let mut groups: BTreeMap<&str, Vec<&RuleComparison>> = BTreeMap::new();
    for result in results {
        groups.entry(result.category.as_str()).or_default().push(result);
    }
    groups
}

/// Build the drill-down for one rule id.
///
/// # Errors
///
/// `RuleNotFound` when neither document has the rule.
pub fn rule_detail(
    doc1: &Document,
    doc2: &Document,
    rule_id: &str,
    max_line_len: usize,
) -> Result<RuleDetail> {
    let start = Instant::now();
    log_op_start!("rule_detail", rule_id = rule_id);

    let rule1 = doc1.rule(rule_id);
    let rule2 = doc2.rule(rule_id);
    if rule1.is_none() && rule2.is_none() {
        let err = MofxError::RuleNotFound {
            rule_id: rule_id.to_string(),
        };
        log_op_error!(
            "rule_detail",
            err.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            rule_id = rule_id
        );
        return Err(err);
    }

    let instances_in_doc1: Vec<_> = doc1
        .contributing_instances(rule_id)
        .into_iter()
        .cloned()
        .collect();
    let instances_in_doc2: Vec<_> = doc2
        .contributing_instances(rule_id)
        .into_iter()
        .cloned()
        .collect();

    let mut rows = diff_rows(rule1, rule2);
    rows.extend(info_rows(instances_in_doc1.len(), instances_in_doc2.len()));

    let lines = align_rules(rule1, rule2, max_line_len);

    log_op_end!(
        "rule_detail",
        duration_ms = start.elapsed().as_millis() as u64,
        rule_id = rule_id,
        row_count = rows.len()
    );

    Ok(RuleDetail {
        rule_id: rule_id.to_string(),
        status: overall_status(rule1, rule2),
        rows,
        lines,
        instances_in_doc1,
        instances_in_doc2,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(props: &[(&str, &str)]) -> Rule {
        let mut rule = Rule::new("V-1", false, "Registry");
        if !props.is_empty() {
            rule.absorb(&props.iter().copied().collect());
        }
        rule
    }

    #[test]
    fn test_missing_takes_priority() {
        let r = rule(&[("k", "v")]);
        assert_eq!(overall_status(None, Some(&r)), OverallStatus::MissingInDoc1);
        assert_eq!(overall_status(Some(&r), None), OverallStatus::MissingInDoc2);
    }

    #[test]
    fn test_empty_details_is_parsing_error() {
        let empty = rule(&[]);
        let full = rule(&[("k", "v")]);
        assert_eq!(
            overall_status(Some(&empty), Some(&full)),
            OverallStatus::ParsingError
        );
    }

    #[test]
    fn test_match_ignores_surrounding_whitespace() {
        let r1 = rule(&[("k", "v")]);
        let r2 = rule(&[("k", " v ")]);
        assert_eq!(overall_status(Some(&r1), Some(&r2)), OverallStatus::Match);
    }

    #[test]
    fn test_case_difference_is_version_only() {
        let r1 = rule(&[("Ensure", "Present")]);
        let r2 = rule(&[("Ensure", "present")]);
        assert_eq!(
            overall_status(Some(&r1), Some(&r2)),
            OverallStatus::VersionOnly
        );
    }

    #[test]
    fn test_version_path_is_version_only() {
        let r1 = rule(&[("Path", r"C:\\PowerStig\\v4.10.0\\Rules.ps1")]);
        let r2 = rule(&[("Path", r"C:\\PowerStig\\v4.26.0\\Rules.ps1")]);
        assert_eq!(
            overall_status(Some(&r1), Some(&r2)),
            OverallStatus::VersionOnly
        );
    }

    #[test]
    fn test_extra_key_is_different() {
        let r1 = rule(&[("k", "v")]);
        let r2 = rule(&[("k", "v"), ("x", "y")]);
        assert_eq!(
            overall_status(Some(&r1), Some(&r2)),
            OverallStatus::Different
        );
    }

    #[test]
    fn test_raw_line_count_mismatch_blocks_version_only() {
        // Same merged details, but the second rule has an extra contributing block.
        let r1 = rule(&[("Path", r"PowerStig\4.1\x")]);
        let mut r2 = rule(&[("Path", r"PowerStig\4.2\x")]);
        r2.absorb(&[("Path", "ignored")].into_iter().collect());
        assert_eq!(
            overall_status(Some(&r1), Some(&r2)),
            OverallStatus::Different
        );
    }

    #[test]
    fn test_case_variant_keys_across_instances_merge() {
        let doc1 = Document::parse(
            "instance of R\n{\nResourceID = \"[Registry]V-1\";\nEnsure = \"Present\";\n};\n\
             instance of R\n{\nResourceID = \"[Registry]V-1\";\nensure = \"Present\";\n};",
        );
        let doc2 = Document::parse(
            "instance of R\n{\nResourceID = \"[Registry]V-1\";\nEnsure = \"Present\";\nValueData = \"9\";\n};",
        );
        let r1 = doc1.rule("V-1").unwrap();
        let r2 = doc2.rule("V-1").unwrap();

        let keys: Vec<&str> = r1.details.keys().collect();
        assert_eq!(keys, vec!["ResourceID", "Ensure"]);

        assert_eq!(overall_status(Some(r1), Some(r2)), OverallStatus::Different);
        assert_eq!(overall_status(Some(r2), Some(r1)), OverallStatus::Different);
    }

    #[test]
    fn test_status_is_symmetric() {
        let cases = [
            (rule(&[("k", "v")]), rule(&[("k", "v")])),
            (rule(&[("Ensure", "Present")]), rule(&[("Ensure", "present")])),
            (rule(&[("k", "v")]), rule(&[("K", "v")])),
            (rule(&[("k", "v"), ("a", "1")]), rule(&[("k", "v"), ("b", "1")])),
            (rule(&[("k", "1")]), rule(&[("k", "2")])),
        ];
        for (a, b) in &cases {
            assert_eq!(
                overall_status(Some(a), Some(b)),
                overall_status(Some(b), Some(a)),
                "asymmetric for {:?} / {:?}",
                a.details,
                b.details
            );
        }
    }

    #[test]
    fn test_group_by_category() {
        let results = vec![
            RuleComparison {
                rule_id: "V-1".into(),
                category: "Registry".into(),
                status: OverallStatus::Match,
                details: String::new(),
            },
            RuleComparison {
                rule_id: "V-2".into(),
                category: "AuditPolicy".into(),
                status: OverallStatus::Different,
                details: String::new(),
            },
            RuleComparison {
                rule_id: "V-3".into(),
                category: "Registry".into(),
                status: OverallStatus::Match,
                details: String::new(),
            },
        ];
        let groups = group_by_category(&results);
        let categories: Vec<&str> = groups.keys().copied().collect();
        assert_eq!(categories, vec!["AuditPolicy", "Registry"]);
        assert_eq!(groups["Registry"].len(), 2);
    }
}

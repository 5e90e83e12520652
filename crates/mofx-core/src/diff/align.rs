//! LCS alignment of raw rule lines.
//!
//! Positional comparison turns one inserted line into "everything below
//! changed". Aligning on the longest common subsequence first keeps the
//! change local to the inserted or deleted line.

use crate::diff::model::AlignedLinePair;
use crate::model::Rule;
use crate::normalize::equivalent;

/// Default cap on a single displayed line, in characters
pub const DEFAULT_MAX_LINE_LEN: usize = 400;

/// Suffix appended to truncated lines
pub const TRUNCATION_MARKER: &str = "...";

/// Cap `line` at `max_len` characters, marking truncation with `...`
pub fn truncate_line(line: &str, max_len: usize) -> String {
    match line.char_indices().nth(max_len) {
        Some((byte_idx, _)) => format!("{}{}", &line[..byte_idx], TRUNCATION_MARKER),
        None => line.to_string(),
    }
}

/// Align two line sequences on their longest common subsequence.
///
/// Lines are truncated to `max_line_len` first and matched by exact
/// equality. Every emitted pair is flagged `changed` unless its two sides
/// (a missing side counts as `""`) are [`equivalent`].
///
/// The length table holds `(n + 1) * (m + 1)` entries. That is fine for
/// rule blocks and files of a few thousand lines; larger inputs should be
/// split before calling this.
pub fn align_lines<A, B>(lines1: &[A], lines2: &[B], max_line_len: usize) -> Vec<AlignedLinePair>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let a: Vec<String> = lines1
        .iter()
        .map(|l| truncate_line(l.as_ref(), max_line_len))
        .collect();
    let b: Vec<String> = lines2
        .iter()
        .map(|l| truncate_line(l.as_ref(), max_line_len))
        .collect();

    let (n, m) = (a.len(), b.len());
    let width = m + 1;

    // lcs[i * width + j] = LCS length of a[i..] and b[j..]
    let mut lcs = vec![0u32; (n + 1) * width];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i * width + j] = if a[i] == b[j] {
                lcs[(i + 1) * width + j + 1] + 1
            } else {
                lcs[(i + 1) * width + j].max(lcs[i * width + j + 1])
            };
        }
    }

    let mut pairs = Vec::with_capacity(n.max(m));
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if a[i] == b[j] {
            pairs.push(pair(Some(&a[i]), Some(&b[j])));
            i += 1;
            j += 1;
        } else if lcs[(i + 1) * width + j] >= lcs[i * width + j + 1] {
            pairs.push(pair(Some(&a[i]), None));
            i += 1;
        } else {
            pairs.push(pair(None, Some(&b[j])));
            j += 1;
        }
    }
    pairs.extend(a[i..].iter().map(|line| pair(Some(line), None)));
    pairs.extend(b[j..].iter().map(|line| pair(None, Some(line))));

    pairs
}

/// Align the raw lines of two rules; an absent rule contributes no lines
pub fn align_rules(
    rule1: Option<&Rule>,
    rule2: Option<&Rule>,
    max_line_len: usize,
) -> Vec<AlignedLinePair> {
    let lines1 = rule1.map(Rule::raw_lines).unwrap_or_default();
    let lines2 = rule2.map(Rule::raw_lines).unwrap_or_default();
    align_lines(&lines1, &lines2, max_line_len)
}

fn pair(left: Option<&String>, right: Option<&String>) -> AlignedLinePair {
    let changed = !equivalent(
        Some(left.map(String::as_str).unwrap_or("")),
        Some(right.map(String::as_str).unwrap_or("")),
    );
    AlignedLinePair::new(left.cloned(), right.cloned(), changed)
}

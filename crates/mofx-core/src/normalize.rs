//! Value canonicalization and version-aware equivalence.
//!
//! Two values are *equivalent* when they only differ by cosmetic noise
//! (surrounding quotes, a trailing `;`, whitespace runs, doubled
//! backslashes, letter case) or by the PowerStig version number embedded
//! in a path or identifier.

use once_cell::sync::Lazy;
use regex::Regex;

/// Placeholder substituted for every recognized product version
pub const VERSION_PLACEHOLDER: &str = "<version>";

/// `PowerStig/4.10.0/` or `PowerStig\v4.10.0\`
pub static PATH_SEGMENT_VERSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(powerstig[/\\])v?\d+(?:\.\d+)*[a-z]?([/\\])").expect("valid regex")
});

/// `PowerStig-4.10.0` or `PowerStig_4.10.0` as a whole word
pub static INLINE_VERSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(powerstig[-_])v?\d+(?:\.\d+)*[a-z]?\b").expect("valid regex")
});

/// Any separator on the left, separator or end of input on the right
pub static MIXED_VERSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(powerstig[-_/\\])v?\d+(?:\.\d+)*[a-z]?([-_/\\]|$)").expect("valid regex")
});

static REPEATED_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:<version>){2,}").expect("valid regex"));

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Canonical form of a property value or raw line.
///
/// Steps, in order: trim (empty short-circuits), strip one pair of
/// wrapping `"` or `'`, drop a trailing `;`, collapse whitespace runs,
/// un-double backslashes, replace product version tokens.
///
/// The sequence is repeated until the output stops changing, so the
/// result is a fixed point: `normalize(&normalize(x)) == normalize(x)`.
/// Each changing pass removes characters or version digits, which bounds
/// the number of passes.
pub fn normalize(s: &str) -> String {
    let mut current = normalize_pass(s);
    loop {
        let next = normalize_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn normalize_pass(s: &str) -> String {
    let mut value = s.trim();
    if value.is_empty() {
        return String::new();
    }

    value = strip_wrapping_quotes(value);

    if let Some(stripped) = value.strip_suffix(';') {
        value = stripped.trim();
    }

    let collapsed = WHITESPACE_RUN.replace_all(value, " ");
    let unescaped = collapsed.replace(r"\\", r"\");
    normalize_versions(&unescaped)
}

/// Strip exactly one pair of matching `"` or `'` around the whole string
fn strip_wrapping_quotes(s: &str) -> &str {
    for quote in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}

/// Replace PowerStig version tokens with [`VERSION_PLACEHOLDER`]
pub fn normalize_versions(s: &str) -> String {
    let replacement = format!("${{1}}{}${{2}}", VERSION_PLACEHOLDER);
    let inline_replacement = format!("${{1}}{}", VERSION_PLACEHOLDER);

    let out = PATH_SEGMENT_VERSION.replace_all(s, replacement.as_str());
    let out = INLINE_VERSION.replace_all(&out, inline_replacement.as_str());
    let out = MIXED_VERSION.replace_all(&out, replacement.as_str());
    REPEATED_PLACEHOLDER
        .replace_all(&out, VERSION_PLACEHOLDER)
        .into_owned()
}

/// Version-aware, case-insensitive equality of two optional values.
///
/// Both absent is equivalent; exactly one absent is not.
pub fn equivalent(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => normalize(a).to_lowercase() == normalize(b).to_lowercase(),
        _ => false,
    }
}

/// Shorthand for [`equivalent`] over two present values
pub fn equivalent_str(a: &str, b: &str) -> bool {
    equivalent(Some(a), Some(b))
}

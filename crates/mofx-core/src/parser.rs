//! Tolerant line-oriented MOF parser
//!
//! Recognizes `instance of <Class> [as $<Name>]` openers, `};` closers and
//! `key = value;` assignments, including `{ ... }` array values that may
//! span several lines. Anything else is skipped. Malformed input never
//! fails; it degrades to whatever instances could be closed.

use crate::model::{Instance, PropertyMap};

const INSTANCE_OPENER: &str = "instance of";
const INSTANCE_CLOSER: &str = "};";

/// Parse MOF text into its instances, in document order
pub fn parse_str(text: &str) -> Vec<Instance> {
    let lines: Vec<&str> = text.lines().collect();
    parse_lines(&lines)
}

/// Parse pre-split lines into instances, in document order
pub fn parse_lines<S: AsRef<str>>(lines: &[S]) -> Vec<Instance> {
    let mut instances = Vec::new();
    let mut current: Option<Instance> = None;
    let mut cursor = 0;

    while cursor < lines.len() {
        let trimmed = lines[cursor].as_ref().trim();
        cursor += 1;

        if trimmed.starts_with(INSTANCE_OPENER) {
            // An unclosed predecessor is dropped.
            current = Some(open_instance(trimmed));
            continue;
        }

        if trimmed.starts_with(INSTANCE_CLOSER) {
            if let Some(instance) = current.take() {
                instances.push(instance);
            }
            continue;
        }

        let Some(instance) = current.as_mut() else {
            continue;
        };
        let Some((key, raw_value)) = trimmed.split_once('=') else {
            continue;
        };

        let key = key.trim();
        let value = strip_terminator(raw_value.trim());

        let value = if let Some(body) = value.strip_prefix('{') {
            read_array(body, lines, &mut cursor)
        } else {
            strip_double_quotes(value).to_string()
        };

        // First assignment of a key inside one block wins.
        instance.properties.insert_if_absent(key, value);
    }

    instances
}

/// Build an empty instance from its opener line
fn open_instance(line: &str) -> Instance {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let class_name = tokens.get(2).copied().unwrap_or_default();
    let instance_name = match (tokens.get(3), tokens.get(4)) {
        (Some(&"as"), Some(name)) => Some(name.trim_start_matches('$').to_string()),
        _ => None,
    };
    Instance::new(class_name, instance_name)
}

/// Read an array literal whose opening `{` has already been consumed.
///
/// `body` is the rest of the opening line. When it does not close the
/// array, following lines are consumed and `cursor` advanced past the
/// closing line (or to the end of input).
fn read_array<S: AsRef<str>>(body: &str, lines: &[S], cursor: &mut usize) -> String {
    let mut items = Vec::new();

    if let Some(inner) = body.strip_suffix('}') {
        push_items(inner, &mut items);
        return items.join(", ");
    }
    push_items(body, &mut items);

    while *cursor < lines.len() {
        let line = strip_terminator(lines[*cursor].as_ref().trim());
        *cursor += 1;

        if let Some(tail) = line.strip_suffix('}') {
            push_items(tail, &mut items);
            break;
        }
        push_items(line, &mut items);
    }

    items.join(", ")
}

/// Split on commas and newlines, trim, unquote, drop empties
fn push_items(chunk: &str, items: &mut Vec<String>) {
    items.extend(
        chunk
            .split([',', '\n'])
            .map(|item| strip_double_quotes(item.trim()).trim())
            .filter(|item| !item.is_empty())
            .map(str::to_string),
    );
}

/// Drop one trailing `;` and any whitespace it exposes
fn strip_terminator(value: &str) -> &str {
    value.strip_suffix(';').map(str::trim_end).unwrap_or(value)
}

/// Strip one pair of outer `"` characters if present
fn strip_double_quotes(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

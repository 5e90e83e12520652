use crate::model::properties::PropertyMap;
use serde::Serialize;

/// Category used when a `ResourceID` has no bracketed tag
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// A logical finding (`V-1234`, `V-1234.a`) with properties merged from
/// every instance that references it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    pub rule_id: String,
    pub is_skipped: bool,
    pub category: String,
    /// Merged properties, first contributing instance wins per key
    pub details: PropertyMap,
    /// `key = value` lines of every contributing instance, in encounter order
    pub raw_text: String,
    pub instance_count: usize,
}

impl Rule {
    pub fn new(rule_id: impl Into<String>, is_skipped: bool, category: impl Into<String>) -> Self {
        Self {
            rule_id: rule_id.into(),
            is_skipped,
            category: category.into(),
            details: PropertyMap::new(),
            raw_text: String::new(),
            instance_count: 0,
        }
    }

    /// Fold one contributing instance's properties into this rule
    pub fn absorb(&mut self, properties: &PropertyMap) {
        self.details.merge_absent(properties);
        if !self.raw_text.is_empty() {
            self.raw_text.push('\n');
        }
        self.raw_text.push_str(&properties.to_lines());
        self.instance_count += 1;
    }

    pub fn raw_lines(&self) -> Vec<&str> {
        self.raw_text.lines().collect()
    }
}

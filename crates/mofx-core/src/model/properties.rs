use serde::ser::{Serialize, SerializeMap, Serializer};

/// Insertion-ordered property map with first-write-wins semantics
///
/// Keys keep the casing they had in the source document. Key identity is
/// case-insensitive: `Ensure` and `ensure` are the same key, and whichever
/// arrived first keeps both its casing and its value. [`get`] is an exact
/// (case-sensitive) lookup; [`get_ignore_case`] is what comparison code
/// uses.
///
/// [`get`]: PropertyMap::get
/// [`get_ignore_case`]: PropertyMap::get_ignore_case
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PropertyMap {
    entries: Vec<(String, String)>,
}

impl PropertyMap {
    /// Create a new empty map
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert `key` only if no key equal to it ignoring case is present
    ///
    /// Returns `true` when the entry was added.
    pub fn insert_if_absent(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        if self.contains_key(&key) {
            return false;
        }
        self.entries.push((key, value.into()));
        true
    }

    /// Merge every entry of `other` using [`insert_if_absent`](Self::insert_if_absent)
    pub fn merge_absent(&mut self, other: &PropertyMap) {
        for (key, value) in other.iter() {
            self.insert_if_absent(key, value);
        }
    }

    /// Exact, case-sensitive lookup
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Case-insensitive lookup; the first matching entry wins
    pub fn get_ignore_case(&self, key: &str) -> Option<&str> {
        let wanted = key.to_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| k.to_lowercase() == wanted)
            .map(|(_, v)| v.as_str())
    }

    /// Case-insensitive key presence
    pub fn contains_key(&self, key: &str) -> bool {
        self.get_ignore_case(key).is_some()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as `key = value` lines joined by `\n`
    pub fn to_lines(&self) -> String {
        self.entries
            .iter()
            .map(|(k, v)| format!("{} = {}", k, v))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PropertyMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = PropertyMap::new();
        for (k, v) in iter {
            map.insert_if_absent(k, v);
        }
        map
    }
}

impl Serialize for PropertyMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

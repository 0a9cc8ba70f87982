//! DOMStringMap (dataset)
//!
//! Live view of an element's `data-*` attributes, keyed in camelCase. The
//! view is materialized on first read and kept current by attribute
//! observers; writes go through the attribute store.

use crate::attributes::Attr;

const DATA_PREFIX: &str = "data-";

/// DOMStringMap for data-* attributes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DOMStringMap {
    entries: Vec<(String, String)>,
}

impl DOMStringMap {
    /// Create empty string map
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an element's attributes, keeping attribute order. When
    /// several attributes fold onto one key, the first one wins.
    pub fn from_attributes<'a>(attrs: impl IntoIterator<Item = &'a Attr>) -> Self {
        let mut map = Self::new();
        for attr in attrs {
            match Self::key_for_attribute(&attr.name) {
                Some(key) if !map.has(&key) => map.entries.push((key, attr.value.clone())),
                _ => {}
            }
        }
        map
    }

    /// Get value by camelCase key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Check if key exists
    pub fn has(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Keys in attribute order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `userId` -> `data-user-id`
    pub fn to_attribute_name(key: &str) -> String {
        format!("{DATA_PREFIX}{}", to_kebab_case(key))
    }

    /// `data-user-id` -> `userId`; `None` for other attributes
    pub fn key_for_attribute(name: &str) -> Option<String> {
        name.strip_prefix(DATA_PREFIX).map(to_camel_case)
    }
}

/// Convert kebab-case to camelCase. Only a dash followed by an ASCII
/// lowercase letter is folded.
fn to_camel_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match chars.peek() {
            Some(&next) if c == '-' && next.is_ascii_lowercase() => {
                result.push(next.to_ascii_uppercase());
                chars.next();
            }
            _ => result.push(c),
        }
    }

    result
}

/// Convert camelCase to kebab-case
fn to_kebab_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);

    for c in s.chars() {
        if c.is_ascii_uppercase() {
            result.push('-');
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }

    result
}

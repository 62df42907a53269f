//! Raw form payloads.
//!
//! A URL-encoded body is parsed into an ordered multimap so that repeated
//! keys (`reasons[]=a&reasons[]=b`) survive intact. Accessors are fallible:
//! a missing required key becomes a [`FieldError`] instead of a crash, and
//! list lookups accept the key with or without the `[]` marker.

use std::collections::HashMap;

use crate::validation::FieldError;

/// Suffix browsers append to array-valued field names.
pub const LIST_MARKER: &str = "[]";

/// Parsed `application/x-www-form-urlencoded` payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

impl FormData {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a URL-encoded body. Invalid percent-escapes are decoded lossily.
    pub fn parse(body: &[u8]) -> Self {
        let entries = url::form_urlencoded::parse(body)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { entries }
    }

    /// Build a payload from key/value pairs, in order.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Append one key/value pair.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Encode back to a URL-encoded body.
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.entries.iter())
            .finish()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First value for `key`, or a "missing field" error labelled with `label`.
    pub fn required(&self, key: &str, label: &str) -> Result<&str, FieldError> {
        self.get(key)
            .ok_or_else(|| FieldError::new(key, format!("Missing required field: {}.", label)))
    }

    /// Whether a checkbox-style field was submitted with a non-empty value.
    pub fn is_checked(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.trim().is_empty())
    }

    /// All values for a list field. `name` may be given with or without the
    /// `[]` marker; both spellings are collected, in submission order.
    pub fn list(&self, name: &str) -> Vec<&str> {
        let bare = name.strip_suffix(LIST_MARKER).unwrap_or(name);
        let marked = format!("{}{}", bare, LIST_MARKER);
        self.entries
            .iter()
            .filter(|(k, _)| k == bare || *k == marked)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Scalar values keyed by name, first occurrence wins. List fields are
    /// skipped. Used to re-populate a rejected form.
    pub fn scalars(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        for (k, v) in &self.entries {
            if k.ends_with(LIST_MARKER) {
                continue;
            }
            map.entry(k.clone()).or_insert_with(|| v.clone());
        }
        map
    }
}

//! Form fields as the browser submits them
//! Ordered name/value pairs, collapsed into a JSON object before sending

use serde_json::{Map, Value};

/// Ordered set of `(name, value)` pairs read from a form at submit time.
///
/// Names may repeat. The pairs are kept exactly as read; collapsing happens
/// only when the payload is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    entries: Vec<(String, String)>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, keeping any earlier field with the same name.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse a `name=value` argument. Only the first `=` splits, so values
    /// may contain `=` themselves.
    pub fn parse_pair(raw: &str) -> Result<(String, String), String> {
        match raw.split_once('=') {
            Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
            _ => Err(format!("Invalid field '{}', expected name=value", raw)),
        }
    }

    /// Collapse into a flat JSON object with the key order of a browser
    /// object built from the pairs.
    ///
    /// The last value per name wins. Array-index names (`"0"`, `"7"`) come
    /// first in ascending numeric order; every other name keeps the position
    /// of its first occurrence.
    pub fn to_payload(&self) -> Map<String, Value> {
        let mut collapsed = Map::with_capacity(self.entries.len());
        for (name, value) in &self.entries {
            collapsed.insert(name.clone(), Value::String(value.clone()));
        }

        let mut indexed: Vec<(u32, String, Value)> = Vec::new();
        let mut named = Vec::with_capacity(collapsed.len());
        for (name, value) in collapsed {
            match array_index(&name) {
                Some(index) => indexed.push((index, name, value)),
                None => named.push((name, value)),
            }
        }
        indexed.sort_by_key(|(index, _, _)| *index);

        indexed
            .into_iter()
            .map(|(_, name, value)| (name, value))
            .chain(named)
            .collect()
    }

    /// JSON text of [`FormFields::to_payload`], as sent in the request body.
    pub fn to_json_body(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.to_payload())
    }
}

/// Canonical decimal below 2^32 - 1, the range engines order as indices.
fn array_index(name: &str) -> Option<u32> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if name.len() > 1 && name.starts_with('0') {
        return None;
    }
    name.parse::<u32>().ok().filter(|index| *index != u32::MAX)
}

impl<K, V> FromIterator<(K, V)> for FormFields
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = FormFields::new();
        for (name, value) in iter {
            fields.push(name, value);
        }
        fields
    }
}

//! Extraction result types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Value recognized for a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Scalar text value.
    Text(String),
    /// Sub-record built from several capture groups (e.g. `{plate, year}`).
    Record(BTreeMap<String, String>),
    /// Field looked for but not found. Serializes as `null`.
    Absent,
}

impl FieldValue {
    /// Build a text value.
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Build a sub-record from `(sub_key, value)` pairs.
    pub fn record<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        FieldValue::Record(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            FieldValue::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Look up a sub-value of a record.
    pub fn part(&self, sub_key: &str) -> Option<&str> {
        self.as_record()
            .and_then(|r| r.get(sub_key))
            .map(String::as_str)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }
}

/// Structured record produced by a document extractor.
///
/// Keys are drawn from the extractor's declared key set. The record is
/// built once per call and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractionResult {
    fields: BTreeMap<String, FieldValue>,
}

impl ExtractionResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, key: &str, value: FieldValue) {
        self.fields.insert(key.to_string(), value);
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.fields.remove(key)
    }

    /// Get the value stored for `key`, if the key is present.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Get a scalar text value.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_text)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of keys holding an actual value.
    pub fn found_count(&self) -> usize {
        self.fields.values().filter(|v| !v.is_absent()).count()
    }
}

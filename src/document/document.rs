//! In-memory structured documents
//!
//! A document is an insertion-ordered sequence of named fields. Lookup by
//! dotted path descends through nested documents and arrays, which is how
//! compiled filters address nested fields.

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::value::FieldValue;

/// An insertion-ordered structured document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    fields: Vec<(String, FieldValue)>,
}

impl Document {
    /// Creates an empty document
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Returns the number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the document has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Appends a field
    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) {
        self.fields.push((key.into(), value));
    }

    /// Returns the first field with the given key
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Iterates fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Resolves a dotted path, descending into nested documents and arrays.
    ///
    /// Array segments must parse as a decimal index ("items.0.name").
    /// Returns `None` for a missing field, a non-container intermediate,
    /// or an empty path.
    pub fn find_descendant(&self, path: &str) -> Option<&FieldValue> {
        let mut segments = path.split('.');
        let mut current = self.get(segments.next()?)?;

        for segment in segments {
            current = match current {
                FieldValue::Document(doc) => doc.get(segment)?,
                FieldValue::Array(items) => {
                    let index: usize = segment.parse().ok()?;
                    items.get(index)?
                }
                _ => return None,
            };
        }

        Some(current)
    }

    /// Builds a document from a JSON object; returns `None` for non-objects
    pub fn from_json(value: &serde_json::Value) -> Option<Document> {
        match FieldValue::from_json(value) {
            FieldValue::Document(doc) => Some(doc),
            _ => None,
        }
    }

    /// Converts this document into a JSON object
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

//! Typed field values and runtime type tags
//!
//! Documents carry typed scalars so comparisons can distinguish the
//! numeric widths (int32/int64/double) that JSON alone flattens.

use serde::ser::{Serialize, SerializeSeq, Serializer};

use super::document::Document;

/// Runtime type tag for a document field value
///
/// Codes follow the BSON element type bytes so compiled `$type` checks
/// stay interchangeable with wire-format consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Double,
    Utf8,
    Document,
    Array,
    Undefined,
    Bool,
    Null,
    Int32,
    Int64,
}

impl ScalarType {
    /// Returns the wire type code for this tag
    pub fn code(&self) -> i32 {
        match self {
            ScalarType::Double => 0x01,
            ScalarType::Utf8 => 0x02,
            ScalarType::Document => 0x03,
            ScalarType::Array => 0x04,
            ScalarType::Undefined => 0x06,
            ScalarType::Bool => 0x08,
            ScalarType::Null => 0x0A,
            ScalarType::Int32 => 0x10,
            ScalarType::Int64 => 0x12,
        }
    }

    /// Maps a wire type code back to a tag
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0x01 => Some(ScalarType::Double),
            0x02 => Some(ScalarType::Utf8),
            0x03 => Some(ScalarType::Document),
            0x04 => Some(ScalarType::Array),
            0x06 => Some(ScalarType::Undefined),
            0x08 => Some(ScalarType::Bool),
            0x0A => Some(ScalarType::Null),
            0x10 => Some(ScalarType::Int32),
            0x12 => Some(ScalarType::Int64),
            _ => None,
        }
    }

    /// Returns the string representation (used in diagnostics)
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarType::Double => "double",
            ScalarType::Utf8 => "utf8",
            ScalarType::Document => "document",
            ScalarType::Array => "array",
            ScalarType::Undefined => "undefined",
            ScalarType::Bool => "bool",
            ScalarType::Null => "null",
            ScalarType::Int32 => "int32",
            ScalarType::Int64 => "int64",
        }
    }
}

/// A single document field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Double(f64),
    Utf8(String),
    Document(Document),
    Array(Vec<FieldValue>),
    Undefined,
    Bool(bool),
    Null,
    Int32(i32),
    Int64(i64),
}

impl FieldValue {
    /// Returns the runtime type tag of this value
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            FieldValue::Double(_) => ScalarType::Double,
            FieldValue::Utf8(_) => ScalarType::Utf8,
            FieldValue::Document(_) => ScalarType::Document,
            FieldValue::Array(_) => ScalarType::Array,
            FieldValue::Undefined => ScalarType::Undefined,
            FieldValue::Bool(_) => ScalarType::Bool,
            FieldValue::Null => ScalarType::Null,
            FieldValue::Int32(_) => ScalarType::Int32,
            FieldValue::Int64(_) => ScalarType::Int64,
        }
    }

    /// Extracts a double, if this value is one
    pub fn as_double(&self) -> Option<f64> {
        match self {
            FieldValue::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Extracts a 32-bit integer, if this value is one
    pub fn as_int32(&self) -> Option<i32> {
        match self {
            FieldValue::Int32(v) => Some(*v),
            _ => None,
        }
    }

    /// Extracts a 64-bit integer, if this value is one
    pub fn as_int64(&self) -> Option<i64> {
        match self {
            FieldValue::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Extracts a boolean, if this value is one
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Extracts a UTF-8 string slice, if this value is one
    pub fn as_utf8(&self) -> Option<&str> {
        match self {
            FieldValue::Utf8(v) => Some(v),
            _ => None,
        }
    }

    /// Converts a JSON value into a typed field value.
    ///
    /// Integral JSON numbers become `Int64`, everything else numeric
    /// becomes `Double`. JSON has no `undefined`, so that tag only
    /// appears in documents built by hand.
    pub fn from_json(value: &serde_json::Value) -> FieldValue {
        match value {
            serde_json::Value::Null => FieldValue::Null,
            serde_json::Value::Bool(b) => FieldValue::Bool(*b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(FieldValue::Int64)
                .or_else(|| n.as_f64().map(FieldValue::Double))
                .unwrap_or(FieldValue::Null),
            serde_json::Value::String(s) => FieldValue::Utf8(s.clone()),
            serde_json::Value::Array(items) => {
                FieldValue::Array(items.iter().map(FieldValue::from_json).collect())
            }
            serde_json::Value::Object(map) => {
                let mut doc = Document::new();
                for (key, item) in map {
                    doc.insert(key, FieldValue::from_json(item));
                }
                FieldValue::Document(doc)
            }
        }
    }

    /// Converts this value into JSON (undefined collapses to null)
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Double(v) => serializer.serialize_f64(*v),
            FieldValue::Utf8(v) => serializer.serialize_str(v),
            FieldValue::Document(doc) => doc.serialize(serializer),
            FieldValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            FieldValue::Undefined | FieldValue::Null => serializer.serialize_unit(),
            FieldValue::Bool(v) => serializer.serialize_bool(*v),
            FieldValue::Int32(v) => serializer.serialize_i32(*v),
            FieldValue::Int64(v) => serializer.serialize_i64(*v),
        }
    }
}

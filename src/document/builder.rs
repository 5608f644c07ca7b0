//! Output document construction
//!
//! Builder primitives for assembling a document incrementally: scalar
//! appends plus begin/end pairs for nested documents and arrays. Filter
//! rendering drives this to reconstruct filter-shaped output.

use super::document::Document;
use super::value::FieldValue;

enum Frame {
    Doc { key: String, doc: Document },
    Arr { key: String, items: Vec<FieldValue> },
}

/// Incrementally builds a [`Document`]
///
/// Array frames assign slots positionally; the key passed while an array
/// is open is ignored, so callers may address slots by index string.
/// Begin/end calls must balance; `finish` closes any frames left open.
#[derive(Default)]
pub struct DocumentBuilder {
    root: Document,
    frames: Vec<Frame>,
}

impl DocumentBuilder {
    /// Creates a builder with an empty root document
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value to the innermost open container
    pub fn append(&mut self, key: &str, value: FieldValue) {
        match self.frames.last_mut() {
            Some(Frame::Doc { doc, .. }) => doc.insert(key, value),
            Some(Frame::Arr { items, .. }) => items.push(value),
            None => self.root.insert(key, value),
        }
    }

    /// Opens a nested document under the given key
    pub fn begin_document(&mut self, key: &str) {
        self.frames.push(Frame::Doc {
            key: key.to_string(),
            doc: Document::new(),
        });
    }

    /// Closes the innermost open document
    pub fn end_document(&mut self) {
        match self.frames.pop() {
            Some(Frame::Doc { key, doc }) => self.append(&key, FieldValue::Document(doc)),
            other => {
                debug_assert!(false, "end_document without matching begin_document");
                if let Some(frame) = other {
                    self.frames.push(frame);
                }
            }
        }
    }

    /// Opens a nested array under the given key
    pub fn begin_array(&mut self, key: &str) {
        self.frames.push(Frame::Arr {
            key: key.to_string(),
            items: Vec::new(),
        });
    }

    /// Closes the innermost open array
    pub fn end_array(&mut self) {
        match self.frames.pop() {
            Some(Frame::Arr { key, items }) => self.append(&key, FieldValue::Array(items)),
            other => {
                debug_assert!(false, "end_array without matching begin_array");
                if let Some(frame) = other {
                    self.frames.push(frame);
                }
            }
        }
    }

    /// Consumes the builder, closing any open frames, and returns the document
    pub fn finish(mut self) -> Document {
        while let Some(frame) = self.frames.pop() {
            match frame {
                Frame::Doc { key, doc } => self.append(&key, FieldValue::Document(doc)),
                Frame::Arr { key, items } => self.append(&key, FieldValue::Array(items)),
            }
        }
        self.root
    }
}

//! Filter rendering
//!
//! Reconstructs a filter-shaped document from a compiled tree for
//! logging and introspection. The output is an approximation of the
//! original filter, not a byte-identical round trip.

use crate::document::{Document, DocumentBuilder, FieldValue};

use super::ops::{CompareOp, CompareOpcode, MatcherOp};

impl MatcherOp {
    /// Appends this node's filter-syntax form to the builder
    pub fn render(&self, builder: &mut DocumentBuilder) {
        match self {
            MatcherOp::Exists { expects, .. } => {
                builder.append("$exists", FieldValue::Bool(*expects));
            }
            MatcherOp::Type { expected, .. } => {
                builder.append("$type", FieldValue::Int32(expected.code()));
            }
            MatcherOp::Compare(compare) => compare.render(builder),
            MatcherOp::Not { path, child } => {
                builder.begin_document(path);
                builder.begin_document("$not");
                child.render(builder);
                builder.end_document();
                builder.end_document();
            }
            MatcherOp::Logical {
                opcode,
                left,
                right,
            } => {
                builder.begin_array(opcode.op_name());
                builder.begin_document("0");
                left.render(builder);
                builder.end_document();
                if let Some(right) = right {
                    builder.begin_document("1");
                    right.render(builder);
                    builder.end_document();
                }
                builder.end_array();
            }
        }
    }

    /// Renders this tree as a standalone filter document
    pub fn to_document(&self) -> Document {
        let mut builder = DocumentBuilder::new();
        self.render(&mut builder);
        builder.finish()
    }
}

impl CompareOp {
    fn render(&self, builder: &mut DocumentBuilder) {
        match self.opcode {
            // Equality renders as a bare field-value pair
            CompareOpcode::Eq => builder.append(&self.path, self.operand.clone()),
            _ => {
                builder.begin_document(&self.path);
                builder.append(self.opcode.op_name(), self.operand.clone());
                builder.end_document();
            }
        }
    }
}

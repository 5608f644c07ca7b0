//! Operator tree data model and construction
//!
//! A compiled filter is a strict forest of operator nodes: comparison
//! leaves holding an owned operand, existence/type leaves, and logical
//! or negation composites owning their children. Nodes are built
//! bottom-up and never mutated afterwards; teardown is ownership-driven.

use crate::document::{FieldValue, ScalarType};

use super::errors::{MatcherError, MatcherResult};

/// Comparison operator discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOpcode {
    Eq,
    Gt,
    Gte,
    In,
    Lt,
    Lte,
    Ne,
    Nin,
}

impl CompareOpcode {
    /// Returns the filter-syntax tag for this operator
    pub fn op_name(&self) -> &'static str {
        match self {
            CompareOpcode::Eq => "$eq",
            CompareOpcode::Gt => "$gt",
            CompareOpcode::Gte => "$gte",
            CompareOpcode::In => "$in",
            CompareOpcode::Lt => "$lt",
            CompareOpcode::Lte => "$lte",
            CompareOpcode::Ne => "$ne",
            CompareOpcode::Nin => "$nin",
        }
    }
}

/// Logical operator discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOpcode {
    Or,
    And,
    Nor,
}

impl LogicalOpcode {
    /// Returns the filter-syntax tag for this operator
    pub fn op_name(&self) -> &'static str {
        match self {
            LogicalOpcode::Or => "$or",
            LogicalOpcode::And => "$and",
            LogicalOpcode::Nor => "$nor",
        }
    }
}

/// A comparison leaf: `{path: {"$op": operand}}`
///
/// The operand is an owned copy of the filter-side value; it never
/// aliases the document being matched.
#[derive(Debug, Clone, PartialEq)]
pub struct CompareOp {
    pub(crate) opcode: CompareOpcode,
    pub(crate) path: String,
    pub(crate) operand: FieldValue,
}

impl CompareOp {
    /// Returns the comparison opcode
    pub fn opcode(&self) -> CompareOpcode {
        self.opcode
    }

    /// Returns the field path this comparison addresses
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the stored operand
    pub fn operand(&self) -> &FieldValue {
        &self.operand
    }
}

/// One node of a compiled filter tree
#[derive(Debug, Clone, PartialEq)]
pub enum MatcherOp {
    /// `{path: {"$exists": bool}}`
    Exists { path: String, expects: bool },
    /// `{path: {"$type": code}}`
    Type { path: String, expected: ScalarType },
    /// Comparison leaf (`$eq`/`$gt`/.../`$nin`)
    Compare(CompareOp),
    /// `{path: {"$not": child}}`
    Not { path: String, child: Box<MatcherOp> },
    /// `{"$or"/"$and"/"$nor": [left, right]}`
    ///
    /// `right` is absent only for a singleton logical; evaluation treats
    /// the missing arm as not matching.
    Logical {
        opcode: LogicalOpcode,
        left: Box<MatcherOp>,
        right: Option<Box<MatcherOp>>,
    },
}

fn validated_path(path: impl Into<String>) -> MatcherResult<String> {
    let path = path.into();
    if path.is_empty() {
        return Err(MatcherError::EmptyPath);
    }
    Ok(path)
}

impl MatcherOp {
    /// Builds an `{$exists: bool}` check
    pub fn exists(path: impl Into<String>, expects: bool) -> MatcherResult<Self> {
        Ok(MatcherOp::Exists {
            path: validated_path(path)?,
            expects,
        })
    }

    /// Builds a `{$type: tag}` check
    pub fn type_check(path: impl Into<String>, expected: ScalarType) -> MatcherResult<Self> {
        Ok(MatcherOp::Type {
            path: validated_path(path)?,
            expected,
        })
    }

    /// Builds a `{$type: code}` check from a wire type code
    pub fn type_check_code(path: impl Into<String>, code: i32) -> MatcherResult<Self> {
        let expected =
            ScalarType::from_code(code).ok_or(MatcherError::UnknownTypeCode(code))?;
        Self::type_check(path, expected)
    }

    /// Builds a comparison leaf; the operand is stored by value
    pub fn compare(
        opcode: CompareOpcode,
        path: impl Into<String>,
        operand: FieldValue,
    ) -> MatcherResult<Self> {
        Ok(MatcherOp::Compare(CompareOp {
            opcode,
            path: validated_path(path)?,
            operand,
        }))
    }

    /// Builds a `{$not: child}` negation
    pub fn not(path: impl Into<String>, child: MatcherOp) -> MatcherResult<Self> {
        Ok(MatcherOp::Not {
            path: validated_path(path)?,
            child: Box::new(child),
        })
    }

    /// Builds a logical composite; `right` may be absent for a singleton
    pub fn logical(opcode: LogicalOpcode, left: MatcherOp, right: Option<MatcherOp>) -> Self {
        MatcherOp::Logical {
            opcode,
            left: Box::new(left),
            right: right.map(Box::new),
        }
    }
}

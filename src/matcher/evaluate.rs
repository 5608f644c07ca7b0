//! Filter evaluation
//!
//! Recursive `matches` over the operator tree. Comparisons resolve the
//! field by descendant lookup, then run the cross-type coercion matrix:
//! numeric pairs promote to the wider native domain, strings compare by
//! exact bytes, null equals null/undefined, and every other pairing is
//! conservatively "does not match" with a WARN diagnostic.

use std::cmp::Ordering;

use crate::document::{Document, FieldValue};
use crate::observability::Logger;

use super::ops::{CompareOp, CompareOpcode, LogicalOpcode, MatcherOp};

impl MatcherOp {
    /// Returns true if the document satisfies this filter node.
    ///
    /// Never panics on structurally valid input; comparisons the matrix
    /// does not define evaluate as non-matching.
    pub fn matches(&self, document: &Document) -> bool {
        match self {
            MatcherOp::Exists { path, expects } => {
                document.find_descendant(path).is_some() == *expects
            }
            MatcherOp::Type { path, expected } => document
                .find_descendant(path)
                .map(|value| value.scalar_type() == *expected)
                .unwrap_or(false),
            MatcherOp::Compare(compare) => compare.matches(document),
            MatcherOp::Not { child, .. } => !child.matches(document),
            MatcherOp::Logical {
                opcode,
                left,
                right,
            } => {
                let left = left.matches(document);
                let right = right
                    .as_ref()
                    .map(|op| op.matches(document))
                    .unwrap_or(false);
                match opcode {
                    LogicalOpcode::Or => left || right,
                    LogicalOpcode::And => left && right,
                    LogicalOpcode::Nor => !(left || right),
                }
            }
        }
    }
}

impl CompareOp {
    pub(crate) fn matches(&self, document: &Document) -> bool {
        let field = match document.find_descendant(&self.path) {
            Some(value) => value,
            // Absent fields fail every comparison; the negated forms
            // ($ne, $nin) therefore succeed.
            None => return matches!(self.opcode, CompareOpcode::Ne | CompareOpcode::Nin),
        };

        match self.opcode {
            CompareOpcode::Eq => eq_match(&self.operand, field),
            CompareOpcode::Ne => !eq_match(&self.operand, field),
            CompareOpcode::Gt => gt_match(&self.operand, field),
            CompareOpcode::Gte => gte_match(&self.operand, field),
            CompareOpcode::Lt => lt_match(&self.operand, field),
            CompareOpcode::Lte => lte_match(&self.operand, field),
            CompareOpcode::In => in_match(&self.operand, field),
            CompareOpcode::Nin => !in_match(&self.operand, field),
        }
    }
}

/// A numeric (operand, field) pair promoted to a common native domain
///
/// Any double on either side widens both to f64; otherwise both sides
/// (bool counting as 0/1) compare as i64.
enum NumericPair {
    Float { field: f64, operand: f64 },
    Int { field: i64, operand: i64 },
}

enum Num {
    Float(f64),
    Int(i64),
}

impl Num {
    fn widen(self) -> f64 {
        match self {
            Num::Float(v) => v,
            Num::Int(v) => v as f64,
        }
    }
}

/// Numeric view of a filter operand; bools are not numeric on this side
fn operand_num(value: &FieldValue) -> Option<Num> {
    match value {
        FieldValue::Double(v) => Some(Num::Float(*v)),
        FieldValue::Int32(v) => Some(Num::Int(i64::from(*v))),
        FieldValue::Int64(v) => Some(Num::Int(*v)),
        _ => None,
    }
}

/// Numeric view of a document field; bools coerce to 0/1
fn field_num(value: &FieldValue) -> Option<Num> {
    match value {
        FieldValue::Bool(v) => Some(Num::Int(i64::from(*v))),
        _ => operand_num(value),
    }
}

impl NumericPair {
    fn promote(operand: &FieldValue, field: &FieldValue) -> Option<Self> {
        let operand = operand_num(operand)?;
        let field = field_num(field)?;
        Some(match (field, operand) {
            (Num::Int(field), Num::Int(operand)) => NumericPair::Int { field, operand },
            (field, operand) => NumericPair::Float {
                field: field.widen(),
                operand: operand.widen(),
            },
        })
    }

    /// Orders the document field relative to the operand
    fn field_cmp_operand(&self) -> Option<Ordering> {
        match self {
            NumericPair::Float { field, operand } => field.partial_cmp(operand),
            NumericPair::Int { field, operand } => Some(field.cmp(operand)),
        }
    }
}

/// Coercion equality between a filter operand and a document field
fn eq_match(operand: &FieldValue, field: &FieldValue) -> bool {
    match (operand, field) {
        (FieldValue::Utf8(left), FieldValue::Utf8(right)) => {
            left.len() == right.len() && left.as_bytes() == right.as_bytes()
        }
        (FieldValue::Null, FieldValue::Null) | (FieldValue::Null, FieldValue::Undefined) => true,
        _ => match NumericPair::promote(operand, field) {
            Some(pair) => pair.field_cmp_operand() == Some(Ordering::Equal),
            None => false,
        },
    }
}

/// Coercion ordering of the field relative to the operand.
///
/// `None` means the pairing has no defined ordering; an undefined type
/// pairing is logged, an incomparable value (NaN) is not.
fn field_ordering(op: CompareOpcode, operand: &FieldValue, field: &FieldValue) -> Option<Ordering> {
    match NumericPair::promote(operand, field) {
        Some(pair) => pair.field_cmp_operand(),
        None => {
            Logger::warn(
                "UNSUPPORTED_COMPARISON",
                &[
                    ("op", op.op_name()),
                    ("operand_type", operand.scalar_type().as_str()),
                    ("field_type", field.scalar_type().as_str()),
                ],
            );
            None
        }
    }
}

fn gt_match(operand: &FieldValue, field: &FieldValue) -> bool {
    field_ordering(CompareOpcode::Gt, operand, field) == Some(Ordering::Greater)
}

fn gte_match(operand: &FieldValue, field: &FieldValue) -> bool {
    matches!(
        field_ordering(CompareOpcode::Gte, operand, field),
        Some(Ordering::Greater | Ordering::Equal)
    )
}

fn lt_match(operand: &FieldValue, field: &FieldValue) -> bool {
    field_ordering(CompareOpcode::Lt, operand, field) == Some(Ordering::Less)
}

fn lte_match(operand: &FieldValue, field: &FieldValue) -> bool {
    matches!(
        field_ordering(CompareOpcode::Lte, operand, field),
        Some(Ordering::Less | Ordering::Equal)
    )
}

/// Array membership is not implemented yet; every `$in` reports false
/// (and `$nin`, its negation, true) so callers get a deterministic,
/// detectable result instead of a partial one.
fn in_match(_operand: &FieldValue, _field: &FieldValue) -> bool {
    Logger::warn("UNIMPLEMENTED_OPERATOR", &[("op", "$in")]);
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        Document::from_json(&value).unwrap()
    }

    fn compare(op: CompareOpcode, path: &str, operand: FieldValue) -> MatcherOp {
        MatcherOp::compare(op, path, operand).unwrap()
    }

    #[test]
    fn test_exists_both_polarities() {
        let d = doc(json!({"a": 1}));
        assert!(MatcherOp::exists("a", true).unwrap().matches(&d));
        assert!(!MatcherOp::exists("a", false).unwrap().matches(&d));
        assert!(!MatcherOp::exists("b", true).unwrap().matches(&d));
        assert!(MatcherOp::exists("b", false).unwrap().matches(&d));
    }

    #[test]
    fn test_type_check() {
        use crate::document::ScalarType;
        let d = doc(json!({"a": "x", "n": 1}));
        assert!(MatcherOp::type_check("a", ScalarType::Utf8).unwrap().matches(&d));
        assert!(!MatcherOp::type_check("a", ScalarType::Int64).unwrap().matches(&d));
        assert!(MatcherOp::type_check("n", ScalarType::Int64).unwrap().matches(&d));
        // Absent field never type-matches
        assert!(!MatcherOp::type_check("z", ScalarType::Null).unwrap().matches(&d));
    }

    #[test]
    fn test_numeric_eq_promotes_across_widths() {
        let d = doc(json!({"a": 5.0, "b": 5, "t": true}));
        assert!(compare(CompareOpcode::Eq, "a", FieldValue::Int32(5)).matches(&d));
        assert!(compare(CompareOpcode::Eq, "a", FieldValue::Int64(5)).matches(&d));
        assert!(compare(CompareOpcode::Eq, "b", FieldValue::Double(5.0)).matches(&d));
        assert!(compare(CompareOpcode::Eq, "b", FieldValue::Int32(5)).matches(&d));
        // Bool field coerces to 1 against numeric operands
        assert!(compare(CompareOpcode::Eq, "t", FieldValue::Int32(1)).matches(&d));
        assert!(compare(CompareOpcode::Eq, "t", FieldValue::Double(1.0)).matches(&d));
        assert!(!compare(CompareOpcode::Eq, "t", FieldValue::Int64(0)).matches(&d));
    }

    #[test]
    fn test_bool_operand_is_unsupported() {
        // The matrix defines bools on the document side only
        let d = doc(json!({"t": true}));
        assert!(!compare(CompareOpcode::Eq, "t", FieldValue::Bool(true)).matches(&d));
        assert!(compare(CompareOpcode::Ne, "t", FieldValue::Bool(true)).matches(&d));
    }

    #[test]
    fn test_ordering_is_field_relative() {
        // {a: {$gt: 3}} asks whether the field exceeds 3
        let d = doc(json!({"a": 10}));
        assert!(compare(CompareOpcode::Gt, "a", FieldValue::Int32(3)).matches(&d));
        assert!(!compare(CompareOpcode::Gt, "a", FieldValue::Int32(10)).matches(&d));
        assert!(!compare(CompareOpcode::Gt, "a", FieldValue::Int32(11)).matches(&d));
        assert!(compare(CompareOpcode::Gte, "a", FieldValue::Int64(10)).matches(&d));
        assert!(compare(CompareOpcode::Lt, "a", FieldValue::Double(10.5)).matches(&d));
        assert!(!compare(CompareOpcode::Lt, "a", FieldValue::Int32(10)).matches(&d));
        assert!(compare(CompareOpcode::Lte, "a", FieldValue::Int32(10)).matches(&d));
        assert!(!compare(CompareOpcode::Lte, "a", FieldValue::Int32(9)).matches(&d));
    }

    #[test]
    fn test_int64_int32_compare_without_precision_loss() {
        let big = (1_i64 << 60) + 1;
        let mut d = Document::new();
        d.insert("a", FieldValue::Int64(big));
        // An f64 detour would collapse big and big+1; i64 promotion must not
        assert!(compare(CompareOpcode::Gt, "a", FieldValue::Int64(big - 1)).matches(&d));
        assert!(!compare(CompareOpcode::Gt, "a", FieldValue::Int64(big)).matches(&d));
        assert!(compare(CompareOpcode::Eq, "a", FieldValue::Int64(big)).matches(&d));
    }

    #[test]
    fn test_string_equality_exact_bytes() {
        let d = doc(json!({"s": "ab"}));
        assert!(compare(CompareOpcode::Eq, "s", FieldValue::Utf8("ab".into())).matches(&d));
        assert!(!compare(CompareOpcode::Eq, "s", FieldValue::Utf8("abc".into())).matches(&d));
        assert!(!compare(CompareOpcode::Eq, "s", FieldValue::Utf8("aB".into())).matches(&d));
    }

    #[test]
    fn test_null_matches_null_and_undefined() {
        let mut d = Document::new();
        d.insert("n", FieldValue::Null);
        d.insert("u", FieldValue::Undefined);
        assert!(compare(CompareOpcode::Eq, "n", FieldValue::Null).matches(&d));
        assert!(compare(CompareOpcode::Eq, "u", FieldValue::Null).matches(&d));
        // No ordering over null-likes
        assert!(!compare(CompareOpcode::Gt, "n", FieldValue::Null).matches(&d));
        assert!(!compare(CompareOpcode::Lte, "u", FieldValue::Null).matches(&d));
    }

    #[test]
    fn test_unsupported_pairing_is_conservative() {
        let d = doc(json!({"s": "5"}));
        // String field vs numeric operand: present but incomparable
        assert!(!compare(CompareOpcode::Eq, "s", FieldValue::Int32(5)).matches(&d));
        assert!(compare(CompareOpcode::Ne, "s", FieldValue::Int32(5)).matches(&d));
        assert!(!compare(CompareOpcode::Gt, "s", FieldValue::Int32(5)).matches(&d));
        assert!(!compare(CompareOpcode::Lt, "s", FieldValue::Int32(5)).matches(&d));
    }

    #[test]
    fn test_absent_field_policy() {
        let d = doc(json!({"a": 1}));
        let operand = || FieldValue::Int32(1);
        assert!(!compare(CompareOpcode::Eq, "z", operand()).matches(&d));
        assert!(!compare(CompareOpcode::Gt, "z", operand()).matches(&d));
        assert!(!compare(CompareOpcode::Gte, "z", operand()).matches(&d));
        assert!(!compare(CompareOpcode::Lt, "z", operand()).matches(&d));
        assert!(!compare(CompareOpcode::Lte, "z", operand()).matches(&d));
        assert!(!compare(CompareOpcode::In, "z", operand()).matches(&d));
        assert!(compare(CompareOpcode::Ne, "z", operand()).matches(&d));
        assert!(compare(CompareOpcode::Nin, "z", operand()).matches(&d));
    }

    #[test]
    fn test_in_nin_stub() {
        let d = doc(json!({"a": 1}));
        let candidates = FieldValue::Array(vec![FieldValue::Int64(1), FieldValue::Int64(2)]);
        assert!(!compare(CompareOpcode::In, "a", candidates.clone()).matches(&d));
        assert!(compare(CompareOpcode::Nin, "a", candidates).matches(&d));
    }

    #[test]
    fn test_logical_truth_tables() {
        let d = doc(json!({"a": 1}));
        let yes = || MatcherOp::exists("a", true).unwrap();
        let no = || MatcherOp::exists("z", true).unwrap();

        assert!(MatcherOp::logical(LogicalOpcode::Or, yes(), Some(no())).matches(&d));
        assert!(MatcherOp::logical(LogicalOpcode::Or, no(), Some(yes())).matches(&d));
        assert!(!MatcherOp::logical(LogicalOpcode::Or, no(), Some(no())).matches(&d));

        assert!(MatcherOp::logical(LogicalOpcode::And, yes(), Some(yes())).matches(&d));
        assert!(!MatcherOp::logical(LogicalOpcode::And, yes(), Some(no())).matches(&d));

        assert!(MatcherOp::logical(LogicalOpcode::Nor, no(), Some(no())).matches(&d));
        assert!(!MatcherOp::logical(LogicalOpcode::Nor, yes(), Some(no())).matches(&d));
    }

    #[test]
    fn test_singleton_logical_arm() {
        let d = doc(json!({"a": 1}));
        let yes = || MatcherOp::exists("a", true).unwrap();
        assert!(MatcherOp::logical(LogicalOpcode::Or, yes(), None).matches(&d));
        assert!(!MatcherOp::logical(LogicalOpcode::Nor, yes(), None).matches(&d));
    }

    #[test]
    fn test_not_negates_child() {
        let d = doc(json!({"a": 5}));
        let inner = compare(CompareOpcode::Gt, "a", FieldValue::Int32(3));
        assert!(inner.matches(&d));
        assert!(!MatcherOp::not("a", inner).unwrap().matches(&d));
    }

    #[test]
    fn test_nested_path_comparison() {
        let d = doc(json!({"a": {"b": {"c": 7}}}));
        assert!(compare(CompareOpcode::Eq, "a.b.c", FieldValue::Int32(7)).matches(&d));
        assert!(compare(CompareOpcode::Gt, "a.b.c", FieldValue::Double(6.5)).matches(&d));
        assert!(!compare(CompareOpcode::Eq, "a.b.x", FieldValue::Int32(7)).matches(&d));
    }

    #[test]
    fn test_nan_field_never_orders() {
        let mut d = Document::new();
        d.insert("a", FieldValue::Double(f64::NAN));
        assert!(!compare(CompareOpcode::Gt, "a", FieldValue::Int32(0)).matches(&d));
        assert!(!compare(CompareOpcode::Lt, "a", FieldValue::Int32(0)).matches(&d));
        assert!(!compare(CompareOpcode::Eq, "a", FieldValue::Double(f64::NAN)).matches(&d));
    }
}

//! Rule AST evaluation against field records
//!
//! Evaluation is a plain recursive tree walk. Verdict-only outcomes and
//! errors are kept apart deliberately: a missing record field or a
//! number-versus-text pairing is `false`, never an error, while a malformed
//! tree always fails before any comparison runs.

use crate::ast::{AstNode, ComparisonOp, Condition, LogicalOp};
use crate::error::Result;
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// The flat field-to-value mapping a rule is evaluated against
pub type Record = Map<String, Value>;

/// Evaluate a transport-form AST against a record.
///
/// Accepts both historical operator-node shapes (`"value"`- and
/// `"operator"`-keyed); [`AstNode::from_value`] normalizes them and rejects
/// malformed trees. The whole tree is validated before any comparison runs,
/// so a malformed subtree fails the call even when the other child of an
/// `AND`/`OR` already decides the verdict.
pub fn evaluate(ast: &Value, record: &Record) -> Result<bool> {
    let node = AstNode::from_value(ast)?;
    Ok(check(&node, record))
}

/// Evaluate a typed AST against a record.
///
/// Both children of an operator node are computed before the verdicts are
/// joined; there is no short-circuiting.
pub fn check(node: &AstNode, record: &Record) -> bool {
    match node {
        AstNode::Operator { op, left, right } => {
            let left = check(left, record);
            let right = check(right, record);
            match op {
                LogicalOp::And => left && right,
                LogicalOp::Or => left || right,
            }
        }
        AstNode::Operand { condition } => check_condition(condition, record),
    }
}

/// Scalar view of a value after coercion
#[derive(Debug, Clone, PartialEq)]
enum Scalar {
    Int(i64),
    Real(f64),
    Text(String),
    /// Arrays, objects and the like: equal to nothing, ordered with nothing
    Opaque,
}

fn check_condition(condition: &Condition, record: &Record) -> bool {
    let raw = match record.get(&condition.field) {
        None | Some(Value::Null) => return false,
        Some(value) => value,
    };

    let mut record_side = coerce(raw);
    let mut rule_side = coerce_text(&condition.value);

    // Text comparison is case-insensitive, keyed off the record side staying
    // text after coercion; numeric comparisons are unaffected.
    if let Scalar::Text(text) = &record_side {
        let lowered = text.to_lowercase();
        if let Scalar::Text(literal) = &rule_side {
            rule_side = Scalar::Text(literal.to_lowercase());
        }
        record_side = Scalar::Text(lowered);
    }

    compare(condition.operator, &record_side, &rule_side)
}

/// Coerce a record value to a scalar.
fn coerce(value: &Value) -> Scalar {
    match value {
        Value::String(text) => coerce_text(text),
        Value::Number(number) => number
            .as_i64()
            .map(Scalar::Int)
            .or_else(|| number.as_f64().map(Scalar::Real))
            .unwrap_or(Scalar::Opaque),
        // Booleans compare as the integers 0/1
        Value::Bool(flag) => Scalar::Int(i64::from(*flag)),
        _ => Scalar::Opaque,
    }
}

/// Coerce literal text: a `.` selects real-number parsing, anything else is
/// tried as an integer; a failed parse keeps the original text. Never errors.
fn coerce_text(text: &str) -> Scalar {
    if text.contains('.') {
        text.parse::<f64>()
            .map(Scalar::Real)
            .unwrap_or_else(|_| Scalar::Text(text.to_string()))
    } else {
        text.parse::<i64>()
            .map(Scalar::Int)
            .unwrap_or_else(|_| Scalar::Text(text.to_string()))
    }
}

fn compare(operator: ComparisonOp, record_side: &Scalar, rule_side: &Scalar) -> bool {
    match operator {
        ComparisonOp::Equal | ComparisonOp::EqualAlias => scalar_eq(record_side, rule_side),
        ComparisonOp::NotEqual => !scalar_eq(record_side, rule_side),
        ComparisonOp::Greater => scalar_cmp(record_side, rule_side) == Some(Ordering::Greater),
        ComparisonOp::Less => scalar_cmp(record_side, rule_side) == Some(Ordering::Less),
        ComparisonOp::GreaterEqual => matches!(
            scalar_cmp(record_side, rule_side),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        ComparisonOp::LessEqual => matches!(
            scalar_cmp(record_side, rule_side),
            Some(Ordering::Less | Ordering::Equal)
        ),
    }
}

/// Equality across number variants goes through f64; number-versus-text and
/// opaque pairings are simply not equal (so `!=` on them is true).
fn scalar_eq(a: &Scalar, b: &Scalar) -> bool {
    match (a, b) {
        (Scalar::Int(a), Scalar::Int(b)) => a == b,
        (Scalar::Int(a), Scalar::Real(b)) => (*a as f64) == *b,
        (Scalar::Real(a), Scalar::Int(b)) => *a == (*b as f64),
        (Scalar::Real(a), Scalar::Real(b)) => a == b,
        (Scalar::Text(a), Scalar::Text(b)) => a == b,
        _ => false,
    }
}

/// Ordering exists within numbers and within text; mixed pairings are
/// incomparable and every ordering comparison on them is false.
fn scalar_cmp(a: &Scalar, b: &Scalar) -> Option<Ordering> {
    match (a, b) {
        (Scalar::Int(a), Scalar::Int(b)) => Some(a.cmp(b)),
        (Scalar::Int(a), Scalar::Real(b)) => (*a as f64).partial_cmp(b),
        (Scalar::Real(a), Scalar::Int(b)) => a.partial_cmp(&(*b as f64)),
        (Scalar::Real(a), Scalar::Real(b)) => a.partial_cmp(b),
        (Scalar::Text(a), Scalar::Text(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

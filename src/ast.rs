//! Abstract syntax tree for eligibility rules
//!
//! The tree is strictly binary: internal nodes carry a logical connective
//! with exactly two children, leaves carry one field comparison. Nodes are
//! never mutated after construction; combination and evaluation only read.
//!
//! Serialization produces the transport form stored by the service layer:
//!
//! ```json
//! {"type": "operator", "value": "AND", "left": {...}, "right": {...}}
//! {"type": "operand", "value": {"field": "AGE", "operator": ">", "value": "30"}}
//! ```
//!
//! Historically the combine path stored operator nodes with the connective
//! under an `"operator"` key instead of `"value"`. [`AstNode::from_value`]
//! accepts either key (preferring `"value"`), so previously stored trees of
//! both shapes normalize into the same typed tree; serialization always
//! emits the `"value"`-keyed shape.

use crate::error::{Result, RuleError};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Logical connective joining two subtrees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogicalOp {
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

impl LogicalOp {
    pub fn as_str(self) -> &'static str {
        match self {
            LogicalOp::And => "AND",
            LogicalOp::Or => "OR",
        }
    }

    /// Match the exact uppercase keyword, as the scanner and transport do.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "AND" => Some(LogicalOp::And),
            "OR" => Some(LogicalOp::Or),
            _ => None,
        }
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison operators
///
/// `=` and `==` are distinct variants so that stored rules round-trip
/// byte-identically; they evaluate identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComparisonOp {
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = ">=")]
    GreaterEqual,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "<=")]
    LessEqual,
    #[serde(rename = "==")]
    Equal,
    /// Single `=`, a synonym for `==`
    #[serde(rename = "=")]
    EqualAlias,
    #[serde(rename = "!=")]
    NotEqual,
}

impl ComparisonOp {
    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonOp::Greater => ">",
            ComparisonOp::GreaterEqual => ">=",
            ComparisonOp::Less => "<",
            ComparisonOp::LessEqual => "<=",
            ComparisonOp::Equal => "==",
            ComparisonOp::EqualAlias => "=",
            ComparisonOp::NotEqual => "!=",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            ">" => Some(ComparisonOp::Greater),
            ">=" => Some(ComparisonOp::GreaterEqual),
            "<" => Some(ComparisonOp::Less),
            "<=" => Some(ComparisonOp::LessEqual),
            "==" => Some(ComparisonOp::Equal),
            "=" => Some(ComparisonOp::EqualAlias),
            "!=" => Some(ComparisonOp::NotEqual),
            _ => None,
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single field comparison at a leaf
///
/// `value` holds the literal text after quote-stripping; numeric typing is
/// deferred to evaluation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Condition {
    pub field: String,
    pub operator: ComparisonOp,
    pub value: String,
}

/// AST node for rule expressions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AstNode {
    /// Internal node combining two subtrees with AND/OR
    Operator {
        #[serde(rename = "value")]
        op: LogicalOp,
        left: Box<AstNode>,
        right: Box<AstNode>,
    },
    /// Leaf comparing one field against one literal value
    Operand {
        #[serde(rename = "value")]
        condition: Condition,
    },
}

impl AstNode {
    /// Build a typed tree from a transport-form value, normalizing both
    /// historical operator-node shapes and rejecting malformed trees.
    pub fn from_value(value: &Value) -> Result<Self> {
        let node = value.as_object().ok_or(RuleError::MissingTypeTag)?;
        let node_type = node
            .get("type")
            .and_then(Value::as_str)
            .ok_or(RuleError::MissingTypeTag)?;

        match node_type {
            "operator" => {
                let op_value = node
                    .get("value")
                    .or_else(|| node.get("operator"))
                    .ok_or(RuleError::MalformedOperatorNode)?;
                let op_text = match op_value.as_str() {
                    Some(text) => text,
                    None => return Err(RuleError::UnknownOperator(op_value.to_string())),
                };
                let op = LogicalOp::from_keyword(op_text)
                    .ok_or_else(|| RuleError::UnknownOperator(op_text.to_string()))?;

                let left = node.get("left").ok_or(RuleError::MalformedOperatorNode)?;
                let right = node.get("right").ok_or(RuleError::MalformedOperatorNode)?;

                Ok(AstNode::Operator {
                    op,
                    left: Box::new(Self::from_value(left)?),
                    right: Box::new(Self::from_value(right)?),
                })
            }
            "operand" => {
                let condition = node.get("value").ok_or(RuleError::MissingOperandValue)?;
                Ok(AstNode::Operand {
                    condition: Condition::from_value(condition)?,
                })
            }
            other => Err(RuleError::UnknownNodeType(other.to_string())),
        }
    }
}

impl Condition {
    fn from_value(value: &Value) -> Result<Self> {
        let condition = value.as_object().ok_or(RuleError::MissingOperandValue)?;

        let field = condition
            .get("field")
            .and_then(Value::as_str)
            .ok_or(RuleError::MissingOperandValue)?
            .to_string();

        let symbol = condition
            .get("operator")
            .and_then(Value::as_str)
            .ok_or(RuleError::MissingOperandValue)?;
        let operator = ComparisonOp::from_symbol(symbol)
            .ok_or_else(|| RuleError::UnsupportedComparisonOperator(symbol.to_string()))?;

        // Literals are stored as text; tolerate hand-written trees that
        // stored a bare JSON number.
        let literal = match condition.get("value") {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Number(number)) => number.to_string(),
            _ => return Err(RuleError::MissingOperandValue),
        };

        Ok(Condition {
            field,
            operator,
            value: literal,
        })
    }
}

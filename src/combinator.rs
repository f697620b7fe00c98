//! Conjunction of already-built rule ASTs

use crate::ast::{AstNode, LogicalOp};
use crate::error::{Result, RuleError};

/// Combine rule ASTs into a single tree conjoined with `AND`.
///
/// Left fold: `combine([a, b, c])` yields `AND(AND(a, b), c)`, so input
/// order determines the shape. Evaluation is order-insensitive; only the
/// stored representation differs.
///
/// An empty input is rejected: the tree has no "no constraint" shape and
/// the evaluator defines no verdict for one.
pub fn combine(asts: Vec<AstNode>) -> Result<AstNode> {
    let mut asts = asts.into_iter();
    let first = asts.next().ok_or(RuleError::EmptyCombination)?;
    Ok(asts.fold(first, |combined, next| AstNode::Operator {
        op: LogicalOp::And,
        left: Box::new(combined),
        right: Box::new(next),
    }))
}

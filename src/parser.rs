//! Recursive-descent parser building the rule AST
//!
//! Grammar, deliberately restrictive:
//!
//! ```text
//! Expr    := '(' Expr LogicalOp Expr ')'  |  Operand
//! Operand := FIELD ComparisonOp VALUE
//! ```
//!
//! An opening parenthesis always commits the parser to a full binary pair;
//! there is no production for a parenthesized single operand. Together with
//! the scanner's synthetic enclosing pair this means a bare single condition
//! (`AGE > 30`) fails with `MissingLogicalOperator`, and a flat chain of
//! three or more conditions fails with `MissingCloseParen` after the first
//! pair. Rules wanting more than two conditions must nest explicitly:
//! `(A > 1 AND B > 2) AND C > 3`.

use crate::ast::{AstNode, Condition};
use crate::error::{Result, RuleError};
use crate::scanner::{scan, Token};

/// Parse rule text into an AST.
///
/// Fatal on the first error; no recovery, no partial tree. Tokens left over
/// after the expression completes are a hard error.
pub fn parse_rule(text: &str) -> Result<AstNode> {
    let tokens = scan(text)?;
    let (node, next) = parse_expression(&tokens, 0)?;
    if next < tokens.len() {
        return Err(RuleError::TrailingTokens {
            remaining: tokens.len() - next,
        });
    }
    Ok(node)
}

/// Parse one expression starting at `index`, returning the node and the
/// index of the first unconsumed token. No backtracking; each token class is
/// locally decidable.
fn parse_expression(tokens: &[Token], index: usize) -> Result<(AstNode, usize)> {
    match tokens.get(index) {
        None => Err(RuleError::UnexpectedEnd),
        Some(Token::OpenParen) => {
            let (left, next) = parse_expression(tokens, index + 1)?;

            let op = match tokens.get(next) {
                Some(Token::Logical(op)) => *op,
                _ => return Err(RuleError::MissingLogicalOperator),
            };

            let (right, next) = parse_expression(tokens, next + 1)?;

            match tokens.get(next) {
                Some(Token::CloseParen) => {}
                _ => return Err(RuleError::MissingCloseParen),
            }

            Ok((
                AstNode::Operator {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                next + 1,
            ))
        }
        Some(_) => parse_operand(tokens, index),
    }
}

fn parse_operand(tokens: &[Token], index: usize) -> Result<(AstNode, usize)> {
    if index + 2 >= tokens.len() {
        return Err(RuleError::IncompleteCondition);
    }

    match (&tokens[index], &tokens[index + 1], &tokens[index + 2]) {
        (Token::Atom(field), Token::Comparison(operator), Token::Atom(value)) => Ok((
            AstNode::Operand {
                condition: Condition {
                    field: field.clone(),
                    operator: *operator,
                    value: value.clone(),
                },
            },
            index + 3,
        )),
        _ => Err(RuleError::MalformedCondition),
    }
}

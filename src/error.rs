//! Error types for the rule engine core

use thiserror::Error;

/// Main error type for the rule engine core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    // Scan errors
    #[error("Unrecognized character '{character}' at position {position}")]
    UnrecognizedCharacter { position: usize, character: char },

    #[error("Unterminated string literal starting at position {position}")]
    UnterminatedString { position: usize },

    // Parse errors
    #[error("Unexpected end of input")]
    UnexpectedEnd,

    #[error("Expected logical operator (AND/OR) after sub-expression")]
    MissingLogicalOperator,

    #[error("Expected closing parenthesis")]
    MissingCloseParen,

    #[error("Incomplete condition")]
    IncompleteCondition,

    #[error("Condition must be FIELD OPERATOR VALUE")]
    MalformedCondition,

    #[error("{remaining} unconsumed token(s) after expression")]
    TrailingTokens { remaining: usize },

    // Combine errors
    #[error("Cannot combine an empty list of rules")]
    EmptyCombination,

    // Transport and evaluation errors
    #[error("AST node is missing the 'type' key")]
    MissingTypeTag,

    #[error("Unknown node type: {0}")]
    UnknownNodeType(String),

    #[error("Operator node must have an operator and 'left'/'right' children")]
    MalformedOperatorNode,

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("Operand node is missing the 'value' key")]
    MissingOperandValue,

    #[error("Unsupported comparison operator: {0}")]
    UnsupportedComparisonOperator(String),
}

/// Result type alias for the rule engine core
pub type Result<T> = std::result::Result<T, RuleError>;

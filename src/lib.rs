//! Eligibility rule engine core
//!
//! Turns rule text like `AGE > 30 AND DEPARTMENT == 'SALES'` into a binary
//! expression tree, conjoins stored trees, and evaluates them against flat
//! field-to-value records. The four operations (scan, parse, combine,
//! evaluate) are pure, synchronous functions over immutable data; the
//! surrounding service owns storage, transport and normalization of incoming
//! text (rule text is upper-cased before it reaches the parser).
//!
//! ```
//! use rule_engine_core::{evaluate, parse_rule};
//! use serde_json::json;
//!
//! let ast = parse_rule("AGE > 30 AND DEPARTMENT == 'SALES'").unwrap();
//! let transport = serde_json::to_value(&ast).unwrap();
//!
//! let data = json!({"AGE": 35, "DEPARTMENT": "Sales"});
//! let eligible = evaluate(&transport, data.as_object().unwrap()).unwrap();
//! assert!(eligible);
//! ```

pub mod ast;
pub mod cache;
pub mod combinator;
pub mod error;
pub mod evaluator;
pub mod parser;
pub mod scanner;


pub use ast::{AstNode, ComparisonOp, Condition, LogicalOp};
pub use combinator::combine;
pub use error::{Result, RuleError};
pub use evaluator::{check, evaluate, Record};
pub use parser::parse_rule;
pub use scanner::{scan, Token};

//! Lexical scanner for rule text
//!
//! Scanning is purely lexical; no semantic validation happens here, and no
//! case normalization either (the storing service upper-cases rule text
//! before it reaches the core).

use crate::ast::{ComparisonOp, LogicalOp};
use crate::error::{Result, RuleError};

/// Lexical token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    OpenParen,
    CloseParen,
    Logical(LogicalOp),
    Comparison(ComparisonOp),
    /// Identifier, bare number, or de-quoted string literal
    Atom(String),
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Scan rule text into tokens.
///
/// The returned stream is wrapped in a synthetic enclosing `(` `)` pair.
/// The pair is structural, not cosmetic: the parser's grammar requires every
/// parenthesized group to hold a binary expression, the wrapped top level
/// included.
///
/// At each position the scanner matches, in priority order: whitespace
/// (separator), `(` / `)`, a comparison operator (`>` `>=` `<` `<=` `==` `=`
/// `!=`), a single-quoted string literal (quotes stripped), or a maximal run
/// of word characters. A word run that is exactly the uppercase keyword
/// `AND` or `OR` becomes a logical operator. Any other character fails the
/// scan with its position; nothing is silently dropped. One consequence:
/// decimal literals must be quoted (`'50.5'`), since a bare `.` is not part
/// of any token.
pub fn scan(text: &str) -> Result<Vec<Token>> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut tokens = vec![Token::OpenParen];
    let mut i = 0;

    while i < chars.len() {
        let (position, c) = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '(' => {
                tokens.push(Token::OpenParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::CloseParen);
                i += 1;
            }
            '>' | '<' | '=' | '!' => {
                let followed_by_eq = matches!(chars.get(i + 1), Some(&(_, '=')));
                let op = match (c, followed_by_eq) {
                    ('>', true) => ComparisonOp::GreaterEqual,
                    ('>', false) => ComparisonOp::Greater,
                    ('<', true) => ComparisonOp::LessEqual,
                    ('<', false) => ComparisonOp::Less,
                    ('=', true) => ComparisonOp::Equal,
                    ('=', false) => ComparisonOp::EqualAlias,
                    ('!', true) => ComparisonOp::NotEqual,
                    // A lone '!' starts no token
                    ('!', false) => {
                        return Err(RuleError::UnrecognizedCharacter {
                            position,
                            character: '!',
                        })
                    }
                    _ => unreachable!(),
                };
                i += if followed_by_eq { 2 } else { 1 };
                tokens.push(Token::Comparison(op));
            }
            '\'' => {
                let start = i + 1;
                let mut end = start;
                while end < chars.len() && chars[end].1 != '\'' {
                    end += 1;
                }
                if end == chars.len() {
                    return Err(RuleError::UnterminatedString { position });
                }
                let literal: String = chars[start..end].iter().map(|&(_, ch)| ch).collect();
                tokens.push(Token::Atom(literal));
                i = end + 1;
            }
            c if is_word_char(c) => {
                let mut end = i + 1;
                while end < chars.len() && is_word_char(chars[end].1) {
                    end += 1;
                }
                let word: String = chars[i..end].iter().map(|&(_, ch)| ch).collect();
                tokens.push(match LogicalOp::from_keyword(&word) {
                    Some(op) => Token::Logical(op),
                    None => Token::Atom(word),
                });
                i = end;
            }
            other => {
                return Err(RuleError::UnrecognizedCharacter {
                    position,
                    character: other,
                })
            }
        }
    }

    tokens.push(Token::CloseParen);
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_simple_pair() {
        let tokens = scan("AGE > 30 AND DEPT == 'IT'").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::OpenParen,
                Token::Atom("AGE".to_string()),
                Token::Comparison(ComparisonOp::Greater),
                Token::Atom("30".to_string()),
                Token::Logical(LogicalOp::And),
                Token::Atom("DEPT".to_string()),
                Token::Comparison(ComparisonOp::Equal),
                Token::Atom("IT".to_string()),
                Token::CloseParen,
            ]
        );
    }

    #[test]
    fn test_scan_wraps_empty_input() {
        assert_eq!(scan("").unwrap(), vec![Token::OpenParen, Token::CloseParen]);
    }

    #[test]
    fn test_scan_all_comparison_operators() {
        let cases = [
            (">", ComparisonOp::Greater),
            (">=", ComparisonOp::GreaterEqual),
            ("<", ComparisonOp::Less),
            ("<=", ComparisonOp::LessEqual),
            ("==", ComparisonOp::Equal),
            ("=", ComparisonOp::EqualAlias),
            ("!=", ComparisonOp::NotEqual),
        ];
        for (symbol, expected) in cases {
            let tokens = scan(&format!("A {} 1", symbol)).unwrap();
            assert_eq!(tokens[2], Token::Comparison(expected), "symbol: {}", symbol);
        }
    }

    #[test]
    fn test_scan_quoted_literal_keeps_inner_text() {
        let tokens = scan("CITY = 'NEW YORK'").unwrap();
        assert_eq!(tokens[3], Token::Atom("NEW YORK".to_string()));
    }

    #[test]
    fn test_scan_keyword_requires_word_boundary() {
        // ANDES is an atom, not AND followed by ES
        let tokens = scan("ANDES > 1").unwrap();
        assert_eq!(tokens[1], Token::Atom("ANDES".to_string()));

        // Lowercase keywords are plain atoms; the caller upper-cases first
        let tokens = scan("a > 1 and b > 2").unwrap();
        assert_eq!(tokens[4], Token::Atom("and".to_string()));
    }

    #[test]
    fn test_scan_user_parentheses() {
        let tokens = scan("(A > 1 AND B > 2) OR (C > 3 AND D > 4)").unwrap();
        assert_eq!(tokens[1], Token::OpenParen);
        assert_eq!(tokens.iter().filter(|t| **t == Token::OpenParen).count(), 3);
        assert_eq!(
            tokens.iter().filter(|t| **t == Token::CloseParen).count(),
            3
        );
    }

    #[test]
    fn test_scan_rejects_unrecognized_character() {
        let err = scan("AGE @ 30").unwrap_err();
        assert_eq!(
            err,
            RuleError::UnrecognizedCharacter {
                position: 4,
                character: '@'
            }
        );
    }

    #[test]
    fn test_scan_rejects_unquoted_decimal() {
        let err = scan("SCORE > 4.5").unwrap_err();
        assert_eq!(
            err,
            RuleError::UnrecognizedCharacter {
                position: 9,
                character: '.'
            }
        );
    }

    #[test]
    fn test_scan_rejects_lone_bang() {
        let err = scan("A ! 1").unwrap_err();
        assert_eq!(
            err,
            RuleError::UnrecognizedCharacter {
                position: 2,
                character: '!'
            }
        );
    }

    #[test]
    fn test_scan_rejects_unterminated_string() {
        let err = scan("DEPT == 'IT").unwrap_err();
        assert_eq!(err, RuleError::UnterminatedString { position: 8 });
    }
}

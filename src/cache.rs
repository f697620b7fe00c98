//! Rule parsing cache - normalized rule text to AST, with fast hashing
//!
//! Callers tend to re-check the same small set of rules against many
//! records. ASTs are immutable once built, so cached entries are handed out
//! as clones with no further coordination.

use crate::ast::AstNode;
use crate::error::Result;
use crate::evaluator::{check, Record};
use crate::parser::parse_rule;
use ahash::AHashMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;

/// Global rule cache with fast hashing (ahash)
static RULE_CACHE: Lazy<RwLock<AHashMap<String, AstNode>>> = Lazy::new(|| {
    let map = AHashMap::with_capacity(1024);
    RwLock::new(map)
});

/// Get or parse a rule string, using the cache for repeated rules.
///
/// The text is upper-cased before scanning - the same normalization the
/// storing service applies. Field names and quoted literals in the returned
/// AST are therefore uppercase, and record keys must match the uppercase
/// field names exactly.
#[inline]
pub fn get_or_parse(rule: &str) -> Result<AstNode> {
    let normalized = rule.to_uppercase();

    // Fast path: check read lock first
    {
        let cache = RULE_CACHE.read();
        if let Some(ast) = cache.get(&normalized) {
            return Ok(ast.clone());
        }
    }

    // Slow path: parse and cache
    let ast = parse_rule(&normalized)?;

    {
        let mut cache = RULE_CACHE.write();
        cache.insert(normalized, ast.clone());
    }

    Ok(ast)
}

/// Check rule text against a record, using the cached AST
#[inline]
pub fn check_rule(rule: &str, record: &Record) -> Result<bool> {
    let ast = get_or_parse(rule)?;
    Ok(check(&ast, record))
}

/// Clear the rule cache (useful for testing)
pub fn clear_cache() {
    let mut cache = RULE_CACHE.write();
    cache.clear();
}

/// Get cache statistics
pub fn cache_size() -> usize {
    let cache = RULE_CACHE.read();
    cache.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cache_hit() {
        clear_cache();

        let data = json!({"AGE": 35, "DEPT": "it"});
        let record = data.as_object().unwrap();

        // First call - cache miss
        let result1 = check_rule("AGE > 30 AND DEPT == 'IT'", record).unwrap();
        assert!(result1);
        assert!(cache_size() >= 1);

        // Second call - cache hit, same verdict
        let result2 = check_rule("AGE > 30 AND DEPT == 'IT'", record).unwrap();
        assert!(result2);
    }

    #[test]
    fn test_cache_normalizes_case() {
        let data = json!({"AGE": 35, "DEPT": "it"});
        let record = data.as_object().unwrap();

        // Lowercase rule text normalizes to the uppercase form the service
        // stores; both share one cache entry
        let lower = check_rule("age > 30 and dept == 'it'", record).unwrap();
        let upper = check_rule("AGE > 30 AND DEPT == 'IT'", record).unwrap();
        assert!(lower);
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_parse_errors_are_not_cached() {
        // A failing rule keeps failing; no poisoned entry appears
        assert!(get_or_parse("AGE > 30").is_err());
        assert!(get_or_parse("AGE > 30").is_err());
    }
}

//! Cache key derivation.
//!
//! Key layout is a persisted convention shared with any other process
//! reading the same Redis instance, so the formats here must stay
//! stable across releases.

use hearth_core::PropertyId;
use md5::{Digest, Md5};
use std::time::Duration;

/// Key prefix for property list results.
pub const PROPERTIES_LIST_PREFIX: &str = "properties_list:";

/// Glob pattern matching every cached property list.
pub const PROPERTIES_LIST_PATTERN: &str = "properties_list:*";

/// TTL for single-property entries (1 hour).
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// TTL for list results (5 minutes). Lists go stale faster because any
/// mutation can change their membership.
pub const LIST_TTL: Duration = Duration::from_secs(300);

/// Derives the cache key for a property list query.
///
/// Parameters are sorted by name and joined as `name=value` pairs with
/// `&`, then hashed, so that two requests with the same parameters in
/// different order share one cache entry.
#[must_use]
pub fn properties_list(params: &[(String, String)]) -> String {
    let mut pairs: Vec<&(String, String)> = params.iter().collect();
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    let canonical = pairs
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("&");

    let digest = Md5::digest(canonical.as_bytes());
    format!("{}{:x}", PROPERTIES_LIST_PREFIX, digest)
}

/// Derives the cache key for a single property.
#[must_use]
pub fn property_by_id(id: PropertyId) -> String {
    format!("property:{}", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_key_ignores_parameter_order() {
        let a = vec![
            ("city".to_string(), "Pune".to_string()),
            ("bedrooms".to_string(), "2".to_string()),
        ];
        let b = vec![
            ("bedrooms".to_string(), "2".to_string()),
            ("city".to_string(), "Pune".to_string()),
        ];
        assert_eq!(properties_list(&a), properties_list(&b));
    }

    #[test]
    fn test_list_key_distinguishes_values() {
        let a = vec![("city".to_string(), "Pune".to_string())];
        let b = vec![("city".to_string(), "Mumbai".to_string())];
        assert_ne!(properties_list(&a), properties_list(&b));
    }

    #[test]
    fn test_empty_params_hash_of_empty_string() {
        // md5("") is the well-known empty digest
        assert_eq!(
            properties_list(&[]),
            "properties_list:d41d8cd98f00b204e9800998ecf8427e"
        );
    }

    #[test]
    fn test_key_prefix_matches_pattern() {
        let key = properties_list(&[("page".to_string(), "1".to_string())]);
        assert!(key.starts_with(PROPERTIES_LIST_PREFIX));
        assert!(PROPERTIES_LIST_PATTERN.starts_with(PROPERTIES_LIST_PREFIX));
    }

    #[test]
    fn test_property_key_format() {
        let id = PropertyId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(
            property_by_id(id),
            "property:550e8400-e29b-41d4-a716-446655440000"
        );
    }
}

//! Mapping between voter ids and document keys.
//!
//! Keys look like `voter:<id>`. The mapping is one-way: callers that need the
//! id back read it from the fetched document.

pub const KEY_PREFIX: &str = "voter:";

pub fn key_for(voter_id: u64) -> String {
    format!("{KEY_PREFIX}{voter_id}")
}

/// Glob pattern matching every key produced by [`key_for`].
pub fn prefix_pattern() -> String {
    format!("{KEY_PREFIX}*")
}

/// Match a key against the glob subset this crate emits (`*` wildcards only).
pub fn matches_pattern(pattern: &str, key: &str) -> bool {
    let mut parts = pattern.split('*');
    let Some(first) = parts.next() else { return key.is_empty() };
    let Some(mut rest) = key.strip_prefix(first) else { return false };

    let segments: Vec<&str> = parts.collect();
    let Some((last, middle)) = segments.split_last() else {
        return rest.is_empty();
    };

    for segment in middle {
        match rest.find(segment) {
            Some(idx) => rest = &rest[idx + segment.len()..],
            None => return false,
        }
    }
    rest.ends_with(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_format() {
        assert_eq!(key_for(0), "voter:0");
        assert_eq!(key_for(42), "voter:42");
        assert_eq!(key_for(u64::MAX), format!("voter:{}", u64::MAX));
    }

    #[test]
    fn test_keys_are_distinct() {
        let keys: std::collections::HashSet<_> = (0..1000).map(key_for).collect();
        assert_eq!(keys.len(), 1000);
        assert_ne!(key_for(1), key_for(11));
    }

    #[test]
    fn test_prefix_pattern_matches_generated_keys() {
        let pattern = prefix_pattern();
        assert_eq!(pattern, "voter:*");
        for id in [0, 1, 17, 9_999, u64::MAX] {
            assert!(matches_pattern(&pattern, &key_for(id)));
        }
        assert!(!matches_pattern(&pattern, "todo:1"));
        assert!(!matches_pattern(&pattern, "voters"));
    }

    #[test]
    fn test_glob_subset() {
        assert!(matches_pattern("voter:1", "voter:1"));
        assert!(!matches_pattern("voter:1", "voter:12"));
        assert!(matches_pattern("*", "anything"));
        assert!(matches_pattern("a*c*e", "abcde"));
        assert!(!matches_pattern("a*c*e", "abdef"));
        assert!(matches_pattern("a*a", "aa"));
        assert!(!matches_pattern("ab*ba", "aba"));
    }
}

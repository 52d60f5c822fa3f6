//! Blake3 hashing utilities.
//!
//! Sub-graphs are registered under a content hash of the requirement that
//! spawned them, computed on demand from its target name, context and options.

use crate::types::{Context, OptionMap};

/// Compute Blake3 hash of data
pub fn blake3_hash(data: &[u8]) -> String {
    let hash = blake3::hash(data);
    hash.to_hex().to_string()
}

/// Hash identifying a sub-graph: target name, resolution context and options.
/// The version expression is deliberately not part of the key.
///
/// Every field is length-prefixed, so no choice of names or option values
/// can make two different requirements hash the same byte stream.
pub fn subgraph_key(name: &str, context: Context, options: &OptionMap) -> String {
    let mut hasher = blake3::Hasher::new();
    update_field(&mut hasher, name);
    update_field(&mut hasher, context.as_str());
    for (key, value) in options {
        update_field(&mut hasher, key);
        update_field(&mut hasher, value);
    }
    hasher.finalize().to_hex().to_string()
}

fn update_field(hasher: &mut blake3::Hasher, field: &str) {
    hasher.update(&(field.len() as u64).to_le_bytes());
    hasher.update(field.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blake3_hash() {
        let hash = blake3_hash(b"hello world");

        assert_eq!(hash.len(), 64); // 32 bytes = 64 hex chars
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_subgraph_key_is_stable() {
        let mut options = OptionMap::new();
        options.insert("shared".to_string(), "True".to_string());

        let first = subgraph_key("zlib", Context::Build, &options);
        let second = subgraph_key("zlib", Context::Build, &options);
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
    }

    #[test]
    fn test_subgraph_key_separates_fields() {
        let empty = OptionMap::new();
        assert_ne!(
            subgraph_key("zlib", Context::Host, &empty),
            subgraph_key("zlib", Context::Build, &empty)
        );
        assert_ne!(
            subgraph_key("zlib", Context::Host, &empty),
            subgraph_key("zlibhost", Context::Host, &empty)
        );
    }

    #[test]
    fn test_subgraph_key_keeps_option_boundaries() {
        let split_key = OptionMap::from([("a=b".to_string(), "c".to_string())]);
        let split_value = OptionMap::from([("a".to_string(), "b=c".to_string())]);
        assert_ne!(
            subgraph_key("zlib", Context::Build, &split_key),
            subgraph_key("zlib", Context::Build, &split_value)
        );
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn options() -> impl Strategy<Value = OptionMap> {
        prop::collection::btree_map("[a-c=]{0,3}", "[a-c=]{0,3}", 0..3)
    }

    proptest! {
        #[test]
        fn keys_match_only_for_equal_inputs(
            name_a in "[a-c=]{1,3}",
            name_b in "[a-c=]{1,3}",
            options_a in options(),
            options_b in options()
        ) {
            let same = name_a == name_b && options_a == options_b;
            let key_a = subgraph_key(&name_a, Context::Build, &options_a);
            let key_b = subgraph_key(&name_b, Context::Build, &options_b);
            prop_assert_eq!(key_a == key_b, same);
        }
    }
}

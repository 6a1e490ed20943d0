//! Helpers for tri-state fields.
//!
//! Many request fields distinguish three states on the wire: key omitted,
//! key with a zero value, and key with a non-zero value. They are modelled
//! as `Option<T>` with `#[serde(skip_serializing_if = "Option::is_none")]`:
//!
//! | Rust value | JSON |
//! |---|---|
//! | `None` | key omitted |
//! | `Some(0)` / `Some(false)` / `Some("")` | key with the zero value |
//! | `Some(v)` | key with `v` |
//!
//! The functions here convert between plain values and their optional
//! forms when building or reading such payloads.
//!
//! # Example
//!
//! ```rust
//! use cloudflare_api::optional::{some, value_or_default};
//! use cloudflare_api::rest::resources::DnsRecordUpdateParams;
//!
//! let params = DnsRecordUpdateParams {
//!     id: "372e67954025e0ba6aaa6d586b9e0b59".to_string(),
//!     proxied: some(false),
//!     ..Default::default()
//! };
//! assert_eq!(value_or_default(params.ttl), 0);
//! ```

use std::collections::HashMap;
use std::hash::Hash;

/// Marks `value` as present.
#[must_use]
pub const fn some<T>(value: T) -> Option<T> {
    Some(value)
}

/// Returns the value, or the zero value of `T` when absent.
#[must_use]
pub fn value_or_default<T: Default>(value: Option<T>) -> T {
    value.unwrap_or_default()
}

/// Marks every element as present.
#[must_use]
pub fn wrap_slice<T: Clone>(values: &[T]) -> Vec<Option<T>> {
    values.iter().cloned().map(Some).collect()
}

/// Unwraps every element, substituting the zero value for absent ones.
#[must_use]
pub fn unwrap_slice<T: Clone + Default>(values: &[Option<T>]) -> Vec<T> {
    values.iter().map(|v| v.clone().unwrap_or_default()).collect()
}

/// Marks every map value as present.
#[must_use]
pub fn wrap_map<K, V>(values: &HashMap<K, V>) -> HashMap<K, Option<V>>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    values.iter().map(|(k, v)| (k.clone(), Some(v.clone()))).collect()
}

/// Unwraps every map value, substituting the zero value for absent ones.
#[must_use]
pub fn unwrap_map<K, V>(values: &HashMap<K, Option<V>>) -> HashMap<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone + Default,
{
    values
        .iter()
        .map(|(k, v)| (k.clone(), v.clone().unwrap_or_default()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use serde_json::{json, Value};

    #[derive(Serialize, Deserialize)]
    struct Settings {
        #[serde(skip_serializing_if = "Option::is_none")]
        ttl: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        proxied: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        comment: Option<String>,
    }

    fn round_trip(input: &Value) -> Value {
        let decoded: Settings = serde_json::from_value(input.clone()).unwrap();
        serde_json::to_value(decoded).unwrap()
    }

    #[test]
    fn test_tri_state_survives_decode_encode() {
        for input in [
            json!({}),
            json!({"ttl": 0, "proxied": false, "comment": ""}),
            json!({"ttl": 300, "proxied": true, "comment": "edge"}),
            json!({"ttl": 0}),
        ] {
            assert_eq!(round_trip(&input), input);
        }
    }

    #[test]
    fn test_value_helpers() {
        assert_eq!(some(0), Some(0));
        assert_eq!(value_or_default::<u32>(None), 0);
        assert_eq!(value_or_default(Some(7)), 7);
        assert_eq!(value_or_default::<String>(None), "");
    }

    #[test]
    fn test_slice_helpers() {
        let wrapped = wrap_slice(&[1, 0, 3]);
        assert_eq!(wrapped, vec![Some(1), Some(0), Some(3)]);
        assert_eq!(unwrap_slice(&[Some(1), None, Some(3)]), vec![1, 0, 3]);
        assert!(wrap_slice::<u8>(&[]).is_empty());
    }

    #[test]
    fn test_map_helpers() {
        let mut plain = HashMap::new();
        plain.insert("a".to_string(), 1);
        plain.insert("b".to_string(), 0);

        let wrapped = wrap_map(&plain);
        assert_eq!(wrapped.get("b"), Some(&Some(0)));

        let mut partial = wrapped.clone();
        partial.insert("c".to_string(), None);
        let unwrapped = unwrap_map(&partial);
        assert_eq!(unwrapped.get("a"), Some(&1));
        assert_eq!(unwrapped.get("c"), Some(&0));
        assert_eq!(unwrap_map(&wrapped), plain);
    }
}

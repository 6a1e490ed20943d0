//! Deterministic query-string encoding for list and filter parameters.
//!
//! Parameter blocks are plain `Serialize` structs. Field names are used as
//! serialised (use `#[serde(rename)]` for casing), `None` fields are
//! omitted, and keys are sorted so that equal blocks always produce
//! byte-identical query strings.
//!
//! Sequences use the repeated-key form (`tag=a&tag=b`) unless the field
//! opts into [`comma_separated`]. Timestamps should use [`rfc3339`].
//!
//! # Example
//!
//! ```rust
//! use cloudflare_api::rest::query::{self, encode_query};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Filter {
//!     #[serde(skip_serializing_if = "Option::is_none")]
//!     name: Option<String>,
//!     #[serde(
//!         skip_serializing_if = "Option::is_none",
//!         serialize_with = "query::comma_separated"
//!     )]
//!     status: Option<Vec<String>>,
//!     tag: Vec<String>,
//! }
//!
//! let filter = Filter {
//!     name: Some("www example".to_string()),
//!     status: Some(vec!["active".to_string(), "pending".to_string()]),
//!     tag: vec!["a".to_string(), "b".to_string()],
//! };
//! assert_eq!(
//!     encode_query(&filter).unwrap(),
//!     "name=www%20example&status=active%2Cpending&tag=a&tag=b"
//! );
//! ```

use std::fmt::Display;

use chrono::{DateTime, SecondsFormat, TimeZone};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::clients::Error;

/// Encodes a parameter block as a query string (without the leading `?`).
///
/// # Errors
///
/// Returns a validation error if the block is not a struct or map, or if
/// it contains nested objects.
pub fn encode_query<T: Serialize + ?Sized>(params: &T) -> Result<String, Error> {
    let value = serde_json::to_value(params)
        .map_err(|e| Error::validation(format!("cannot encode query parameters: {e}")))?;

    let map = match value {
        Value::Null => return Ok(String::new()),
        Value::Object(map) => map,
        other => {
            return Err(Error::validation(format!(
                "query parameters must be a struct or map, got {other}"
            )))
        }
    };

    let mut entries: Vec<(String, Value)> = map.into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let mut pairs = Vec::new();
    for (key, value) in &entries {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items {
                    if let Some(text) = scalar(key, item)? {
                        pairs.push(pair(key, &text));
                    }
                }
            }
            other => {
                if let Some(text) = scalar(key, other)? {
                    pairs.push(pair(key, &text));
                }
            }
        }
    }

    Ok(pairs.join("&"))
}

fn scalar(key: &str, value: &Value) -> Result<Option<String>, Error> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Array(_) | Value::Object(_) => Err(Error::validation(format!(
            "query parameter '{key}' cannot hold nested values"
        ))),
    }
}

fn pair(key: &str, value: &str) -> String {
    format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
}

/// Serialises an optional sequence as a single comma-separated value.
///
/// Use with `#[serde(serialize_with = "query::comma_separated")]`.
///
/// # Errors
///
/// Propagates serializer errors.
pub fn comma_separated<S, T>(values: &Option<Vec<T>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Display,
{
    match values {
        Some(values) if !values.is_empty() => serializer.serialize_str(
            &values
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(","),
        ),
        _ => serializer.serialize_none(),
    }
}

/// Serialises an optional timestamp in RFC 3339 with a numeric offset.
///
/// Use with `#[serde(serialize_with = "query::rfc3339")]`.
///
/// # Errors
///
/// Propagates serializer errors.
pub fn rfc3339<S, Tz>(value: &Option<DateTime<Tz>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match value {
        Some(timestamp) => {
            serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, false))
        }
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use chrono::{FixedOffset, Utc};
    use serde::Serialize;
    use std::collections::HashMap;

    #[derive(Serialize, Clone)]
    struct Params {
        #[serde(skip_serializing_if = "Option::is_none")]
        zeta: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        alpha: Option<bool>,
        #[serde(
            rename = "match",
            skip_serializing_if = "Option::is_none"
        )]
        match_mode: Option<String>,
        #[serde(
            skip_serializing_if = "Option::is_none",
            serialize_with = "comma_separated"
        )]
        ids: Option<Vec<u32>>,
        #[serde(skip_serializing_if = "Option::is_none", serialize_with = "rfc3339")]
        since: Option<DateTime<FixedOffset>>,
    }

    fn sample() -> Params {
        Params {
            zeta: Some(0),
            alpha: Some(false),
            match_mode: Some("all".to_string()),
            ids: Some(vec![1, 2, 3]),
            since: Some(
                DateTime::parse_from_rfc3339("2024-01-02T03:04:05+02:00").unwrap(),
            ),
        }
    }

    #[test]
    fn test_keys_are_sorted_and_zero_values_kept() {
        assert_eq!(
            encode_query(&sample()).unwrap(),
            "alpha=false&ids=1%2C2%2C3&match=all&since=2024-01-02T03%3A04%3A05%2B02%3A00&zeta=0"
        );
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let params = Params {
            zeta: None,
            alpha: None,
            match_mode: None,
            ids: None,
            since: None,
        };
        assert_eq!(encode_query(&params).unwrap(), "");
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let mut first = HashMap::new();
        let mut second = HashMap::new();
        for (k, v) in [("b", "2"), ("a", "1"), ("c", "3")] {
            first.insert(k, v);
        }
        for (k, v) in [("c", "3"), ("b", "2"), ("a", "1")] {
            second.insert(k, v);
        }
        assert_eq!(encode_query(&first).unwrap(), encode_query(&second).unwrap());
        assert_eq!(encode_query(&sample()).unwrap(), encode_query(&sample().clone()).unwrap());
    }

    #[test]
    fn test_sequences_use_repeated_keys() {
        #[derive(Serialize)]
        struct Tags {
            tag: Vec<&'static str>,
        }
        assert_eq!(
            encode_query(&Tags { tag: vec!["a b", "c"] }).unwrap(),
            "tag=a%20b&tag=c"
        );
    }

    #[test]
    fn test_utc_timestamps_use_numeric_offset() {
        #[derive(Serialize)]
        struct Since {
            #[serde(serialize_with = "rfc3339")]
            since: Option<DateTime<Utc>>,
        }
        let since = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        assert_eq!(
            encode_query(&Since { since: Some(since) }).unwrap(),
            "since=2024-05-06T07%3A08%3A09%2B00%3A00"
        );
    }

    #[test]
    fn test_nested_objects_are_rejected() {
        #[derive(Serialize)]
        struct Inner {
            a: u32,
        }
        #[derive(Serialize)]
        struct Outer {
            inner: Inner,
        }
        let error = encode_query(&Outer { inner: Inner { a: 1 } }).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_unit_encodes_to_empty_string() {
        assert_eq!(encode_query(&()).unwrap(), "");
    }
}

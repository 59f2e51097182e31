//! Engine records as they arrive on the wire.
//!
//! Two shapes are accepted. Flat records carry `line`/`reason`/`suggestion`
//! directly; nested records carry them under a `violation` object. Only the
//! normalizer looks at this distinction.

use super::Status;
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Deserialize)]
pub struct RawEntry {
    pub status: Status,
    pub rule_no: u32,
    pub rule_name: String,
    #[serde(default)]
    pub line: Option<u32>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub suggestion: Option<String>,
    #[serde(default)]
    pub violation: Option<RawViolation>,
}

/// Detail block of a nested record. The engine repeats `rule_no` and
/// `rule_name` in here; those copies are ignored.
///
/// The outer `Option` records whether the key was present at all, so an
/// explicit `null` can clear the flat value while a missing key keeps it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawViolation {
    #[serde(default, deserialize_with = "present")]
    pub line: Option<Option<u32>>,
    #[serde(default, deserialize_with = "present")]
    pub reason: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub suggestion: Option<Option<String>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flat_shape() {
        let e: RawEntry = serde_json::from_str(
            r#"{"status":"NOT_FOLLOWED","rule_no":4,"rule_name":"Flags","line":3,"reason":"r"}"#,
        )
        .unwrap();
        assert_eq!(e.line, Some(3));
        assert_eq!(e.reason.as_deref(), Some("r"));
        assert!(e.violation.is_none());
    }

    #[test]
    fn parses_nested_shape_and_ignores_extra_keys() {
        let e: RawEntry = serde_json::from_str(
            r#"{"status":"NOT FOLLOWED","rule_no":7,"rule_name":"Pairs","extra":true,
                "violation":{"rule_no":7,"rule_name":"Pairs","line":9,"reason":"x","suggestion":"y"}}"#,
        )
        .unwrap();
        let v = e.violation.unwrap();
        assert_eq!(v.line, Some(Some(9)));
        assert_eq!(v.suggestion, Some(Some("y".to_string())));
    }

    #[test]
    fn nested_null_differs_from_missing() {
        let e: RawEntry = serde_json::from_str(
            r#"{"status":"NOT_FOLLOWED","rule_no":4,"rule_name":"Flags",
                "violation":{"line":2,"reason":null}}"#,
        )
        .unwrap();
        let v = e.violation.unwrap();
        assert_eq!(v.reason, Some(None));
        assert_eq!(v.suggestion, None);
    }

    #[test]
    fn null_optionals_are_absent() {
        let e: RawEntry = serde_json::from_str(
            r#"{"status":"OK","rule_no":1,"rule_name":"X","line":null,"violation":null}"#,
        )
        .unwrap();
        assert!(e.line.is_none());
        assert!(e.violation.is_none());
    }
}

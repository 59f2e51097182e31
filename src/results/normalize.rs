//! Lifts nested violation detail into the canonical record shape.

use crate::types::{NormalizedResult, RawEntry};

/// Normalizes every entry, one output per input, order preserved.
#[must_use]
pub fn normalize(entries: Vec<RawEntry>) -> Vec<NormalizedResult> {
    entries.into_iter().map(normalize_entry).collect()
}

/// Nested values win, including an explicit `null`; a key missing from the
/// nested record keeps the flat value.
#[must_use]
pub fn normalize_entry(entry: RawEntry) -> NormalizedResult {
    let RawEntry {
        status,
        rule_no,
        rule_name,
        line,
        reason,
        suggestion,
        violation,
    } = entry;

    let (line, reason, suggestion) = match violation {
        Some(v) => (
            v.line.unwrap_or(line),
            v.reason.unwrap_or(reason),
            v.suggestion.unwrap_or(suggestion),
        ),
        None => (line, reason, suggestion),
    };

    NormalizedResult {
        status,
        rule_no,
        rule_name,
        line: line.filter(|l| *l > 0),
        reason,
        suggestion,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RawViolation, Status};

    fn raw(status: Status, rule_no: u32) -> RawEntry {
        RawEntry {
            status,
            rule_no,
            rule_name: format!("Rule {rule_no}"),
            line: None,
            reason: None,
            suggestion: None,
            violation: None,
        }
    }

    #[test]
    fn nested_detail_is_lifted() {
        let mut e = raw(Status::NotFollowed, 2);
        e.violation = Some(RawViolation {
            line: Some(Some(5)),
            reason: Some(Some("bad".into())),
            suggestion: Some(Some("fix".into())),
        });
        let n = normalize_entry(e);
        assert_eq!(n.status, Status::NotFollowed);
        assert_eq!(n.rule_no, 2);
        assert_eq!(n.rule_name, "Rule 2");
        assert_eq!(n.line, Some(5));
        assert_eq!(n.reason.as_deref(), Some("bad"));
        assert_eq!(n.suggestion.as_deref(), Some("fix"));
    }

    #[test]
    fn nested_values_override_flat_ones() {
        let mut e = raw(Status::NotFollowed, 3);
        e.line = Some(1);
        e.reason = Some("flat".into());
        e.violation = Some(RawViolation {
            line: Some(Some(8)),
            reason: None,
            suggestion: Some(Some("nested".into())),
        });
        let n = normalize_entry(e);
        assert_eq!(n.line, Some(8));
        assert_eq!(n.reason.as_deref(), Some("flat"));
        assert_eq!(n.suggestion.as_deref(), Some("nested"));
    }

    #[test]
    fn nested_null_clears_flat_value() {
        let mut e = raw(Status::NotFollowed, 5);
        e.line = Some(4);
        e.reason = Some("flat".into());
        e.suggestion = Some("flat fix".into());
        e.violation = Some(RawViolation {
            line: Some(None),
            reason: Some(None),
            suggestion: None,
        });
        let n = normalize_entry(e);
        assert_eq!(n.line, None);
        assert_eq!(n.reason, None);
        assert_eq!(n.suggestion.as_deref(), Some("flat fix"));
    }

    #[test]
    fn flat_entry_is_copied() {
        let mut e = raw(Status::Ok, 1);
        e.reason = Some("fine".into());
        let n = normalize_entry(e);
        assert_eq!(n, NormalizedResult::new(Status::Ok, 1, "Rule 1").with_reason("fine"));
    }

    #[test]
    fn line_zero_becomes_absent() {
        let mut e = raw(Status::NotFollowed, 9);
        e.line = Some(0);
        assert_eq!(normalize_entry(e).line, None);
    }

    #[test]
    fn keeps_order_and_count() {
        let out = normalize(vec![
            raw(Status::Ok, 3),
            raw(Status::Ok, 3),
            raw(Status::Error, 1),
        ]);
        let nos: Vec<u32> = out.iter().map(|r| r.rule_no).collect();
        assert_eq!(nos, vec![3, 3, 1]);
    }
}

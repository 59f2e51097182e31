//! Status split and violation ordering.

use crate::types::{NormalizedResult, ResultSet, Status};

/// Splits results by status and sorts the violations.
#[must_use]
pub fn partition(results: Vec<NormalizedResult>) -> ResultSet {
    let mut set = ResultSet::default();
    for r in results {
        match r.status {
            Status::Ok => set.followed.push(r),
            Status::NotFollowed => set.violations.push(r),
            Status::Error => set.errors.push(r),
        }
    }
    sort_violations(&mut set.violations);
    set
}

/// Line ascending with missing lines last, then rule number. Stable.
pub fn sort_violations(violations: &mut [NormalizedResult]) {
    violations.sort_by_key(|v| (v.line.is_none(), v.line, v.rule_no));
}

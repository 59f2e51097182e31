//! Compliance summary and violation frequency table.

use crate::types::{ComplianceSummary, FrequencyEntry, NormalizedResult, TOTAL_RULES};
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

/// Counts each rule with at least one violation once.
#[must_use]
pub fn compliance(violations: &[NormalizedResult]) -> ComplianceSummary {
    let failed: BTreeSet<u32> = violations.iter().map(|v| v.rule_no).collect();
    let failed_rule_count = u32::try_from(failed.len()).unwrap_or(u32::MAX);
    let passed_rule_count = TOTAL_RULES.saturating_sub(failed_rule_count);

    ComplianceSummary {
        total_rules: TOTAL_RULES,
        failed_rule_count,
        passed_rule_count,
        percent: percent_of(passed_rule_count, TOTAL_RULES),
    }
}

/// Rounded percentage, halves rounding up.
fn percent_of(part: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (part * 100 + total / 2) / total
}

/// Every violation instance counts. Highest count first; equal counts are
/// ordered by ascending rule number.
#[must_use]
pub fn frequency(violations: &[NormalizedResult]) -> Vec<FrequencyEntry> {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for v in violations {
        *counts.entry(v.rule_no).or_insert(0) += 1;
    }

    let mut table: Vec<FrequencyEntry> = counts
        .into_iter()
        .map(|(rule_no, count)| FrequencyEntry { rule_no, count })
        .collect();
    table.sort_by_key(|e| Reverse(e.count));
    table
}

//! Exact-duplicate removal.

use crate::types::NormalizedResult;
use std::collections::HashSet;

/// Keeps the first occurrence of each distinct signature, in first-seen order.
#[must_use]
pub fn dedup(results: Vec<NormalizedResult>) -> Vec<NormalizedResult> {
    let mut seen: HashSet<String> = HashSet::with_capacity(results.len());
    results
        .into_iter()
        .filter(|r| seen.insert(r.signature()))
        .collect()
}

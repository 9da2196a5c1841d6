//! Value and tension history reports
//!
//! A user's history is every value (or tension) they ever named, one entry
//! per label. The first occurrence wins: later entries with the same label
//! are dropped even when their definition differs.

use casebook_model::{Case, Entry, Submission};
use std::collections::{BTreeSet, HashSet};

/// Tension labels offered by the facilitation kit
///
/// These are prompts, not participant contributions, and never appear in a
/// tension history.
pub const PREDEFINED_TENSIONS: &[&str] = &[
    "Privacy vs. Transparency",
    "Autonomy vs. Safety",
    "Efficiency vs. Fairness",
    "Individual vs. Collective",
    "Innovation vs. Regulation",
    "Short-term vs. Long-term",
];

/// Tension labels excluded from reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TensionFilter {
    excluded: BTreeSet<String>,
}

impl TensionFilter {
    /// Exclude exactly `labels`
    #[must_use]
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `label` is excluded
    #[inline]
    #[must_use]
    pub fn excludes(&self, label: &str) -> bool {
        self.excluded.contains(label)
    }
}

impl Default for TensionFilter {
    fn default() -> Self {
        Self::new(PREDEFINED_TENSIONS.iter().copied())
    }
}

/// Every distinct value `email` named, in scan order
///
/// `collections` are scanned in the order given, records in stored order.
#[must_use]
pub fn value_history(email: &str, collections: &[&[Submission]]) -> Vec<Entry> {
    collect(email, collections, |case| &case.values, |_| false)
}

/// Every distinct tension `email` named, minus `filter`'s labels
#[must_use]
pub fn tension_history(
    email: &str,
    collections: &[&[Submission]],
    filter: &TensionFilter,
) -> Vec<Entry> {
    collect(
        email,
        collections,
        |case| &case.tensions,
        |entry| filter.excludes(&entry.value),
    )
}

fn collect<P, S>(email: &str, collections: &[&[Submission]], pick: P, skip: S) -> Vec<Entry>
where
    P: Fn(&Case) -> &Vec<Entry>,
    S: Fn(&Entry) -> bool,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    let entries = collections
        .iter()
        .flat_map(|records| records.iter())
        .filter(|sub| sub.belongs_to(email))
        .flat_map(|sub| sub.cases.iter())
        .flat_map(|case| pick(case).iter());

    for entry in entries {
        if entry.value.is_empty() || skip(entry) {
            continue;
        }
        if seen.insert(entry.value.as_str()) {
            out.push(entry.clone());
        }
    }
    out
}

//! ICU classification: active inpatient encounters whose primary diagnosis
//! is in the configured severe-diagnosis code set.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use super::join::JoinedRow;
use crate::models::EncounterClass;

/// A diagnosis code with its ICU occurrence count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosisCount {
    pub diagnosis: String,
    pub count: u64,
}

fn is_icu_row(row: &JoinedRow<'_>, severe_codes: &HashSet<&str>, at: DateTime<Utc>) -> bool {
    row.encounter.class == EncounterClass::Inpatient
        && row.encounter.is_active_at(at)
        && row
            .claim
            .and_then(|c| c.diagnosis_1.as_deref())
            .is_some_and(|code| severe_codes.contains(code))
}

/// Number of ICU-level encounters active at the given instant.
pub fn icu_count_at(rows: &[JoinedRow<'_>], severe_codes: &HashSet<&str>, at: DateTime<Utc>) -> usize {
    rows.iter()
        .filter(|row| is_icu_row(row, severe_codes, at))
        .count()
}

/// Top-N diagnosis codes among ICU-level encounters at the as-of instant.
///
/// Ordering is deterministic: count descending, then code ascending.
pub fn diagnosis_breakdown(
    rows: &[JoinedRow<'_>],
    severe_codes: &HashSet<&str>,
    as_of: DateTime<Utc>,
    top_n: usize,
) -> Vec<DiagnosisCount> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for row in rows {
        if !is_icu_row(row, severe_codes, as_of) {
            continue;
        }
        if let Some(code) = row.claim.and_then(|c| c.diagnosis_1.as_deref()) {
            *counts.entry(code).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(&str, u64)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    ranked
        .into_iter()
        .take(top_n)
        .map(|(code, count)| DiagnosisCount {
            diagnosis: code.to_string(),
            count,
        })
        .collect()
}

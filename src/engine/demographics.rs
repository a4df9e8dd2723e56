//! Demographic profiling of the active inpatient population.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::join::JoinedRow;
use crate::models::EncounterClass;

/// Age bracket labels, in display order (the order also happens to sort
/// lexicographically, so a BTreeMap keeps it).
pub const AGE_BRACKETS: [&str; 5] = ["0-18", "19-35", "36-50", "51-65", "65+"];

/// Bracket for an age in whole years.
pub fn age_bracket(age: i64) -> &'static str {
    match age {
        i64::MIN..=18 => "0-18",
        19..=35 => "19-35",
        36..=50 => "36-50",
        51..=65 => "51-65",
        _ => "65+",
    }
}

/// Age and gender distributions of active inpatients.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemographicProfile {
    pub age_distribution: BTreeMap<String, u64>,
    pub gender_distribution: BTreeMap<String, u64>,
}

/// Profile the active inpatient rows that have a joined patient record.
///
/// Age brackets are always present (zero-seeded); gender keys only appear
/// when observed.
pub fn profile_active_inpatients(
    rows: &[JoinedRow<'_>],
    as_of: DateTime<Utc>,
) -> DemographicProfile {
    let mut profile = DemographicProfile::default();
    for bracket in AGE_BRACKETS {
        profile.age_distribution.insert(bracket.to_string(), 0);
    }

    for row in rows {
        if row.encounter.class != EncounterClass::Inpatient || !row.encounter.is_active_at(as_of) {
            continue;
        }
        let Some(patient) = row.patient else {
            continue;
        };

        let bracket = age_bracket(patient.age_at(as_of));
        *profile.age_distribution.entry(bracket.to_string()).or_insert(0) += 1;
        *profile
            .gender_distribution
            .entry(patient.gender.label().to_string())
            .or_insert(0) += 1;
    }

    profile
}

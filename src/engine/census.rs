//! Point-in-time census: partition encounters into active/inactive at the
//! as-of instant and count the active ones per class.

use chrono::{DateTime, Utc};

use crate::models::{Encounter, EncounterClass};

/// Active-encounter counts at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Census {
    pub emergency: usize,
    pub outpatient: usize,
    pub inpatient: usize,
    pub other: usize,
}

impl Census {
    pub fn total_active(&self) -> usize {
        self.emergency + self.outpatient + self.inpatient + self.other
    }
}

/// Count active encounters per class. `inpatient` is the occupancy
/// denominator used by the capacity and staffing estimators.
pub fn compute_census(encounters: &[&Encounter], as_of: DateTime<Utc>) -> Census {
    let mut census = Census::default();
    for encounter in encounters {
        if !encounter.is_active_at(as_of) {
            continue;
        }
        match encounter.class {
            EncounterClass::Emergency => census.emergency += 1,
            EncounterClass::Outpatient => census.outpatient += 1,
            EncounterClass::Inpatient => census.inpatient += 1,
            EncounterClass::Other => census.other += 1,
        }
    }
    census
}

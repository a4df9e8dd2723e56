use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Class of an encounter as reported by the source system.
///
/// Anything outside the three classes the dashboard reports on is folded
/// into [`EncounterClass::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncounterClass {
    Inpatient,
    Outpatient,
    Emergency,
    Other,
}

impl EncounterClass {
    /// Parse the raw `ENCOUNTERCLASS` column value.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "inpatient" => EncounterClass::Inpatient,
            "outpatient" => EncounterClass::Outpatient,
            "emergency" => EncounterClass::Emergency,
            _ => EncounterClass::Other,
        }
    }
}

/// A single hospital encounter (admission, visit, or emergency contact).
///
/// Invariant: `stop` is `None` (encounter ongoing) or `stop >= start`. The
/// loader drops rows that violate it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Encounter {
    pub id: String,
    pub patient_id: String,
    pub organization: String,
    pub class: EncounterClass,
    pub start: DateTime<Utc>,
    pub stop: Option<DateTime<Utc>>,
    pub total_claim_cost: f64,
    pub base_encounter_cost: f64,
    pub payer_coverage: f64,
}

impl Encounter {
    /// Whether the as-of instant falls inside `[start, stop]`, with `stop`
    /// open-ended when missing.
    pub fn is_active_at(&self, as_of: DateTime<Utc>) -> bool {
        self.start <= as_of && self.stop.is_none_or(|stop| stop >= as_of)
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Administrative gender as recorded in the patient table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Parse the raw `GENDER` column value (`M`/`F` in the reference data).
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "M" | "m" => Gender::Male,
            "F" | "f" => Gender::Female,
            _ => Gender::Other,
        }
    }

    /// Label used in distribution maps, matching the source table's coding.
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
            Gender::Other => "Other",
        }
    }
}

/// A patient master record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub birthdate: NaiveDate,
    pub gender: Gender,
    pub race: String,
    pub state: String,
    pub healthcare_expenses: f64,
}

impl Patient {
    /// Age in whole years at the given instant: `floor(days / 365)`.
    ///
    /// Clamped at zero for birthdates recorded after the as-of date.
    pub fn age_at(&self, as_of: DateTime<Utc>) -> i64 {
        ((as_of.date_naive() - self.birthdate).num_days() / 365).max(0)
    }
}

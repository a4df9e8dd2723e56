//! Filter & join stage: hospital filtering, as-of resolution, and the
//! three-way Encounter ⋈ Claim ⋈ Patient view every downstream stage reads.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use super::error::EngineError;
use crate::config::JoinMode;
use crate::data::Tables;
use crate::models::{Claim, Clock, Encounter, Patient};

/// Sentinel accepted by the API for "every organization".
pub const ALL_HOSPITALS: &str = "All";

/// Which organizations a request covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HospitalFilter {
    All,
    Organization(String),
}

impl HospitalFilter {
    /// Interpret the raw `hospital` query parameter.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            None => HospitalFilter::All,
            Some(s) if s.trim().is_empty() || s.trim() == ALL_HOSPITALS => HospitalFilter::All,
            Some(s) => HospitalFilter::Organization(s.trim().to_string()),
        }
    }

    pub fn matches(&self, organization: &str) -> bool {
        match self {
            HospitalFilter::All => true,
            HospitalFilter::Organization(org) => org == organization,
        }
    }
}

/// Resolve the as-of instant exactly once per request.
///
/// Accepts an RFC 3339 datetime or a plain `YYYY-MM-DD` date (midnight UTC,
/// matching the source system's behavior for date-only filters). Absent
/// input falls back to the injected clock. The returned value is threaded
/// through every stage so one request can never observe two different nows.
pub fn resolve_as_of(raw: Option<&str>, clock: &dyn Clock) -> Result<DateTime<Utc>, EngineError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(clock.now());
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    Err(EngineError::InvalidDate {
        input: raw.to_string(),
    })
}

/// One row of the joined view. Claims join on the shared encounter id key
/// space; patients on `patient_id`. Both legs are best-effort references
/// into the snapshot, never copies.
#[derive(Debug, Clone, Copy)]
pub struct JoinedRow<'a> {
    pub encounter: &'a Encounter,
    pub claim: Option<&'a Claim>,
    pub patient: Option<&'a Patient>,
}

/// Organization-filtered encounters, in table order.
pub fn filter_encounters<'a>(tables: &'a Tables, filter: &HospitalFilter) -> Vec<&'a Encounter> {
    tables
        .encounters
        .iter()
        .filter(|e| filter.matches(&e.organization))
        .collect()
}

/// Build the joined view over already-filtered encounters.
///
/// `JoinMode::Left` keeps encounters without a claim row; `JoinMode::Inner`
/// drops them. The patient leg is always attached when present.
pub fn join_records<'a>(
    tables: &'a Tables,
    encounters: &[&'a Encounter],
    mode: JoinMode,
) -> Vec<JoinedRow<'a>> {
    let claims_by_id: HashMap<&str, &Claim> = tables
        .claims
        .iter()
        .map(|c| (c.id.as_str(), c))
        .collect();
    let patients_by_id: HashMap<&str, &Patient> = tables
        .patients
        .iter()
        .map(|p| (p.id.as_str(), p))
        .collect();

    encounters
        .iter()
        .copied()
        .filter_map(|encounter| {
            let claim = claims_by_id.get(encounter.id.as_str()).copied();
            if mode == JoinMode::Inner && claim.is_none() {
                return None;
            }
            Some(JoinedRow {
                encounter,
                claim,
                patient: patients_by_id.get(encounter.patient_id.as_str()).copied(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FixedClock;
    use chrono::TimeZone;

    #[test]
    fn test_hospital_filter_from_param() {
        assert_eq!(HospitalFilter::from_param(None), HospitalFilter::All);
        assert_eq!(HospitalFilter::from_param(Some("All")), HospitalFilter::All);
        assert_eq!(HospitalFilter::from_param(Some("  ")), HospitalFilter::All);
        assert_eq!(
            HospitalFilter::from_param(Some("org-a")),
            HospitalFilter::Organization("org-a".to_string())
        );
    }

    #[test]
    fn test_resolve_as_of_datetime() {
        let clock = FixedClock(Utc.with_ymd_and_hms(2025, 3, 17, 0, 0, 0).unwrap());
        let as_of = resolve_as_of(Some("2025-01-06T12:30:00Z"), &clock).unwrap();
        assert_eq!(as_of, Utc.with_ymd_and_hms(2025, 1, 6, 12, 30, 0).unwrap());
    }

    #[test]
    fn test_resolve_as_of_date_only_is_midnight_utc() {
        let clock = FixedClock(Utc.with_ymd_and_hms(2025, 3, 17, 0, 0, 0).unwrap());
        let as_of = resolve_as_of(Some("2025-01-06"), &clock).unwrap();
        assert_eq!(as_of, Utc.with_ymd_and_hms(2025, 1, 6, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_resolve_as_of_defaults_to_clock() {
        let now = Utc.with_ymd_and_hms(2025, 3, 17, 9, 0, 0).unwrap();
        let clock = FixedClock(now);
        assert_eq!(resolve_as_of(None, &clock).unwrap(), now);
        assert_eq!(resolve_as_of(Some(""), &clock).unwrap(), now);
    }

    #[test]
    fn test_resolve_as_of_rejects_garbage() {
        let clock = FixedClock(Utc.with_ymd_and_hms(2025, 3, 17, 0, 0, 0).unwrap());
        let err = resolve_as_of(Some("next tuesday"), &clock).unwrap_err();
        assert!(err.to_string().contains("next tuesday"));
    }
}

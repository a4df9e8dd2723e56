//! Staffing estimation from distinct provider counts.
//!
//! The multipliers are deployment configuration, not clinical truth; the
//! reference deployment approximates one doctor per provider, three nurses,
//! and half a specialist.

use std::collections::HashSet;

use super::join::JoinedRow;
use crate::config::EngineConfig;

/// Estimated staff counts and coverage ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaffingEstimate {
    pub doctors: u64,
    pub nurses: u64,
    pub specialists: u64,
    /// `(doctors + nurses) / active_inpatient`; `0.0` with no inpatients.
    pub staff_to_patient_ratio: f64,
}

/// Derive staffing from the distinct provider ids present in the joined
/// view's claims.
pub fn estimate_staffing(
    rows: &[JoinedRow<'_>],
    cfg: &EngineConfig,
    active_inpatient: usize,
) -> StaffingEstimate {
    let providers: HashSet<&str> = rows
        .iter()
        .filter_map(|row| row.claim.map(|c| c.provider_id.as_str()))
        .filter(|id| !id.is_empty())
        .collect();
    let provider_count = providers.len() as f64;

    let doctors = (provider_count * cfg.doctor_ratio).round() as u64;
    let nurses = (provider_count * cfg.nurse_ratio).round() as u64;
    let specialists = (provider_count * cfg.specialist_ratio).round() as u64;

    let staff_to_patient_ratio = if active_inpatient > 0 {
        (doctors + nurses) as f64 / active_inpatient as f64
    } else {
        0.0
    };

    StaffingEstimate {
        doctors,
        nurses,
        specialists,
        staff_to_patient_ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Claim, Encounter, EncounterClass};
    use chrono::{TimeZone, Utc};

    fn encounter(id: &str) -> Encounter {
        Encounter {
            id: id.to_string(),
            patient_id: format!("p-{id}"),
            organization: "org-a".to_string(),
            class: EncounterClass::Inpatient,
            start: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            stop: None,
            total_claim_cost: 0.0,
            base_encounter_cost: 0.0,
            payer_coverage: 0.0,
        }
    }

    fn claim(id: &str, provider: &str) -> Claim {
        Claim {
            id: id.to_string(),
            diagnosis_1: None,
            provider_id: provider.to_string(),
        }
    }

    #[test]
    fn test_distinct_providers_drive_counts() {
        let cfg = EngineConfig::default();
        let encounters: Vec<Encounter> = (0..4).map(|i| encounter(&i.to_string())).collect();
        // Two distinct providers across four claims.
        let claims = vec![
            claim("0", "prov-a"),
            claim("1", "prov-a"),
            claim("2", "prov-b"),
            claim("3", "prov-b"),
        ];
        let rows: Vec<JoinedRow> = encounters
            .iter()
            .zip(claims.iter())
            .map(|(e, c)| JoinedRow { encounter: e, claim: Some(c), patient: None })
            .collect();

        let staffing = estimate_staffing(&rows, &cfg, 4);
        assert_eq!(staffing.doctors, 2);
        assert_eq!(staffing.nurses, 6);
        assert_eq!(staffing.specialists, 1);
        assert!((staffing.staff_to_patient_ratio - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_inpatients_zero_ratio() {
        let cfg = EngineConfig::default();
        let e = encounter("0");
        let c = claim("0", "prov-a");
        let rows = vec![JoinedRow { encounter: &e, claim: Some(&c), patient: None }];

        let staffing = estimate_staffing(&rows, &cfg, 0);
        assert_eq!(staffing.staff_to_patient_ratio, 0.0);
        assert_eq!(staffing.doctors, 1);
    }

    #[test]
    fn test_empty_provider_ids_ignored() {
        let cfg = EngineConfig::default();
        let e = encounter("0");
        let c = claim("0", "");
        let rows = vec![JoinedRow { encounter: &e, claim: Some(&c), patient: None }];

        let staffing = estimate_staffing(&rows, &cfg, 1);
        assert_eq!(staffing.doctors, 0);
        assert_eq!(staffing.nurses, 0);
        assert_eq!(staffing.staff_to_patient_ratio, 0.0);
    }

    #[test]
    fn test_no_rows_all_zero() {
        let cfg = EngineConfig::default();
        let staffing = estimate_staffing(&[], &cfg, 0);
        assert_eq!(staffing.doctors, 0);
        assert_eq!(staffing.nurses, 0);
        assert_eq!(staffing.specialists, 0);
        assert_eq!(staffing.staff_to_patient_ratio, 0.0);
    }
}

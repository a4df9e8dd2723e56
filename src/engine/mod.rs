//! Resource Utilization & Forecasting Engine.
//!
//! The pipeline runs strictly sequentially per request over one immutable
//! table snapshot:
//!
//! ```text
//! filter/join ──► census ──► { icu, capacity, staffing, demographics,
//!                              trends ──► forecast } ──► report
//! ```
//!
//! The as-of instant is resolved once (see [`join::resolve_as_of`]) and
//! threaded through every stage; no stage reads the clock or mutates shared
//! state, so concurrent requests need no coordination.

pub mod arima;
pub mod capacity;
pub mod census;
pub mod demographics;
pub mod error;
pub mod forecast;
pub mod icu;
pub mod join;
pub mod report;
pub mod staffing;
pub mod trends;

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::config::EngineConfig;
use crate::data::Tables;

pub use error::EngineError;
pub use forecast::{ForecastOutcome, ForecastPoint, ForecastState};
pub use join::{resolve_as_of, HospitalFilter, JoinedRow, ALL_HOSPITALS};
pub use report::{
    DemographicsReport, DiagnosisEntry, ForecastEntry, StaffingReport, TrendPoint,
    UtilizationReport,
};

use report::round2;

/// Number of diagnosis codes reported in the breakdown.
const TOP_DIAGNOSES: usize = 5;

/// Run the full pipeline and assemble the response.
///
/// Pure CPU work over the snapshot; callers on an async runtime should wrap
/// it in `spawn_blocking` since the model fit can take a while on long
/// windows.
pub fn build_utilization_report(
    tables: &Tables,
    cfg: &EngineConfig,
    hospital: &HospitalFilter,
    as_of: DateTime<Utc>,
) -> UtilizationReport {
    let encounters = join::filter_encounters(tables, hospital);
    let rows = join::join_records(tables, &encounters, cfg.join_mode);
    let severe_codes: HashSet<&str> = cfg
        .severe_diagnosis_codes
        .iter()
        .map(String::as_str)
        .collect();

    let census = census::compute_census(&encounters, as_of);
    let icu_occupied = icu::icu_count_at(&rows, &severe_codes, as_of);
    let diagnosis_breakdown =
        icu::diagnosis_breakdown(&rows, &severe_codes, as_of, TOP_DIAGNOSES);
    let bed_capacity = capacity::estimate_capacity(
        &tables.encounters,
        hospital,
        cfg.bed_scaling_factor,
        census.inpatient,
    );
    let staffing = staffing::estimate_staffing(&rows, cfg, census.inpatient);
    let profile = demographics::profile_active_inpatients(&rows, as_of);
    let admissions = trends::daily_admissions(&encounters, as_of, cfg.trend_window_days);
    let icu_history =
        trends::daily_icu_occupancy(&rows, &severe_codes, as_of, cfg.trend_window_days);
    let forecast = forecast::forecast_icu_demand(
        &icu_history,
        icu_occupied,
        as_of.date_naive(),
        cfg.min_observations,
        cfg.forecast_horizon_days,
    );

    UtilizationReport {
        total_beds: bed_capacity.total_beds,
        available_beds: bed_capacity.available_beds,
        icu_beds_occupied: icu_occupied as u64,
        occupancy_rate: round2(bed_capacity.occupancy_rate),
        emergency_visits: census.emergency as u64,
        outpatient_visits: census.outpatient as u64,
        staffing: StaffingReport {
            doctors: staffing.doctors,
            nurses: staffing.nurses,
            specialists: staffing.specialists,
            staff_to_patient_ratio: round2(staffing.staff_to_patient_ratio),
        },
        diagnosis_breakdown: diagnosis_breakdown
            .into_iter()
            .map(|d| DiagnosisEntry {
                diagnosis: d.diagnosis,
                count: d.count,
            })
            .collect(),
        demographics: DemographicsReport {
            age_distribution: profile.age_distribution,
            gender_distribution: profile.gender_distribution,
        },
        trends: admissions
            .into_iter()
            .map(|p| TrendPoint {
                date: p.date,
                patients: p.count,
            })
            .collect(),
        forecast: forecast
            .points
            .into_iter()
            .map(|p| ForecastEntry {
                day: p.date,
                predicted_icu_patients: p.predicted,
            })
            .collect(),
    }
}

//! Wire types for the resource-utilization response.
//!
//! Field names follow the dashboard contract verbatim (serde renames), so
//! the frontend consumes the payload without a mapping layer.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Complete resource-utilization response for one hospital scope and as-of
/// instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UtilizationReport {
    #[serde(rename = "Total_Beds")]
    pub total_beds: u64,
    #[serde(rename = "Available_Beds")]
    pub available_beds: u64,
    #[serde(rename = "ICU_Beds_Occupied")]
    pub icu_beds_occupied: u64,
    /// Percentage, rounded to 2 decimals.
    #[serde(rename = "Occupancy_Rate")]
    pub occupancy_rate: f64,
    #[serde(rename = "Emergency_Visits")]
    pub emergency_visits: u64,
    #[serde(rename = "Outpatient_Visits")]
    pub outpatient_visits: u64,
    #[serde(rename = "Staffing")]
    pub staffing: StaffingReport,
    #[serde(rename = "Diagnosis_Breakdown")]
    pub diagnosis_breakdown: Vec<DiagnosisEntry>,
    #[serde(rename = "Demographics")]
    pub demographics: DemographicsReport,
    #[serde(rename = "Trends")]
    pub trends: Vec<TrendPoint>,
    #[serde(rename = "Forecast")]
    pub forecast: Vec<ForecastEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffingReport {
    #[serde(rename = "Doctors")]
    pub doctors: u64,
    #[serde(rename = "Nurses")]
    pub nurses: u64,
    #[serde(rename = "Specialists")]
    pub specialists: u64,
    #[serde(rename = "StaffToPatientRatio")]
    pub staff_to_patient_ratio: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisEntry {
    #[serde(rename = "Diagnosis")]
    pub diagnosis: String,
    #[serde(rename = "Count")]
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemographicsReport {
    #[serde(rename = "Age_Distribution")]
    pub age_distribution: BTreeMap<String, u64>,
    #[serde(rename = "Gender_Distribution")]
    pub gender_distribution: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Patients")]
    pub patients: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Calendar date of the projected day (`as_of + 1 ..= as_of + horizon`).
    #[serde(rename = "Day")]
    pub day: NaiveDate,
    #[serde(rename = "PredictedICUPatients")]
    pub predicted_icu_patients: u64,
}

/// Round to 2 decimals for presentation.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

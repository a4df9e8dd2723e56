//! Data Transfer Objects for the HTTP API.
//!
//! The resource-utilization payload types live in [`crate::engine::report`]
//! and are re-exported here; this module adds the request/query types and
//! the smaller pass-through responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use crate::engine::report::{
    DemographicsReport, DiagnosisEntry, ForecastEntry, StaffingReport, TrendPoint,
    UtilizationReport,
};

/// Query parameters for the resource-utilization endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UtilizationQuery {
    /// Organization identifier, or "All" (the default).
    #[serde(default)]
    pub hospital: Option<String>,
    /// ISO-8601 date or datetime; defaults to the server clock's now.
    #[serde(default)]
    pub date: Option<String>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// SHA-256 fingerprint of the loaded dataset.
    pub dataset_fingerprint: String,
    pub encounters: usize,
    pub claims: usize,
    pub patients: usize,
}

/// Network-wide headline numbers for the dashboard landing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_patients: usize,
    pub active_encounters: usize,
    pub total_claims_cost: f64,
}

/// Whole-population distributions for the demographics page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientDemographics {
    pub gender_distribution: BTreeMap<String, u64>,
    pub age_distribution: BTreeMap<String, u64>,
    pub race_distribution: BTreeMap<String, u64>,
}

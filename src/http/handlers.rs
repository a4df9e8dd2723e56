//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint, grabs one table snapshot,
//! and delegates to the engine for business logic.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use axum::{
    extract::{Query, State},
    Json,
};

use super::dto::{
    DashboardStats, HealthResponse, PatientDemographics, UtilizationQuery, UtilizationReport,
};
use super::error::AppError;
use super::state::AppState;
use crate::engine::{self, demographics, HospitalFilter, ALL_HOSPITALS};
use crate::engine::report::round2;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Verify the service is running and report which dataset snapshot it
/// serves.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let tables = state.provider.tables();
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        dataset_fingerprint: tables.fingerprint.clone(),
        encounters: tables.encounters.len(),
        claims: tables.claims.len(),
        patients: tables.patients.len(),
    }))
}

// =============================================================================
// Resource Utilization (the core endpoint)
// =============================================================================

/// GET /v1/resource-utilization?hospital=..&date=..
///
/// Point-in-time census, capacity/staffing estimates, trends, and the ICU
/// demand forecast for the selected hospital scope.
pub async fn resource_utilization(
    State(state): State<AppState>,
    Query(query): Query<UtilizationQuery>,
) -> HandlerResult<UtilizationReport> {
    let hospital = HospitalFilter::from_param(query.hospital.as_deref());
    // Resolved once here; every stage downstream sees this exact instant.
    let as_of = engine::resolve_as_of(query.date.as_deref(), state.clock.as_ref())?;

    let tables = state.provider.tables();
    let config = state.config.clone();

    // The ARIMA fit is CPU-bound; keep it off the async worker threads.
    let report = tokio::task::spawn_blocking(move || {
        engine::build_utilization_report(&tables, &config.engine, &hospital, as_of)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;

    Ok(Json(report))
}

// =============================================================================
// Pass-through aggregates
// =============================================================================

/// GET /v1/hospitals
///
/// "All" plus the sorted distinct organizations present in the encounter
/// table, for the dashboard's filter dropdown.
pub async fn list_hospitals(State(state): State<AppState>) -> HandlerResult<Vec<String>> {
    let tables = state.provider.tables();
    let organizations: BTreeSet<&str> = tables
        .encounters
        .iter()
        .map(|e| e.organization.as_str())
        .filter(|org| !org.is_empty())
        .collect();

    let mut hospitals = Vec::with_capacity(organizations.len() + 1);
    hospitals.push(ALL_HOSPITALS.to_string());
    hospitals.extend(organizations.into_iter().map(String::from));
    Ok(Json(hospitals))
}

/// GET /v1/dashboard-stats
///
/// Headline numbers: patient count, encounters active right now, and total
/// claims cost.
pub async fn dashboard_stats(State(state): State<AppState>) -> HandlerResult<DashboardStats> {
    let tables = state.provider.tables();
    let now = state.clock.now();

    let active_encounters = tables
        .encounters
        .iter()
        .filter(|e| e.is_active_at(now))
        .count();
    let total_claims_cost: f64 = tables.encounters.iter().map(|e| e.total_claim_cost).sum();

    Ok(Json(DashboardStats {
        total_patients: tables.patients.len(),
        active_encounters,
        total_claims_cost: round2(total_claims_cost),
    }))
}

/// GET /v1/patient-demographics
///
/// Gender, age-bracket, and race distributions over the whole patient
/// table.
pub async fn patient_demographics(
    State(state): State<AppState>,
) -> HandlerResult<PatientDemographics> {
    let tables = state.provider.tables();
    let now = state.clock.now();

    let mut gender: BTreeMap<String, u64> = BTreeMap::new();
    let mut age: BTreeMap<String, u64> = BTreeMap::new();
    let mut race: BTreeMap<String, u64> = BTreeMap::new();
    for bracket in demographics::AGE_BRACKETS {
        age.insert(bracket.to_string(), 0);
    }

    for patient in &tables.patients {
        *gender.entry(patient.gender.label().to_string()).or_insert(0) += 1;
        *age.entry(demographics::age_bracket(patient.age_at(now)).to_string())
            .or_insert(0) += 1;
        if !patient.race.is_empty() {
            *race.entry(patient.race.clone()).or_insert(0) += 1;
        }
    }

    Ok(Json(PatientDemographics {
        gender_distribution: gender,
        age_distribution: age,
        race_distribution: race,
    }))
}

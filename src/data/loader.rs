//! CSV loading for the three source tables.
//!
//! Files are read into a Polars DataFrame and immediately converted to typed
//! records; nothing downstream touches a dataframe. Column types are
//! normalized with explicit casts because schema inference can disagree with
//! the expected types (numeric diagnosis codes, integer-looking costs,
//! all-null STOP columns).

use std::fs;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use polars::prelude::*;
use tracing::{info, warn};

use super::error::DataError;
use super::fingerprint::dataset_fingerprint;
use super::provider::Tables;
use crate::models::{Claim, Encounter, EncounterClass, Gender, Patient};

pub const ENCOUNTERS_FILE: &str = "encounters.csv";
pub const CLAIMS_FILE: &str = "claims.csv";
pub const PATIENTS_FILE: &str = "patients.csv";

/// Load all three tables from a directory of Synthea-style CSV exports.
pub fn load_tables(dir: &Path) -> Result<Tables, DataError> {
    let encounters_path = dir.join(ENCOUNTERS_FILE);
    let claims_path = dir.join(CLAIMS_FILE);
    let patients_path = dir.join(PATIENTS_FILE);

    let mut raw_bytes = Vec::with_capacity(3);
    for path in [&encounters_path, &claims_path, &patients_path] {
        raw_bytes.push(fs::read(path).map_err(|e| DataError::Io {
            path: path.clone(),
            source: e,
        })?);
    }
    let fingerprint = dataset_fingerprint(&raw_bytes);

    let encounters_df = read_csv(
        &encounters_path,
        &["Id", "PATIENT", "ORGANIZATION", "ENCOUNTERCLASS", "START", "STOP"],
        &["TOTAL_CLAIM_COST", "BASE_ENCOUNTER_COST", "PAYER_COVERAGE"],
    )?;
    let claims_df = read_csv(&claims_path, &["Id", "DIAGNOSIS1", "PROVIDERID"], &[])?;
    let patients_df = read_csv(
        &patients_path,
        &["Id", "BIRTHDATE", "GENDER", "RACE", "STATE"],
        &["HEALTHCARE_EXPENSES"],
    )?;

    let encounters = encounters_from_dataframe(&encounters_df)?;
    let claims = claims_from_dataframe(&claims_df)?;
    let patients = patients_from_dataframe(&patients_df)?;

    info!(
        encounters = encounters.len(),
        claims = claims.len(),
        patients = patients.len(),
        fingerprint = %fingerprint,
        "loaded tables from {}",
        dir.display()
    );

    Ok(Tables {
        encounters,
        claims,
        patients,
        fingerprint,
    })
}

/// Parse a CSV file and normalize the columns we read to expected types.
fn read_csv(
    path: &Path,
    string_columns: &[&str],
    float_columns: &[&str],
) -> Result<DataFrame, DataError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_ignore_errors(true)
        .try_into_reader_with_file_path(Some(path.into()))
        .map_err(|e| csv_error(path, e))?
        .finish()
        .map_err(|e| csv_error(path, e))?;

    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    // Cast columns to expected types if they were inferred differently.
    let mut lazy_df = df.lazy();
    for name in string_columns {
        if names.iter().any(|n| n == name) {
            lazy_df = lazy_df.with_column(col(*name).cast(DataType::String));
        }
    }
    for name in float_columns {
        if names.iter().any(|n| n == name) {
            lazy_df = lazy_df.with_column(col(*name).cast(DataType::Float64));
        }
    }

    lazy_df.collect().map_err(|e| csv_error(path, e))
}

fn csv_error(path: &Path, e: PolarsError) -> DataError {
    DataError::Csv {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

fn str_column<'a>(
    df: &'a DataFrame,
    table: &'static str,
    column: &'static str,
) -> Result<&'a StringChunked, DataError> {
    df.column(column)
        .map_err(|_| DataError::MissingColumn { table, column })?
        .str()
        .map_err(|_| DataError::MissingColumn { table, column })
}

fn f64_column<'a>(
    df: &'a DataFrame,
    table: &'static str,
    column: &'static str,
) -> Result<&'a Float64Chunked, DataError> {
    df.column(column)
        .map_err(|_| DataError::MissingColumn { table, column })?
        .f64()
        .map_err(|_| DataError::MissingColumn { table, column })
}

fn encounters_from_dataframe(df: &DataFrame) -> Result<Vec<Encounter>, DataError> {
    let ids = str_column(df, "encounters", "Id")?;
    let patient_ids = str_column(df, "encounters", "PATIENT")?;
    let organizations = str_column(df, "encounters", "ORGANIZATION")?;
    let classes = str_column(df, "encounters", "ENCOUNTERCLASS")?;
    let starts = str_column(df, "encounters", "START")?;
    let stops = str_column(df, "encounters", "STOP")?;
    let total_costs = f64_column(df, "encounters", "TOTAL_CLAIM_COST")?;
    let base_costs = f64_column(df, "encounters", "BASE_ENCOUNTER_COST")?;
    let coverages = f64_column(df, "encounters", "PAYER_COVERAGE")?;

    let mut encounters = Vec::with_capacity(df.height());
    let mut skipped = 0usize;
    for i in 0..df.height() {
        let (Some(id), Some(start_raw)) = (ids.get(i), starts.get(i)) else {
            skipped += 1;
            continue;
        };
        let Some(start) = parse_timestamp(start_raw) else {
            skipped += 1;
            continue;
        };
        let stop = stops.get(i).and_then(parse_timestamp);
        // stop < start breaks the interval invariant every census query
        // relies on.
        if stop.is_some_and(|s| s < start) {
            skipped += 1;
            continue;
        }

        encounters.push(Encounter {
            id: id.to_string(),
            patient_id: patient_ids.get(i).unwrap_or_default().to_string(),
            organization: organizations.get(i).unwrap_or_default().to_string(),
            class: EncounterClass::parse(classes.get(i).unwrap_or_default()),
            start,
            stop,
            total_claim_cost: total_costs.get(i).unwrap_or(0.0),
            base_encounter_cost: base_costs.get(i).unwrap_or(0.0),
            payer_coverage: coverages.get(i).unwrap_or(0.0),
        });
    }
    if skipped > 0 {
        warn!(skipped, "dropped encounter rows with missing ids or inconsistent timestamps");
    }

    Ok(encounters)
}

fn claims_from_dataframe(df: &DataFrame) -> Result<Vec<Claim>, DataError> {
    let ids = str_column(df, "claims", "Id")?;
    let diagnoses = str_column(df, "claims", "DIAGNOSIS1")?;
    let providers = str_column(df, "claims", "PROVIDERID")?;

    let mut claims = Vec::with_capacity(df.height());
    let mut skipped = 0usize;
    for i in 0..df.height() {
        let Some(id) = ids.get(i) else {
            skipped += 1;
            continue;
        };
        claims.push(Claim {
            id: id.to_string(),
            diagnosis_1: diagnoses
                .get(i)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from),
            provider_id: providers.get(i).unwrap_or_default().to_string(),
        });
    }
    if skipped > 0 {
        warn!(skipped, "dropped claim rows without an id");
    }

    Ok(claims)
}

fn patients_from_dataframe(df: &DataFrame) -> Result<Vec<Patient>, DataError> {
    let ids = str_column(df, "patients", "Id")?;
    let birthdates = str_column(df, "patients", "BIRTHDATE")?;
    let genders = str_column(df, "patients", "GENDER")?;
    let races = str_column(df, "patients", "RACE")?;
    let states = str_column(df, "patients", "STATE")?;
    let expenses = f64_column(df, "patients", "HEALTHCARE_EXPENSES")?;

    let mut patients = Vec::with_capacity(df.height());
    let mut skipped = 0usize;
    for i in 0..df.height() {
        let (Some(id), Some(birth_raw)) = (ids.get(i), birthdates.get(i)) else {
            skipped += 1;
            continue;
        };
        let Ok(birthdate) = NaiveDate::parse_from_str(birth_raw, "%Y-%m-%d") else {
            skipped += 1;
            continue;
        };
        patients.push(Patient {
            id: id.to_string(),
            birthdate,
            gender: Gender::parse(genders.get(i).unwrap_or_default()),
            race: races.get(i).unwrap_or_default().to_string(),
            state: states.get(i).unwrap_or_default().to_string(),
            healthcare_expenses: expenses.get(i).unwrap_or(0.0),
        });
    }
    if skipped > 0 {
        warn!(skipped, "dropped patient rows without an id or parseable birthdate");
    }

    Ok(patients)
}

/// Parse an encounter timestamp. The provider contract is UTC (or an
/// explicit offset); date-only values resolve to midnight UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

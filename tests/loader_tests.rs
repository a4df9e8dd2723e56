//! CSV loader tests against real files on disk.

use std::fs;
use std::path::Path;

use chrono::{TimeZone, Utc};
use tempfile::tempdir;

use careops::data::{load_tables, DataError};
use careops::models::{EncounterClass, Gender};

const ENCOUNTERS_HEADER: &str =
    "Id,START,STOP,PATIENT,ORGANIZATION,ENCOUNTERCLASS,BASE_ENCOUNTER_COST,TOTAL_CLAIM_COST,PAYER_COVERAGE";
const CLAIMS_HEADER: &str = "Id,PATIENTID,PROVIDERID,DIAGNOSIS1";
const PATIENTS_HEADER: &str = "Id,BIRTHDATE,GENDER,RACE,STATE,HEALTHCARE_EXPENSES";

fn write_dataset(dir: &Path, encounters: &[&str], claims: &[&str], patients: &[&str]) {
    let mut enc = vec![ENCOUNTERS_HEADER];
    enc.extend_from_slice(encounters);
    fs::write(dir.join("encounters.csv"), enc.join("\n")).unwrap();

    let mut cl = vec![CLAIMS_HEADER];
    cl.extend_from_slice(claims);
    fs::write(dir.join("claims.csv"), cl.join("\n")).unwrap();

    let mut pat = vec![PATIENTS_HEADER];
    pat.extend_from_slice(patients);
    fs::write(dir.join("patients.csv"), pat.join("\n")).unwrap();
}

#[test]
fn test_load_happy_path() {
    let dir = tempdir().unwrap();
    write_dataset(
        dir.path(),
        &[
            "e1,2025-01-05T09:00:00Z,2025-01-10T12:00:00Z,p1,org-a,inpatient,80.0,129.16,60.0",
            "e2,2025-01-06T10:00:00Z,,p2,org-a,emergency,120,350,100",
        ],
        &["e1,p1,prov-1,233604007", "e2,p2,prov-2,"],
        &[
            "p1,1950-06-15,F,white,Massachusetts,12000.5",
            "p2,1990-01-02,M,black,Massachusetts,800",
        ],
    );

    let tables = load_tables(dir.path()).unwrap();

    assert_eq!(tables.encounters.len(), 2);
    assert_eq!(tables.claims.len(), 2);
    assert_eq!(tables.patients.len(), 2);
    assert!(!tables.fingerprint.is_empty());

    let e1 = &tables.encounters[0];
    assert_eq!(e1.id, "e1");
    assert_eq!(e1.class, EncounterClass::Inpatient);
    assert_eq!(e1.start, Utc.with_ymd_and_hms(2025, 1, 5, 9, 0, 0).unwrap());
    assert_eq!(
        e1.stop,
        Some(Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap())
    );
    assert!((e1.total_claim_cost - 129.16).abs() < 1e-9);

    // Empty STOP means the encounter is still open.
    let e2 = &tables.encounters[1];
    assert_eq!(e2.stop, None);
    assert_eq!(e2.class, EncounterClass::Emergency);
    // Integer-looking costs still come through as floats.
    assert!((e2.total_claim_cost - 350.0).abs() < 1e-9);

    // Numeric diagnosis codes load as strings; empty ones as None.
    assert_eq!(tables.claims[0].diagnosis_1.as_deref(), Some("233604007"));
    assert_eq!(tables.claims[1].diagnosis_1, None);
    assert_eq!(tables.claims[0].provider_id, "prov-1");

    let p1 = &tables.patients[0];
    assert_eq!(p1.gender, Gender::Female);
    assert_eq!(p1.birthdate.to_string(), "1950-06-15");
    assert!((p1.healthcare_expenses - 12000.5).abs() < 1e-9);
}

#[test]
fn test_rows_violating_interval_invariant_are_dropped() {
    let dir = tempdir().unwrap();
    write_dataset(
        dir.path(),
        &[
            // stop before start: must not survive the load.
            "e1,2025-01-10T00:00:00Z,2025-01-05T00:00:00Z,p1,org-a,inpatient,1,1,0",
            "e2,2025-01-05T00:00:00Z,2025-01-10T00:00:00Z,p1,org-a,inpatient,1,1,0",
        ],
        &[],
        &["p1,1950-06-15,F,white,Massachusetts,0"],
    );

    let tables = load_tables(dir.path()).unwrap();
    assert_eq!(tables.encounters.len(), 1);
    assert_eq!(tables.encounters[0].id, "e2");
}

#[test]
fn test_unparseable_rows_are_dropped_not_fatal() {
    let dir = tempdir().unwrap();
    write_dataset(
        dir.path(),
        &[
            "e1,not-a-date,,p1,org-a,inpatient,1,1,0",
            "e2,2025-01-05T00:00:00Z,,p1,org-a,inpatient,1,1,0",
        ],
        &[],
        &[
            "p1,never,F,white,Massachusetts,0",
            "p2,1990-01-02,M,white,Massachusetts,0",
        ],
    );

    let tables = load_tables(dir.path()).unwrap();
    assert_eq!(tables.encounters.len(), 1);
    assert_eq!(tables.patients.len(), 1);
    assert_eq!(tables.patients[0].id, "p2");
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    // Only encounters present.
    fs::write(
        dir.path().join("encounters.csv"),
        format!("{ENCOUNTERS_HEADER}\n"),
    )
    .unwrap();

    let err = load_tables(dir.path()).unwrap_err();
    assert!(matches!(err, DataError::Io { .. }));
}

#[test]
fn test_missing_column_is_reported_with_table_and_column() {
    let dir = tempdir().unwrap();
    write_dataset(
        dir.path(),
        &["e1,2025-01-05T00:00:00Z,,p1,org-a,inpatient,1,1,0"],
        &["e1,p1,prov-1,233604007"],
        &[],
    );
    // Overwrite patients.csv without the BIRTHDATE column.
    fs::write(
        dir.path().join("patients.csv"),
        "Id,GENDER,RACE,STATE,HEALTHCARE_EXPENSES\np1,F,white,Massachusetts,0",
    )
    .unwrap();

    let err = load_tables(dir.path()).unwrap_err();
    match err {
        DataError::MissingColumn { table, column } => {
            assert_eq!(table, "patients");
            assert_eq!(column, "BIRTHDATE");
        }
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

#[test]
fn test_reload_publishes_new_snapshot_and_keeps_old_on_failure() {
    use careops::data::TableStore;

    let dir = tempdir().unwrap();
    write_dataset(
        dir.path(),
        &["e1,2025-01-05T00:00:00Z,,p1,org-a,inpatient,1,1,0"],
        &[],
        &[],
    );
    let store = TableStore::from_dir(dir.path()).unwrap();
    let first = store.snapshot();
    assert_eq!(first.encounters.len(), 1);

    write_dataset(
        dir.path(),
        &[
            "e1,2025-01-05T00:00:00Z,,p1,org-a,inpatient,1,1,0",
            "e2,2025-01-06T00:00:00Z,,p2,org-a,emergency,1,1,0",
        ],
        &[],
        &[],
    );
    store.reload_from_dir(dir.path()).unwrap();
    assert_eq!(store.snapshot().encounters.len(), 2);
    // The snapshot taken before the reload is untouched.
    assert_eq!(first.encounters.len(), 1);

    // A failed reload leaves the published snapshot alone.
    fs::remove_file(dir.path().join("claims.csv")).unwrap();
    assert!(store.reload_from_dir(dir.path()).is_err());
    assert_eq!(store.snapshot().encounters.len(), 2);
}

#[test]
fn test_fingerprint_changes_with_content() {
    let dir = tempdir().unwrap();
    write_dataset(
        dir.path(),
        &["e1,2025-01-05T00:00:00Z,,p1,org-a,inpatient,1,1,0"],
        &[],
        &[],
    );
    let first = load_tables(dir.path()).unwrap().fingerprint;

    write_dataset(
        dir.path(),
        &["e1,2025-01-06T00:00:00Z,,p1,org-a,inpatient,1,1,0"],
        &[],
        &[],
    );
    let second = load_tables(dir.path()).unwrap().fingerprint;

    assert_ne!(first, second);
}

#![allow(dead_code)] // each integration test crate uses a different subset

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use careops::data::Tables;
use careops::models::{Claim, Encounter, EncounterClass, Gender, Patient};

pub fn ts(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

pub fn encounter(
    id: &str,
    organization: &str,
    class: EncounterClass,
    start: DateTime<Utc>,
    stop: Option<DateTime<Utc>>,
) -> Encounter {
    Encounter {
        id: id.to_string(),
        patient_id: format!("p-{id}"),
        organization: organization.to_string(),
        class,
        start,
        stop,
        total_claim_cost: 100.0,
        base_encounter_cost: 80.0,
        payer_coverage: 60.0,
    }
}

pub fn claim(id: &str, diagnosis: Option<&str>, provider: &str) -> Claim {
    Claim {
        id: id.to_string(),
        diagnosis_1: diagnosis.map(String::from),
        provider_id: provider.to_string(),
    }
}

pub fn patient(encounter_id: &str, birth_year: i32, gender: Gender) -> Patient {
    Patient {
        id: format!("p-{encounter_id}"),
        birthdate: NaiveDate::from_ymd_opt(birth_year, 6, 15).unwrap(),
        gender,
        race: "white".to_string(),
        state: "Massachusetts".to_string(),
        healthcare_expenses: 1000.0,
    }
}

pub fn tables(encounters: Vec<Encounter>, claims: Vec<Claim>, patients: Vec<Patient>) -> Tables {
    Tables {
        encounters,
        claims,
        patients,
        fingerprint: "fixture".to_string(),
    }
}

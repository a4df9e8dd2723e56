//! Application configuration file support.
//!
//! Every heuristic constant the engine uses is configuration, not code: the
//! source system shipped several near-identical deployments that disagreed on
//! bed scaling factors, severe-diagnosis code lists, staffing multipliers and
//! join modes, so none of them is hard-coded here. The reference deployment's
//! values are the serde defaults below.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::data::DataError;

/// Complete application configuration from a `careops.toml` file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub engine: EngineConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Pin "now" to midnight UTC of this date. Deployments serving a static
    /// historical snapshot set this so default as-of resolution stays
    /// reproducible; leave unset to use the wall clock.
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
}

/// Source data settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSettings {
    /// Directory holding `encounters.csv`, `claims.csv` and `patients.csv`.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

/// Join mode between encounters and claims.
///
/// `Left` keeps encounters that have no claim row (census counts then do not
/// depend on claim completeness); `Inner` drops them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinMode {
    Left,
    Inner,
}

/// Tunable heuristics of the utilization engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Multiplier converting historical encounter volume into estimated beds.
    #[serde(default = "default_bed_scaling_factor")]
    pub bed_scaling_factor: f64,
    /// Diagnosis codes that qualify an active inpatient encounter as
    /// ICU-level.
    #[serde(default = "default_severe_diagnosis_codes")]
    pub severe_diagnosis_codes: Vec<String>,
    #[serde(default = "default_doctor_ratio")]
    pub doctor_ratio: f64,
    #[serde(default = "default_nurse_ratio")]
    pub nurse_ratio: f64,
    #[serde(default = "default_specialist_ratio")]
    pub specialist_ratio: f64,
    /// Trailing window length for the daily series, in days.
    #[serde(default = "default_trend_window_days")]
    pub trend_window_days: i64,
    /// Number of future days projected by the forecaster.
    #[serde(default = "default_forecast_horizon_days")]
    pub forecast_horizon_days: u32,
    /// Minimum history length below which the forecaster falls back to
    /// repeating the current ICU count.
    #[serde(default = "default_min_observations")]
    pub min_observations: usize,
    #[serde(default = "default_join_mode")]
    pub join_mode: JoinMode,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_bed_scaling_factor() -> f64 {
    0.6
}

fn default_severe_diagnosis_codes() -> Vec<String> {
    // Pneumonia, myocardial infarction, stroke, sepsis, ARDS.
    ["233604007", "22298006", "230690007", "91302008", "67782005"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_doctor_ratio() -> f64 {
    1.0
}

fn default_nurse_ratio() -> f64 {
    3.0
}

fn default_specialist_ratio() -> f64 {
    0.5
}

fn default_trend_window_days() -> i64 {
    30
}

fn default_forecast_horizon_days() -> u32 {
    7
}

fn default_min_observations() -> usize {
    10
}

fn default_join_mode() -> JoinMode {
    JoinMode::Left
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            reference_date: None,
        }
    }
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bed_scaling_factor: default_bed_scaling_factor(),
            severe_diagnosis_codes: default_severe_diagnosis_codes(),
            doctor_ratio: default_doctor_ratio(),
            nurse_ratio: default_nurse_ratio(),
            specialist_ratio: default_specialist_ratio(),
            trend_window_days: default_trend_window_days(),
            forecast_horizon_days: default_forecast_horizon_days(),
            min_observations: default_min_observations(),
            join_mode: default_join_mode(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            DataError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let config: AppConfig = toml::from_str(&content).map_err(|e| {
            DataError::Configuration(format!("Failed to parse config file: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `careops.toml` in the current directory, `config/`, and
    /// the parent directory.
    pub fn from_default_location() -> Result<Self, DataError> {
        let search_paths = [
            PathBuf::from("careops.toml"),
            PathBuf::from("config/careops.toml"),
            PathBuf::from("../careops.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(DataError::Configuration(
            "No careops.toml found in standard locations".to_string(),
        ))
    }

    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> Result<(), DataError> {
        let engine = &self.engine;
        if !engine.bed_scaling_factor.is_finite() || engine.bed_scaling_factor < 0.0 {
            return Err(DataError::Configuration(
                "engine.bed_scaling_factor must be a non-negative number".to_string(),
            ));
        }
        if engine.trend_window_days <= 0 {
            return Err(DataError::Configuration(
                "engine.trend_window_days must be positive".to_string(),
            ));
        }
        if engine.forecast_horizon_days == 0 {
            return Err(DataError::Configuration(
                "engine.forecast_horizon_days must be positive".to_string(),
            ));
        }
        for ratio in [
            engine.doctor_ratio,
            engine.nurse_ratio,
            engine.specialist_ratio,
        ] {
            if !ratio.is_finite() || ratio < 0.0 {
                return Err(DataError::Configuration(
                    "engine staffing ratios must be non-negative numbers".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_deployment() {
        let config = AppConfig::default();
        assert_eq!(config.engine.bed_scaling_factor, 0.6);
        assert_eq!(config.engine.severe_diagnosis_codes.len(), 5);
        assert_eq!(config.engine.trend_window_days, 30);
        assert_eq!(config.engine.forecast_horizon_days, 7);
        assert_eq!(config.engine.min_observations, 10);
        assert_eq!(config.engine.join_mode, JoinMode::Left);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 9000
reference_date = "2025-03-17"

[data]
data_dir = "/var/lib/careops/csv"

[engine]
bed_scaling_factor = 0.75
severe_diagnosis_codes = ["1", "2", "3", "4"]
doctor_ratio = 1.0
nurse_ratio = 2.5
specialist_ratio = 0.25
trend_window_days = 60
forecast_horizon_days = 14
min_observations = 20
join_mode = "inner"
"#;

        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(
            config.server.reference_date,
            Some(NaiveDate::from_ymd_opt(2025, 3, 17).unwrap())
        );
        assert_eq!(config.data.data_dir, PathBuf::from("/var/lib/careops/csv"));
        assert_eq!(config.engine.bed_scaling_factor, 0.75);
        assert_eq!(config.engine.trend_window_days, 60);
        assert_eq!(config.engine.join_mode, JoinMode::Inner);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let toml = r#"
[engine]
trend_window_days = 60
"#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.engine.trend_window_days, 60);
        assert_eq!(config.engine.forecast_horizon_days, 7);
        assert_eq!(config.engine.join_mode, JoinMode::Left);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.engine.bed_scaling_factor = -1.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.engine.trend_window_days = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.engine.nurse_ratio = f64::NAN;
        assert!(config.validate().is_err());
    }
}

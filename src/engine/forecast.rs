//! ICU demand forecaster.
//!
//! A small state machine with one hard guarantee: the endpoint never fails
//! because history is short or the model fit blows up. Every path — fitted
//! or degraded — emits exactly `horizon` labeled, non-negative integer
//! points.

use chrono::{Duration, NaiveDate};
use tracing::debug;

use super::arima;
use super::trends::DailyCount;

/// Forecaster states. `ModelFit` is the in-flight state while the ARIMA fit
/// runs; the other three are terminal and recorded on the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastState {
    InsufficientHistory,
    ModelFit,
    ForecastReady,
    FitFailed,
}

/// One projected day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastPoint {
    /// Day offset from the as-of date, `1..=horizon`.
    pub day: u32,
    pub date: NaiveDate,
    pub predicted: u64,
}

/// Forecast result: which path produced it, and the points themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastOutcome {
    pub state: ForecastState,
    pub points: Vec<ForecastPoint>,
}

/// The degraded-mode projection: today's ICU count, repeated.
fn fallback(current_icu: usize, as_of: NaiveDate, horizon: u32) -> Vec<ForecastPoint> {
    (1..=horizon)
        .map(|day| ForecastPoint {
            day,
            date: as_of + Duration::days(day as i64),
            predicted: current_icu as u64,
        })
        .collect()
}

/// Forecast daily ICU occupancy over the horizon.
///
/// `history` is the zero-filled daily occupancy series ending at the as-of
/// date; its density is guaranteed by the trend aggregator.
pub fn forecast_icu_demand(
    history: &[DailyCount],
    current_icu: usize,
    as_of: NaiveDate,
    min_observations: usize,
    horizon: u32,
) -> ForecastOutcome {
    if history.len() < min_observations {
        return ForecastOutcome {
            state: ForecastState::InsufficientHistory,
            points: fallback(current_icu, as_of, horizon),
        };
    }

    let series: Vec<f64> = history.iter().map(|p| p.count as f64).collect();
    debug!(
        state = ?ForecastState::ModelFit,
        observations = series.len(),
        "fitting ARIMA(1,1,1) to ICU occupancy series"
    );

    match arima::fit(&series) {
        Ok(model) => {
            let values = model.forecast(horizon as usize);
            if values.iter().any(|v| !v.is_finite()) {
                return ForecastOutcome {
                    state: ForecastState::FitFailed,
                    points: fallback(current_icu, as_of, horizon),
                };
            }
            let points = values
                .into_iter()
                .enumerate()
                .map(|(i, value)| ForecastPoint {
                    day: i as u32 + 1,
                    date: as_of + Duration::days(i as i64 + 1),
                    predicted: value.round().max(0.0) as u64,
                })
                .collect();
            ForecastOutcome {
                state: ForecastState::ForecastReady,
                points,
            }
        }
        Err(err) => {
            debug!(error = %err, "ARIMA fit failed, using fallback projection");
            ForecastOutcome {
                state: ForecastState::FitFailed,
                points: fallback(current_icu, as_of, horizon),
            }
        }
    }
}

//! ARIMA(1,1,1) fitting for short daily count series.
//!
//! The series is differenced once and an ARMA(1,1) model is fitted to the
//! differences by minimizing the conditional sum of squares over
//! (φ, θ) ∈ (−1, 1)², with a coarse grid pass refined around the best cell.
//! Everything is deterministic; there is no random restart, so the same
//! series always yields the same parameters.

/// Reasons a fit cannot be produced. Callers treat any of these as a signal
/// to fall back, never as a request failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FitError {
    #[error("series too short to difference and condition on")]
    TooShort,
    #[error("conditional sum of squares is not finite anywhere on the grid")]
    Degenerate,
}

/// A fitted ARIMA(1,1,1) model, holding the state needed to forecast from
/// the end of the training series.
#[derive(Debug, Clone, Copy)]
pub struct Arima111 {
    pub phi: f64,
    pub theta: f64,
    last_level: f64,
    last_diff: f64,
    last_residual: f64,
}

const COARSE_STEP: f64 = 0.05;
const FINE_STEP: f64 = 0.005;
const PARAM_BOUND: f64 = 0.99;

/// Conditional sum of squares of the one-step-ahead residuals on the
/// differenced series, conditioning on the first observation.
fn css(diffs: &[f64], phi: f64, theta: f64) -> f64 {
    let mut prev_residual = 0.0;
    let mut sse = 0.0;
    for t in 1..diffs.len() {
        let predicted = phi * diffs[t - 1] + theta * prev_residual;
        let residual = diffs[t] - predicted;
        sse += residual * residual;
        prev_residual = residual;
    }
    sse
}

fn search(
    diffs: &[f64],
    phi_center: f64,
    theta_center: f64,
    half_width: f64,
    step: f64,
) -> (f64, f64, f64) {
    let mut best = (f64::INFINITY, phi_center, theta_center);
    let cells = (2.0 * half_width / step).round() as i64;
    for i in 0..=cells {
        let phi = (phi_center - half_width + i as f64 * step).clamp(-PARAM_BOUND, PARAM_BOUND);
        for j in 0..=cells {
            let theta =
                (theta_center - half_width + j as f64 * step).clamp(-PARAM_BOUND, PARAM_BOUND);
            let sse = css(diffs, phi, theta);
            if sse.is_finite() && sse < best.0 {
                best = (sse, phi, theta);
            }
        }
    }
    best
}

/// Fit ARIMA(1,1,1) to a level series.
pub fn fit(series: &[f64]) -> Result<Arima111, FitError> {
    // Differencing eats one point and the CSS recursion conditions on one
    // more, so anything shorter has nothing to fit.
    if series.len() < 3 {
        return Err(FitError::TooShort);
    }

    let diffs: Vec<f64> = series.windows(2).map(|w| w[1] - w[0]).collect();

    let (coarse_sse, phi, theta) = search(&diffs, 0.0, 0.0, 0.95, COARSE_STEP);
    if !coarse_sse.is_finite() {
        return Err(FitError::Degenerate);
    }
    let (_, phi, theta) = search(&diffs, phi, theta, COARSE_STEP, FINE_STEP);

    // Replay the recursion at the chosen parameters to recover the final
    // residual, which seeds the first forecast step.
    let mut residual = 0.0;
    for t in 1..diffs.len() {
        residual = diffs[t] - phi * diffs[t - 1] - theta * residual;
    }

    Ok(Arima111 {
        phi,
        theta,
        last_level: series[series.len() - 1],
        last_diff: diffs[diffs.len() - 1],
        last_residual: residual,
    })
}

impl Arima111 {
    /// Project `horizon` future levels. The MA term contributes only to the
    /// first step (future shocks have zero expectation); the differences are
    /// re-integrated onto the last observed level.
    pub fn forecast(&self, horizon: usize) -> Vec<f64> {
        let mut out = Vec::with_capacity(horizon);
        let mut level = self.last_level;
        let mut diff = self.phi * self.last_diff + self.theta * self.last_residual;
        for step in 0..horizon {
            if step > 0 {
                diff *= self.phi;
            }
            level += diff;
            out.push(level);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_rejects_tiny_series() {
        assert_eq!(fit(&[]).unwrap_err(), FitError::TooShort);
        assert_eq!(fit(&[1.0]).unwrap_err(), FitError::TooShort);
        assert_eq!(fit(&[1.0, 2.0]).unwrap_err(), FitError::TooShort);
    }

    #[test]
    fn test_constant_series_forecasts_flat() {
        let series = vec![4.0; 20];
        let model = fit(&series).unwrap();
        let forecast = model.forecast(7);
        assert_eq!(forecast.len(), 7);
        for value in forecast {
            assert!((value - 4.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_fit_is_deterministic() {
        let series: Vec<f64> = (0..30).map(|i| ((i * 7) % 5) as f64 + 2.0).collect();
        let a = fit(&series).unwrap();
        let b = fit(&series).unwrap();
        assert_eq!(a.phi, b.phi);
        assert_eq!(a.theta, b.theta);
        assert_eq!(a.forecast(7), b.forecast(7));
    }

    #[test]
    fn test_trending_series_keeps_direction() {
        let series: Vec<f64> = (0..30).map(|i| i as f64).collect();
        let model = fit(&series).unwrap();
        // A steadily rising series should not be projected downward.
        let forecast = model.forecast(7);
        assert!(forecast.iter().all(|v| v.is_finite()));
        assert!(forecast[0] >= series[series.len() - 1] - 1.0);
    }

    #[test]
    fn test_parameters_stay_in_bounds() {
        let series: Vec<f64> = (0..50)
            .map(|i| if i % 2 == 0 { 10.0 } else { 0.0 })
            .collect();
        let model = fit(&series).unwrap();
        assert!(model.phi.abs() <= PARAM_BOUND);
        assert!(model.theta.abs() <= PARAM_BOUND);
    }
}

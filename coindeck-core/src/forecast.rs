//! Ordinary least-squares trend forecaster.
//!
//! Fits a line to (sample index, price) pairs and evaluates it one step past
//! the last observed index. The sample's zero-based position is the
//! independent variable — not the calendar date — so gaps in the series do
//! not stretch the time axis.

use thiserror::Error;

use crate::market::PriceSample;

/// A fitted trend line and its one-step-ahead point estimate.
///
/// Recomputed fresh for every asset selection; never cached across assets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastResult {
    /// Predicted price at `x = samples.len()`.
    pub estimate: f64,
    pub slope: f64,
    pub intercept: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ForecastError {
    /// A line cannot be fit to fewer than two points, or to points whose
    /// x-values carry no variance.
    #[error("insufficient data to fit a trend line")]
    InsufficientData,
}

/// Fit `y = m·x + b` minimizing squared vertical error, then evaluate at
/// `x = samples.len()`.
pub fn forecast_next(samples: &[PriceSample]) -> Result<ForecastResult, ForecastError> {
    let n = samples.len();
    if n < 2 {
        return Err(ForecastError::InsufficientData);
    }

    let n_f = n as f64;
    let mean_x = samples.iter().map(|s| s.index as f64).sum::<f64>() / n_f;
    let mean_y = samples.iter().map(|s| s.price).sum::<f64>() / n_f;

    let mut cov_xy = 0.0;
    let mut var_x = 0.0;
    for s in samples {
        let dx = s.index as f64 - mean_x;
        cov_xy += dx * (s.price - mean_y);
        var_x += dx * dx;
    }

    // Cannot happen with distinct positional indices, but never divide by zero.
    if var_x == 0.0 {
        return Err(ForecastError::InsufficientData);
    }

    let slope = cov_xy / var_x;
    let intercept = mean_y - slope * mean_x;
    let estimate = slope * n_f + intercept;

    Ok(ForecastResult {
        estimate,
        slope,
        intercept,
    })
}

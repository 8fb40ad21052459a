//! # Least squares straight line
//!
//! y = slope * t + intercept, closed form from centered sums:
//! ```text
//! Sxx = Σ (t - t̄)²,  Sxy = Σ (t - t̄)(y - ȳ)
//! slope = Sxy / Sxx,  intercept = ȳ - slope * t̄
//! ```
//! R² is the squared Pearson correlation between observed and predicted values.
//! Conventions:
//! - all times identical (spread of t within rounding of its magnitude): no fit
//! - N == 2 or constant y: predicted values equal observed ones, R² = 1
//! - y with overflowed values (1/A of a tiny absorbance): line through the finite points,
//!   R² = 0 and `overflow` set, so the order is reported but never selected over a real fit

use crate::ReactionOrder::linearization::LinearizedTarget;
use crate::ReactionOrder::order_errors::KineticsError;
use log::{debug, warn};
use nalgebra::DVector;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub predicted: Vec<f64>,
    pub correlation_coefficient: f64,
    pub r_squared: f64,
    /// residual sum of squares
    pub ss_res: f64,
    pub n: usize,
    /// the target had non-finite values
    pub overflow: bool,
}

/// Pearson correlation of two centered vectors; 1 when both have zero variance
fn pearson(a_c: &DVector<f64>, b_c: &DVector<f64>) -> f64 {
    let a_max = a_c.amax();
    let b_max = b_c.amax();
    if a_max == 0.0 && b_max == 0.0 {
        return 1.0;
    }
    if a_max == 0.0 || b_max == 0.0 {
        return 0.0;
    }
    // scaled to max 1 so the sums of squares stay finite for huge values
    let a = a_c / a_max;
    let b = b_c / b_max;
    (a.dot(&b) / (a.dot(&a) * b.dot(&b)).sqrt()).clamp(-1.0, 1.0)
}

/// true if all values of x are equal up to rounding of their magnitude
fn has_zero_spread(x: &DVector<f64>, x_c: &DVector<f64>) -> bool {
    x_c.amax() <= x.len() as f64 * f64::EPSILON * x.amax()
}

/// Fits a line to (x, y).
///
/// # Returns
/// * `None` - lengths differ, fewer than 2 points, or x has zero variance
pub fn fit_line(x: &[f64], y: &[f64]) -> Option<LinearFit> {
    let n = x.len();
    if n < 2 || n != y.len() {
        return None;
    }
    let x_v = DVector::from_column_slice(x);
    let x_mean = x_v.mean();
    let x_c = x_v.add_scalar(-x_mean);
    if has_zero_spread(&x_v, &x_c) {
        return None;
    }
    if y.iter().any(|v| !v.is_finite()) {
        return Some(fit_overflowed(x, y));
    }
    let y_v = DVector::from_column_slice(y);
    let y_mean = y_v.mean();
    let y_c = y_v.add_scalar(-y_mean);

    let ss_xx = x_c.dot(&x_c);
    let slope = x_c.dot(&y_c) / ss_xx;
    let intercept = y_mean - slope * x_mean;

    // centered form keeps precision for large time offsets
    let predicted = x_c.map(|d| y_mean + slope * d);
    let residuals = &y_v - &predicted;
    let ss_res = residuals.dot(&residuals);

    let correlation_coefficient = if n == 2 {
        1.0
    } else {
        let p_mean = predicted.mean();
        pearson(&y_c, &predicted.add_scalar(-p_mean))
    };
    let r_squared = (correlation_coefficient * correlation_coefficient).clamp(0.0, 1.0);
    debug!(
        "fit: n = {}, slope = {}, intercept = {}, r = {}",
        n, slope, intercept, correlation_coefficient
    );
    Some(LinearFit {
        slope,
        intercept,
        predicted: predicted.iter().copied().collect(),
        correlation_coefficient,
        r_squared,
        ss_res,
        n,
        overflow: false,
    })
}

/// Line through the finite points of y, with R² = 0.
fn fit_overflowed(x: &[f64], y: &[f64]) -> LinearFit {
    let (xs, ys): (Vec<f64>, Vec<f64>) = x
        .iter()
        .zip(y.iter())
        .filter(|(_, yi)| yi.is_finite())
        .map(|(&xi, &yi)| (xi, yi))
        .unzip();
    warn!(
        "{} of {} transformed values overflow, fit quality is set to 0",
        x.len() - xs.len(),
        x.len()
    );
    let (slope, intercept) = match fit_line(&xs, &ys) {
        Some(fit) if fit.slope.is_finite() && fit.intercept.is_finite() => {
            (fit.slope, fit.intercept)
        }
        _ if !ys.is_empty() => {
            let mean = ys.iter().sum::<f64>() / ys.len() as f64;
            (0.0, if mean.is_finite() { mean } else { 0.0 })
        }
        _ => (0.0, 0.0),
    };
    LinearFit {
        slope,
        intercept,
        predicted: x.iter().map(|&xi| slope * xi + intercept).collect(),
        correlation_coefficient: 0.0,
        r_squared: 0.0,
        ss_res: f64::INFINITY,
        n: x.len(),
        overflow: true,
    }
}

/// Fits the linear form of one order against time.
pub fn fit_target(t: &[f64], target: &LinearizedTarget) -> Result<LinearFit, KineticsError> {
    fit_line(t, &target.y).ok_or_else(|| KineticsError::DegenerateFit {
        order: target.order.label().to_string(),
    })
}

impl LinearFit {
    /// value of the fitted line at time t
    pub fn predict(&self, t: f64) -> f64 {
        self.slope * t + self.intercept
    }
}

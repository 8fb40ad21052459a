//! Rate constants, equations of the fitted lines and the choice of the best order.
//!
//! The best order has the maximum R². On exactly equal R² the lowest order wins,
//! so the choice is deterministic for any input. A NaN R² never wins against a number.

use crate::ReactionOrder::linearization::KineticOrder;
use crate::ReactionOrder::regression::LinearFit;
use log::info;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderCandidate {
    pub order: KineticOrder,
    /// "Order 0", "Order 1" or "Order 2"
    pub order_label: String,
    /// k = |slope|
    pub rate_constant: f64,
    pub r_squared: f64,
    pub equation: String,
    pub fit: LinearFit,
}

/// -0.0 is printed as 0.0
fn normalize_zero(x: f64) -> f64 {
    if x == 0.0 { 0.0 } else { x }
}

/// Equation of the fitted line in the variables of the order, e.g. "ln A = -1.0000·t + 0.0000"
pub fn format_equation(order: KineticOrder, slope: f64, intercept: f64, precision: usize) -> String {
    let slope = normalize_zero(slope);
    let intercept = normalize_zero(intercept);
    let (sign, magnitude) = if intercept < 0.0 {
        ("-", -intercept)
    } else {
        ("+", intercept)
    };
    format!(
        "{} = {:.prec$}·t {} {:.prec$}",
        order.y_label(),
        slope,
        sign,
        magnitude,
        prec = precision
    )
}

impl OrderCandidate {
    pub fn new(order: KineticOrder, fit: LinearFit, precision: usize) -> Self {
        Self {
            order,
            order_label: order.label().to_string(),
            rate_constant: fit.slope.abs(),
            r_squared: fit.r_squared,
            equation: format_equation(order, fit.slope, fit.intercept, precision),
            fit,
        }
    }
}

/// Candidates in order 0, 1, 2 from fits of the corresponding orders.
pub fn build_candidates(fits: Vec<(KineticOrder, LinearFit)>, precision: usize) -> Vec<OrderCandidate> {
    let mut candidates: Vec<OrderCandidate> = fits
        .into_iter()
        .map(|(order, fit)| OrderCandidate::new(order, fit, precision))
        .collect();
    candidates.sort_by_key(|c| c.order);
    candidates
}

/// NaN is lower than any number
fn compare_r_squared(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Index of the maximum R²; the first (lowest order) index wins on equality.
/// `None` only for an empty slice.
pub fn best_index(r_squared: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &r2) in r_squared.iter().enumerate() {
        match best {
            None => best = Some(i),
            Some(b) if compare_r_squared(r2, r_squared[b]) == Ordering::Greater => best = Some(i),
            _ => {}
        }
    }
    best
}

/// Selects the best supported order among candidates sorted by order.
pub fn select_best(candidates: &[OrderCandidate]) -> Option<&OrderCandidate> {
    let r_squared: Vec<f64> = candidates.iter().map(|c| c.r_squared).collect();
    let best = best_index(&r_squared).map(|i| &candidates[i]);
    if let Some(best) = best {
        info!(
            "ranking: {}; best: {} (R² = {:.6})",
            rank_candidates(candidates)
                .iter()
                .map(|c| format!("{} R² = {:.6}", c.order_label, c.r_squared))
                .collect::<Vec<_>>()
                .join(", "),
            best.order_label,
            best.r_squared
        );
    }
    best
}

/// Candidates from the best to the worst, ties keep the lower order first.
pub fn rank_candidates(candidates: &[OrderCandidate]) -> Vec<&OrderCandidate> {
    let mut ranked: Vec<&OrderCandidate> = candidates.iter().collect();
    // stable sort keeps lower orders ahead on ties
    ranked.sort_by(|a, b| compare_r_squared(b.r_squared, a.r_squared));
    ranked
}

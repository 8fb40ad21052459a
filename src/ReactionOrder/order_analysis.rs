//! Entry point of the reaction order analysis:
//! Loader -> Linearization -> Regression -> Selector -> Interpretation.
//!
//! `analyze(bytes)` is a pure function of its input: no state is kept between runs and
//! the same bytes always give the same [`AnalysisResult`].
//! A degenerate fit of any order aborts the whole run because all three orders
//! share the same time vector.

use crate::ReactionOrder::dataset_loader::{RawDataset, ValidatedSeries};
use crate::ReactionOrder::interpretation::{AnalysisResult, plot_series};
use crate::ReactionOrder::linearization::linearize_all;
use crate::ReactionOrder::order_errors::KineticsError;
use crate::ReactionOrder::order_selector::{build_candidates, select_best};
use crate::ReactionOrder::regression::fit_target;
use crate::settings::AnalysisSettings;
use log::{error, info};
use std::fs;
use std::path::Path;

/// Analysis of raw file bytes with default settings.
pub fn analyze(bytes: &[u8]) -> Result<AnalysisResult, KineticsError> {
    analyze_with_settings(bytes, &AnalysisSettings::default())
}

pub fn analyze_with_settings(
    bytes: &[u8],
    settings: &AnalysisSettings,
) -> Result<AnalysisResult, KineticsError> {
    let raw = RawDataset::from_bytes(bytes, settings)?;
    let series = raw.validate_with_settings(settings)?;
    analyze_series(&series, settings)
}

/// Analysis of an already validated series.
pub fn analyze_series(
    series: &ValidatedSeries,
    settings: &AnalysisSettings,
) -> Result<AnalysisResult, KineticsError> {
    let targets = linearize_all(series);
    let mut fits = Vec::with_capacity(targets.len());
    for target in &targets {
        let fit = fit_target(&series.t, target)?;
        fits.push((target.order, fit));
    }
    let candidates = build_candidates(fits, settings.precision);
    let best = select_best(&candidates)
        .cloned()
        .ok_or_else(|| KineticsError::Format("no candidate orders were fitted".to_string()))?;
    let plots = plot_series(series, &targets, &candidates);
    info!(
        "{} data points analysed, best: {} ({})",
        series.len(),
        best.order_label,
        best.equation
    );
    Ok(AnalysisResult::new(candidates, best, plots))
}

/// Reads a data file and analyses it.
pub fn analyze_file(
    file_name: &str,
    settings: &AnalysisSettings,
) -> Result<AnalysisResult, KineticsError> {
    let path = Path::new(file_name);
    let bytes = fs::read(path).map_err(|e| {
        error!("Failed to open file '{}': {}", file_name, e);
        e
    })?;
    info!("file '{}' loaded, {} bytes", file_name, bytes.len());
    analyze_with_settings(&bytes, settings)
}

//! # Interpretation and the final result
//!
//! Maps the selected order to a fixed text and assembles [`AnalysisResult`]:
//! summary table (label, R², k), best order, interpretation, and per-order
//! (t, transformed y, predicted y) series for external plotting.
//! Output is either a prettytable in the terminal or JSON.

use crate::ReactionOrder::dataset_loader::ValidatedSeries;
use crate::ReactionOrder::linearization::{KineticOrder, LinearizedTarget};
use crate::ReactionOrder::order_errors::KineticsError;
use crate::ReactionOrder::order_selector::OrderCandidate;
use serde::Serialize;

/// Fixed interpretation of the reaction order.
pub fn interpretation_for(order: KineticOrder) -> &'static str {
    match order {
        KineticOrder::Zero => {
            "The reaction rate is independent of the reactant concentration; typical of degradation at high concentration in food systems."
        }
        KineticOrder::First => {
            "The reaction rate is proportional to the reactant concentration; typical of degradation and oxidation of bioactive compounds."
        }
        KineticOrder::Second => {
            "The reaction rate depends on the interaction of two reactant species; less common in simple food systems."
        }
    }
}

/// one row of the summary table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub order_label: String,
    pub r_squared: f64,
    pub rate_constant: f64,
}

/// data of one order for a scatter plot with the fitted line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotSeries {
    pub order: KineticOrder,
    pub x_label: String,
    pub y_label: String,
    pub t: Vec<f64>,
    pub observed: Vec<f64>,
    pub predicted: Vec<f64>,
}

impl PlotSeries {
    /// (t, transformed y, predicted y) triples
    pub fn points(&self) -> Vec<(f64, f64, f64)> {
        self.t
            .iter()
            .zip(self.observed.iter())
            .zip(self.predicted.iter())
            .map(|((&t, &y), &p)| (t, y, p))
            .collect()
    }
}

/// Build plot series from the validated data, the transformed targets and the candidates.
pub fn plot_series(
    series: &ValidatedSeries,
    targets: &[LinearizedTarget],
    candidates: &[OrderCandidate],
) -> Vec<PlotSeries> {
    candidates
        .iter()
        .filter_map(|c| {
            targets.iter().find(|tg| tg.order == c.order).map(|tg| PlotSeries {
                order: c.order,
                x_label: "t".to_string(),
                y_label: c.order.y_label().to_string(),
                t: series.t.clone(),
                observed: tg.y.clone(),
                predicted: c.fit.predicted.clone(),
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// candidates of orders 0, 1, 2
    pub candidates: Vec<OrderCandidate>,
    pub best_order: OrderCandidate,
    pub interpretation: String,
    pub plot_series: Vec<PlotSeries>,
}

impl AnalysisResult {
    pub fn new(
        candidates: Vec<OrderCandidate>,
        best_order: OrderCandidate,
        plot_series: Vec<PlotSeries>,
    ) -> Self {
        let interpretation = interpretation_for(best_order.order).to_string();
        Self {
            candidates,
            best_order,
            interpretation,
            plot_series,
        }
    }

    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        self.candidates
            .iter()
            .map(|c| SummaryRow {
                order_label: c.order_label.clone(),
                r_squared: c.r_squared,
                rate_constant: c.rate_constant,
            })
            .collect()
    }

    pub fn candidate(&self, order: KineticOrder) -> Option<&OrderCandidate> {
        self.candidates.iter().find(|c| c.order == order)
    }

    pub fn to_json(&self) -> Result<String, KineticsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Prints the summary table, the best order and the interpretation.
    pub fn pretty_print(&self) {
        use prettytable::{Cell, Row, Table, row};

        println!("\n=== REACTION ORDER ANALYSIS ===");
        let mut table = Table::new();
        table.add_row(row!["Order", "Linear form", "R²", "k", "Units of k", "Equation"]);
        for c in &self.candidates {
            table.add_row(Row::new(vec![
                Cell::new(&c.order_label),
                Cell::new(&format!("{} vs t", c.order.y_label())),
                Cell::new(&format!("{:.4}", c.r_squared)),
                Cell::new(&format!("{:.4e}", c.rate_constant)),
                Cell::new(c.order.rate_units()),
                Cell::new(&c.equation),
            ]));
        }
        table.printstd();
        for c in self.candidates.iter().filter(|c| c.fit.overflow) {
            println!(
                "Note: {} overflows for some points ({}), its R² is set to 0",
                c.order.y_label(),
                c.order_label
            );
        }
        println!(
            "Best order: {} (R² = {:.4}, k = {:.4e} {})",
            self.best_order.order_label,
            self.best_order.r_squared,
            self.best_order.rate_constant,
            self.best_order.order.rate_units()
        );
        println!("Equation: {}", self.best_order.equation);
        println!("Interpretation: {}", self.interpretation);
    }
}

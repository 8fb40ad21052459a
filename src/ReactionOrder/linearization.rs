//! Linearizing transforms of the integrated rate laws
//!
//! | Order | integrated law        | linear form          |
//! |-------|-----------------------|----------------------|
//! | 0     | A = A0 - k t          | A vs t               |
//! | 1     | A = A0 exp(-k t)      | ln A vs t            |
//! | 2     | 1/A = 1/A0 + k t      | 1/A vs t             |
//!
//! Every model is a separate type implementing [`LinearizedModel`], the enum [`OrderModel`]
//! dispatches calls to them.

use crate::ReactionOrder::dataset_loader::ValidatedSeries;
use enum_dispatch::enum_dispatch;
use log::warn;
use serde::Serialize;

/// candidate kinetic orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum KineticOrder {
    Zero,
    First,
    Second,
}

impl KineticOrder {
    /// all candidates from the simplest to the most complex
    pub fn all() -> [KineticOrder; 3] {
        [KineticOrder::Zero, KineticOrder::First, KineticOrder::Second]
    }

    pub fn number(&self) -> u8 {
        match self {
            KineticOrder::Zero => 0,
            KineticOrder::First => 1,
            KineticOrder::Second => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            KineticOrder::Zero => "Order 0",
            KineticOrder::First => "Order 1",
            KineticOrder::Second => "Order 2",
        }
    }

    /// name of the transformed variable on the y axis
    pub fn y_label(&self) -> &'static str {
        self.model().y_label()
    }

    /// units of the rate constant
    pub fn rate_units(&self) -> &'static str {
        match self {
            KineticOrder::Zero => "A·time⁻¹",
            KineticOrder::First => "time⁻¹",
            KineticOrder::Second => "A⁻¹·time⁻¹",
        }
    }

    pub fn model(&self) -> OrderModel {
        match self {
            KineticOrder::Zero => ZeroOrder.into(),
            KineticOrder::First => FirstOrder.into(),
            KineticOrder::Second => SecondOrder.into(),
        }
    }
}

impl std::fmt::Display for KineticOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[enum_dispatch]
pub trait LinearizedModel {
    fn order(&self) -> KineticOrder;
    fn y_label(&self) -> &'static str;
    /// transform of a single absorbance value, defined for A > 0
    fn transform(&self, absorbance: f64) -> f64;

    fn linearize(&self, absorbance: &[f64]) -> Vec<f64> {
        absorbance.iter().map(|&a| self.transform(a)).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZeroOrder;
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FirstOrder;
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecondOrder;

impl LinearizedModel for ZeroOrder {
    fn order(&self) -> KineticOrder {
        KineticOrder::Zero
    }
    fn y_label(&self) -> &'static str {
        "A"
    }
    fn transform(&self, absorbance: f64) -> f64 {
        absorbance
    }
}

impl LinearizedModel for FirstOrder {
    fn order(&self) -> KineticOrder {
        KineticOrder::First
    }
    fn y_label(&self) -> &'static str {
        "ln A"
    }
    fn transform(&self, absorbance: f64) -> f64 {
        absorbance.ln()
    }
}

impl LinearizedModel for SecondOrder {
    fn order(&self) -> KineticOrder {
        KineticOrder::Second
    }
    fn y_label(&self) -> &'static str {
        "1/A"
    }
    fn transform(&self, absorbance: f64) -> f64 {
        1.0 / absorbance
    }
}

#[enum_dispatch(LinearizedModel)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrderModel {
    ZeroOrder,
    FirstOrder,
    SecondOrder,
}

/// transformed regression target of one order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinearizedTarget {
    pub order: KineticOrder,
    pub y: Vec<f64>,
}

/// Produces the targets of all three orders in order 0, 1, 2.
/// Overflow of 1/A for tiny absorbances is not an error, it is only reported.
pub fn linearize_all(series: &ValidatedSeries) -> Vec<LinearizedTarget> {
    KineticOrder::all()
        .iter()
        .map(|order| {
            let y = order.model().linearize(&series.A);
            if y.iter().any(|v| !v.is_finite()) {
                warn!("{}: transformed values overflow ({})", order, order.y_label());
            }
            LinearizedTarget { order: *order, y }
        })
        .collect()
}

//! Commission models.
//!
//! Four interchangeable pricing models behind one capability:
//!
//! - [`PerShare`]: fixed cost per unit, with an optional minimum per trade
//! - [`PerTrade`]: flat fee per trade regardless of size
//! - [`PerDollar`]: fraction of the dollar volume
//! - [`OpenCloseCost`]: asymmetric open/close commission plus a closing tax
//!
//! [`Model`] is the closed set of all four, for callers that pick the model
//! from configuration.

mod open_close;
mod per_dollar;
mod per_share;
mod per_trade;

pub use open_close::OpenCloseCost;
pub use per_dollar::PerDollar;
pub use per_share::PerShare;
pub use per_trade::PerTrade;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::state::{SavedState, Versioned};
use crate::transaction::Transaction;

/// Commission charged for one transaction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Commission {
    /// Commission per unit of the transaction's quantity
    pub unit_cost: f64,
    /// Full commission for the transaction (always non-negative)
    pub total_cost: f64,
}

impl Commission {
    pub const ZERO: Commission = Commission {
        unit_cost: 0.0,
        total_cost: 0.0,
    };

    /// Create a new commission result.
    #[inline]
    pub fn new(unit_cost: f64, total_cost: f64) -> Self {
        Self {
            unit_cost,
            total_cost,
        }
    }

    /// `(unit_cost, total_cost)`
    #[inline]
    pub fn as_tuple(self) -> (f64, f64) {
        (self.unit_cost, self.total_cost)
    }
}

impl From<Commission> for (f64, f64) {
    fn from(c: Commission) -> Self {
        c.as_tuple()
    }
}

impl fmt::Display for Commission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}/unit, {:.2} total", self.unit_cost, self.total_cost)
    }
}

/// Pricing policy for a single executed transaction.
pub trait CommissionModel: fmt::Debug + fmt::Display {
    /// Commission for `txn`. Pure arithmetic, never fails.
    fn calculate(&self, txn: &Transaction) -> Commission;

    /// Short model name, e.g. `"PerShare"`.
    fn name(&self) -> &'static str;
}

/// Check that a configured real is finite and non-negative.
pub(crate) fn check_non_negative(model: &'static str, field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidConfig {
            model,
            reason: format!("{field} must be finite and >= 0, got {value}"),
        });
    }
    Ok(())
}

/// Any of the supported commission models.
///
/// Deserializes from an internally tagged mapping, e.g.
/// `{ model = "per_share", cost = 0.005, min_trade_cost = 1.0 }`.
/// Omitted fields take the variant's defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum Model {
    PerShare(PerShare),
    PerTrade(PerTrade),
    PerDollar(PerDollar),
    OpenCloseCost(OpenCloseCost),
}

impl Model {
    fn inner(&self) -> &dyn CommissionModel {
        match self {
            Model::PerShare(m) => m,
            Model::PerTrade(m) => m,
            Model::PerDollar(m) => m,
            Model::OpenCloseCost(m) => m,
        }
    }

    /// Reject negative or non-finite configuration.
    pub fn validate(&self) -> Result<()> {
        match self {
            Model::PerShare(m) => m.validate(),
            Model::PerTrade(m) => m.validate(),
            Model::PerDollar(m) => m.validate(),
            Model::OpenCloseCost(m) => m.validate(),
        }
    }

    /// Export the wrapped model's state.
    pub fn export_state(&self) -> SavedState {
        match self {
            Model::PerShare(m) => m.export_state(),
            Model::PerTrade(m) => m.export_state(),
            Model::PerDollar(m) => m.export_state(),
            Model::OpenCloseCost(m) => m.export_state(),
        }
    }

    /// Restore state into the wrapped model. The variant never changes.
    pub fn import_state(&mut self, state: SavedState) -> Result<()> {
        match self {
            Model::PerShare(m) => m.import_state(state),
            Model::PerTrade(m) => m.import_state(state),
            Model::PerDollar(m) => m.import_state(state),
            Model::OpenCloseCost(m) => m.import_state(state),
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Model::PerShare(PerShare::default())
    }
}

impl CommissionModel for Model {
    fn calculate(&self, txn: &Transaction) -> Commission {
        self.inner().calculate(txn)
    }

    fn name(&self) -> &'static str {
        self.inner().name()
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.inner(), f)
    }
}

impl From<PerShare> for Model {
    fn from(m: PerShare) -> Self {
        Model::PerShare(m)
    }
}

impl From<PerTrade> for Model {
    fn from(m: PerTrade) -> Self {
        Model::PerTrade(m)
    }
}

impl From<PerDollar> for Model {
    fn from(m: PerDollar) -> Self {
        Model::PerDollar(m)
    }
}

impl From<OpenCloseCost> for Model {
    fn from(m: OpenCloseCost) -> Self {
        Model::OpenCloseCost(m)
    }
}

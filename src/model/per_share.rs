//! Per-share commission with an optional minimum per trade.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use super::{check_non_negative, Commission, CommissionModel};
use crate::error::Result;
use crate::state::{log_export, log_import, SavedState, Versioned};
use crate::transaction::Transaction;

/// Charges `cost` for every unit traded, floored at `min_trade_cost`.
///
/// ```
/// use nanobook_commission::{CommissionModel, PerShare, Transaction};
///
/// let model = PerShare::new(0.03).with_min_trade_cost(5.0);
/// // 100 * $0.03 = $3.00, raised to the $5.00 minimum
/// let c = model.calculate(&Transaction::new(100.0, 42.0));
/// assert_eq!(c.total_cost, 5.0);
/// assert_eq!(c.unit_cost, 0.05);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerShare {
    /// Cost per unit traded
    pub cost: f64,
    /// Minimum total per trade, `None` for no floor
    pub min_trade_cost: Option<f64>,
}

impl PerShare {
    /// Per-share model without a minimum.
    pub fn new(cost: f64) -> Self {
        Self {
            cost,
            min_trade_cost: None,
        }
    }

    /// Set the minimum total commission per trade.
    pub fn with_min_trade_cost(mut self, min_trade_cost: f64) -> Self {
        self.min_trade_cost = Some(min_trade_cost);
        self
    }

    /// Reject negative or non-finite configuration.
    pub fn validate(&self) -> Result<()> {
        check_non_negative(Self::MODEL, "cost", self.cost)?;
        if let Some(min) = self.min_trade_cost {
            check_non_negative(Self::MODEL, "min_trade_cost", min)?;
        }
        Ok(())
    }
}

impl Default for PerShare {
    /// Three cents per share, no minimum.
    fn default() -> Self {
        Self::new(0.03)
    }
}

impl CommissionModel for PerShare {
    fn calculate(&self, txn: &Transaction) -> Commission {
        let commission = (txn.amount * self.cost).abs();
        match self.min_trade_cost {
            None => Commission::new(self.cost, commission),
            Some(_) if txn.amount == 0.0 => {
                debug!("PerShare: zero amount with minimum configured, charging nothing");
                Commission::ZERO
            }
            Some(min) => {
                let commission = commission.max(min);
                Commission::new((commission / txn.amount).abs(), commission)
            }
        }
    }

    fn name(&self) -> &'static str {
        Self::MODEL
    }
}

impl Versioned for PerShare {
    const MODEL: &'static str = "PerShare";
    const FIELDS: &'static [&'static str] = &["cost", "min_trade_cost"];

    fn export_state(&self) -> SavedState {
        let state = SavedState::for_model(Self::MODEL, Self::STATE_VERSION)
            .with("cost", self.cost)
            .with("min_trade_cost", self.min_trade_cost);
        log_export(self, &state);
        state
    }

    fn import_state(&mut self, state: SavedState) -> Result<()> {
        state.check_compatible(Self::MODEL, Self::OLDEST_SUPPORTED_STATE)?;
        state.warn_unknown(Self::MODEL, Self::FIELDS);

        let cost = state.float(Self::MODEL, "cost")?;
        let min_trade_cost = state.optional_float(Self::MODEL, "min_trade_cost")?;

        let restored = Self {
            cost: cost.unwrap_or(self.cost),
            min_trade_cost: min_trade_cost.unwrap_or(self.min_trade_cost),
        };
        restored.validate()?;
        *self = restored;
        log_import(self, state.version);
        Ok(())
    }
}

impl fmt::Display for PerShare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.min_trade_cost {
            Some(min) => write!(f, "PerShare(cost={}, min_trade_cost={})", self.cost, min),
            None => write!(f, "PerShare(cost={}, min_trade_cost=None)", self.cost),
        }
    }
}

//! Flat fee per trade.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{check_non_negative, Commission, CommissionModel};
use crate::error::Result;
use crate::state::{log_export, log_import, SavedState, Versioned};
use crate::transaction::Transaction;

/// Charges `cost` once per trade, regardless of share count.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerTrade {
    /// Flat fee per trade
    pub cost: f64,
}

impl PerTrade {
    pub fn new(cost: f64) -> Self {
        Self { cost }
    }

    /// Reject negative or non-finite configuration.
    pub fn validate(&self) -> Result<()> {
        check_non_negative(Self::MODEL, "cost", self.cost)
    }
}

impl Default for PerTrade {
    /// $5.00 per trade, typical of discount brokers.
    fn default() -> Self {
        Self::new(5.0)
    }
}

impl CommissionModel for PerTrade {
    fn calculate(&self, txn: &Transaction) -> Commission {
        if txn.amount == 0.0 {
            return Commission::ZERO;
        }
        Commission::new((self.cost / txn.amount).abs(), self.cost)
    }

    fn name(&self) -> &'static str {
        Self::MODEL
    }
}

impl Versioned for PerTrade {
    const MODEL: &'static str = "PerTrade";
    const FIELDS: &'static [&'static str] = &["cost"];

    fn export_state(&self) -> SavedState {
        let state = SavedState::for_model(Self::MODEL, Self::STATE_VERSION).with("cost", self.cost);
        log_export(self, &state);
        state
    }

    fn import_state(&mut self, state: SavedState) -> Result<()> {
        state.check_compatible(Self::MODEL, Self::OLDEST_SUPPORTED_STATE)?;
        state.warn_unknown(Self::MODEL, Self::FIELDS);

        let cost = state.float(Self::MODEL, "cost")?;

        let restored = Self {
            cost: cost.unwrap_or(self.cost),
        };
        restored.validate()?;
        *self = restored;
        log_import(self, state.version);
        Ok(())
    }
}

impl fmt::Display for PerTrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PerTrade(cost={})", self.cost)
    }
}

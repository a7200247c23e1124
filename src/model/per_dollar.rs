//! Commission as a fraction of dollar volume.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{check_non_negative, Commission, CommissionModel};
use crate::error::Result;
use crate::state::{log_export, log_import, SavedState, Versioned};
use crate::transaction::Transaction;

/// Charges `cost` per dollar traded.
///
/// `0.0015` on $1,000,000 of volume is a $1,500 commission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerDollar {
    /// Fraction of dollar volume
    pub cost: f64,
}

impl PerDollar {
    pub fn new(cost: f64) -> Self {
        Self { cost }
    }

    /// Reject negative or non-finite configuration.
    pub fn validate(&self) -> Result<()> {
        check_non_negative(Self::MODEL, "cost", self.cost)
    }
}

impl Default for PerDollar {
    fn default() -> Self {
        Self::new(0.0015)
    }
}

impl CommissionModel for PerDollar {
    fn calculate(&self, txn: &Transaction) -> Commission {
        let cost_per_share = txn.price * self.cost;
        Commission::new(cost_per_share, txn.amount.abs() * cost_per_share)
    }

    fn name(&self) -> &'static str {
        Self::MODEL
    }
}

impl Versioned for PerDollar {
    const MODEL: &'static str = "PerDollar";
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

impl fmt::Display for PerDollar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PerDollar(cost={})", self.cost)
    }
}

//! Open/close aware commission with a closing tax.
//!
//! Opening (buy) and closing (sell) trades pay different commission rates,
//! and closing trades also pay a transfer tax, both as a fraction of the
//! execution price.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{check_non_negative, Commission, CommissionModel};
use crate::error::Result;
use crate::state::{log_export, log_import, SavedState, Versioned};
use crate::transaction::Transaction;

/// Asymmetric commission for opening and closing trades.
///
/// `close_today_commission` and `min_commission` are carried in the
/// configuration and saved state but do not enter the price formula.
///
/// ```
/// use nanobook_commission::{CommissionModel, OpenCloseCost, Transaction};
///
/// let model = OpenCloseCost::default();
/// let buy = model.calculate(&Transaction::new(100.0, 10.0));
/// let sell = model.calculate(&Transaction::new(-100.0, 10.0));
/// assert!(sell.total_cost > buy.total_cost); // closing pays the tax
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenCloseCost {
    /// Tax rate on opening trades (not applied)
    pub open_tax: f64,
    /// Tax rate on closing trades
    pub close_tax: f64,
    /// Commission rate on opening trades
    pub open_commission: f64,
    /// Commission rate on closing trades
    pub close_commission: f64,
    /// Commission rate for closing a position opened the same day (reserved)
    pub close_today_commission: f64,
    /// Minimum commission per trade (reserved)
    pub min_commission: f64,
}

impl OpenCloseCost {
    /// Model with the given tax and commission rates; reserved fields are zero.
    pub fn new(open_tax: f64, close_tax: f64, open_commission: f64, close_commission: f64) -> Self {
        Self {
            open_tax,
            close_tax,
            open_commission,
            close_commission,
            close_today_commission: 0.0,
            min_commission: 0.0,
        }
    }

    /// Reject negative or non-finite configuration.
    pub fn validate(&self) -> Result<()> {
        check_non_negative(Self::MODEL, "open_tax", self.open_tax)?;
        check_non_negative(Self::MODEL, "close_tax", self.close_tax)?;
        check_non_negative(Self::MODEL, "open_commission", self.open_commission)?;
        check_non_negative(Self::MODEL, "close_commission", self.close_commission)?;
        check_non_negative(
            Self::MODEL,
            "close_today_commission",
            self.close_today_commission,
        )?;
        check_non_negative(Self::MODEL, "min_commission", self.min_commission)
    }
}

impl Default for OpenCloseCost {
    fn default() -> Self {
        Self {
            open_tax: 0.0,
            close_tax: 0.001,
            open_commission: 0.003,
            close_commission: 0.003,
            close_today_commission: 0.0,
            min_commission: 5.0,
        }
    }
}

impl CommissionModel for OpenCloseCost {
    fn calculate(&self, txn: &Transaction) -> Commission {
        if txn.amount == 0.0 {
            return Commission::ZERO;
        }
        if txn.amount > 0.0 {
            let unit = txn.price * self.open_commission;
            Commission::new(unit, unit * txn.amount)
        } else {
            let unit = txn.price * (self.close_commission + self.close_tax);
            Commission::new(unit, unit * txn.amount.abs())
        }
    }

    fn name(&self) -> &'static str {
        Self::MODEL
    }
}

impl Versioned for OpenCloseCost {
    const MODEL: &'static str = "OpenCloseCost";
    const FIELDS: &'static [&'static str] = &[
        "open_tax",
        "close_tax",
        "open_commission",
        "close_commission",
        "close_today_commission",
        "min_commission",
    ];

    fn export_state(&self) -> SavedState {
        let state = SavedState::for_model(Self::MODEL, Self::STATE_VERSION)
            .with("open_tax", self.open_tax)
            .with("close_tax", self.close_tax)
            .with("open_commission", self.open_commission)
            .with("close_commission", self.close_commission)
            .with("close_today_commission", self.close_today_commission)
            .with("min_commission", self.min_commission);
        log_export(self, &state);
        state
    }

    fn import_state(&mut self, state: SavedState) -> Result<()> {
        state.check_compatible(Self::MODEL, Self::OLDEST_SUPPORTED_STATE)?;
        state.warn_unknown(Self::MODEL, Self::FIELDS);

        let open_tax = state.float(Self::MODEL, "open_tax")?;
        let close_tax = state.float(Self::MODEL, "close_tax")?;
        let open_commission = state.float(Self::MODEL, "open_commission")?;
        let close_commission = state.float(Self::MODEL, "close_commission")?;
        let close_today_commission = state.float(Self::MODEL, "close_today_commission")?;
        let min_commission = state.float(Self::MODEL, "min_commission")?;

        let restored = Self {
            open_tax: open_tax.unwrap_or(self.open_tax),
            close_tax: close_tax.unwrap_or(self.close_tax),
            open_commission: open_commission.unwrap_or(self.open_commission),
            close_commission: close_commission.unwrap_or(self.close_commission),
            close_today_commission: close_today_commission.unwrap_or(self.close_today_commission),
            min_commission: min_commission.unwrap_or(self.min_commission),
        };
        restored.validate()?;
        *self = restored;
        log_import(self, state.version);
        Ok(())
    }
}

impl fmt::Display for OpenCloseCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OpenCloseCost(open_tax={}, close_tax={}, open_commission={}, close_commission={}, \
             close_today_commission={}, min_commission={})",
            self.open_tax,
            self.close_tax,
            self.open_commission,
            self.close_commission,
            self.close_today_commission,
            self.min_commission
        )
    }
}

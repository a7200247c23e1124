//! Transaction representation

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single executed trade, as seen by a commission model.
///
/// `amount` is signed: positive opens (buys), negative closes (sells).
/// A zero amount is valid and handled by every model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Signed quantity executed
    pub amount: f64,
    /// Execution price per unit (non-negative)
    pub price: f64,
}

impl Transaction {
    /// Create a new transaction.
    pub fn new(amount: f64, price: f64) -> Self {
        Self { amount, price }
    }

    /// True for a buy / position-opening transaction.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.amount > 0.0
    }

    /// True for a sell / position-closing transaction.
    #[inline]
    pub fn is_close(&self) -> bool {
        self.amount < 0.0
    }

    /// Dollar volume of the transaction, `|amount| * price`.
    #[inline]
    pub fn notional(&self) -> f64 {
        self.amount.abs() * self.price
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_open() {
            write!(f, "bought {} @ {}", self.amount, self.price)
        } else if self.is_close() {
            write!(f, "sold {} @ {}", -self.amount, self.price)
        } else {
            write!(f, "no fill @ {}", self.price)
        }
    }
}

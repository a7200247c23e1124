//! # nanobook-commission
//!
//! Broker commission models for backtests: given an executed transaction
//! (signed quantity and price), compute the commission per unit and in total.
//!
//! ## Models
//!
//! | Model | Charge |
//! |-------|--------|
//! | [`PerShare`] | `|amount| * cost`, optionally floored at `min_trade_cost` |
//! | [`PerTrade`] | `cost` per trade |
//! | [`PerDollar`] | `|amount| * price * cost` |
//! | [`OpenCloseCost`] | `price * open_commission` on buys, `price * (close_commission + close_tax)` on sells |
//!
//! ## Quick Start
//!
//! ```
//! use nanobook_commission::{CommissionModel, PerShare, PerTrade, Transaction};
//!
//! let buy = Transaction::new(100.0, 25.0);
//!
//! let per_share = PerShare::new(0.03);
//! assert_eq!(per_share.calculate(&buy).as_tuple(), (0.03, 3.0));
//!
//! let per_trade = PerTrade::new(5.0);
//! let c = per_trade.calculate(&buy);
//! assert_eq!(c.total_cost, 5.0);
//! assert_eq!(c.unit_cost, 0.05);
//! ```
//!
//! ## Choosing a model at runtime
//!
//! [`Model`] is the closed set of all models and can be read from TOML:
//!
//! ```
//! use nanobook_commission::{CommissionModel, Config, Transaction};
//!
//! let config = Config::parse(r#"
//! [commission]
//! model = "per_dollar"
//! cost = 0.0015
//! "#).unwrap();
//!
//! let c = config.commission.calculate(&Transaction::new(-1000.0, 10.0));
//! assert!((c.total_cost - 15.0).abs() < 1e-9);
//! ```
//!
//! ## Saved state
//!
//! Every model exports a versioned [`SavedState`] and restores from one.
//! State stamped with a version older than the model supports is rejected
//! and the model is left unchanged:
//!
//! ```
//! use nanobook_commission::{Error, PerTrade, Versioned};
//!
//! let mut model = PerTrade::new(1.0);
//! let mut state = PerTrade::new(9.0).export_state();
//! state.version = 0;
//!
//! assert!(matches!(model.import_state(state), Err(Error::StateTooOld { .. })));
//! assert_eq!(model.cost, 1.0);
//! ```

pub mod config;
mod error;
pub mod model;
pub mod state;
mod transaction;

// Re-export public API
pub use config::Config;
pub use error::{Error, Result};
pub use model::{Commission, CommissionModel, Model, OpenCloseCost, PerDollar, PerShare, PerTrade};
pub use state::{SavedState, StateValue, Versioned, MODEL_LABEL, VERSION_LABEL};
pub use transaction::Transaction;

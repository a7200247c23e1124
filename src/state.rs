//! Versioned state export and import.
//!
//! Every commission model can be saved as a [`SavedState`]: the schema
//! version it was written with plus a mapping of its persisted fields.
//! Restoring checks the version against the oldest schema this build
//! understands before touching the model.
//!
//! Version numbers are monotonically increasing integers starting at 1.
//! A later schema may add fields under a higher version, but the oldest
//! supported version never moves below one that was already released.
//!
//! # Persisted format
//!
//! On disk the state is a single flat mapping where the version stamp sits
//! next to the fields under the reserved [`VERSION_LABEL`] key, and the
//! name of the model that wrote it under [`MODEL_LABEL`]:
//!
//! ```
//! use nanobook_commission::{PerShare, SavedState, Versioned};
//!
//! let model = PerShare::new(0.01).with_min_trade_cost(1.0);
//! let json = model.export_state().to_json().unwrap();
//! assert_eq!(
//!     json,
//!     r#"{"_model_":"PerShare","_stateversion_":1,"cost":0.01,"min_trade_cost":1.0}"#
//! );
//!
//! let restored = PerShare::from_state(SavedState::from_json(&json).unwrap()).unwrap();
//! assert_eq!(restored, model);
//! ```

use std::collections::BTreeMap;

use log::{debug, warn};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Reserved key holding the version stamp in the flat persisted mapping.
pub const VERSION_LABEL: &str = "_stateversion_";

/// Reserved key holding the writing model's name in the flat persisted mapping.
pub const MODEL_LABEL: &str = "_model_";

/// A primitive value stored in saved state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateValue {
    Null,
    Int(i64),
    Float(f64),
    Str(String),
}

impl StateValue {
    /// Numeric view of the value. Integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            StateValue::Int(v) => Some(v as f64),
            StateValue::Float(v) => Some(v),
            StateValue::Null | StateValue::Str(_) => None,
        }
    }
}

impl From<f64> for StateValue {
    fn from(v: f64) -> Self {
        StateValue::Float(v)
    }
}

impl From<i64> for StateValue {
    fn from(v: i64) -> Self {
        StateValue::Int(v)
    }
}

impl From<Option<f64>> for StateValue {
    fn from(v: Option<f64>) -> Self {
        v.map_or(StateValue::Null, StateValue::Float)
    }
}

impl From<&str> for StateValue {
    fn from(v: &str) -> Self {
        StateValue::Str(v.to_string())
    }
}

/// Exported state of one model: schema version plus persisted fields.
///
/// `model` names the model that wrote the state. States saved without a
/// tag carry `None` and are accepted by any model.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SavedState {
    pub version: u32,
    pub model: Option<String>,
    pub fields: FxHashMap<String, StateValue>,
}

impl SavedState {
    /// Empty untagged state stamped with `version`.
    pub fn new(version: u32) -> Self {
        Self {
            version,
            model: None,
            fields: FxHashMap::default(),
        }
    }

    /// Empty state written by `model` with schema `version`.
    pub fn for_model(model: &str, version: u32) -> Self {
        Self {
            model: Some(model.to_string()),
            ..Self::new(version)
        }
    }

    /// Builder-style field insert.
    pub fn with(mut self, field: &str, value: impl Into<StateValue>) -> Self {
        self.fields.insert(field.to_string(), value.into());
        self
    }

    /// Look up a raw field value.
    pub fn get(&self, field: &str) -> Option<&StateValue> {
        self.fields.get(field)
    }

    /// Reject a state written by another model or by a schema older than `oldest`.
    pub fn check_compatible(&self, model: &'static str, oldest: u32) -> Result<()> {
        if let Some(found) = self.model.as_deref() {
            if found != model {
                return Err(Error::ModelMismatch {
                    expected: model,
                    found: found.to_string(),
                });
            }
        }
        if self.version < oldest {
            return Err(Error::StateTooOld {
                model,
                version: self.version,
                oldest,
            });
        }
        Ok(())
    }

    /// Read a required real field.
    ///
    /// `Ok(None)` means the field is absent and the caller keeps its current
    /// value. A `null` is invalid here.
    pub fn float(&self, model: &'static str, field: &'static str) -> Result<Option<f64>> {
        match self.get(field) {
            None => Ok(None),
            Some(value) => value
                .as_f64()
                .map(Some)
                .ok_or(Error::InvalidField { model, field }),
        }
    }

    /// Read a nullable real field.
    ///
    /// The outer `Option` is presence, the inner one is the stored value.
    pub fn optional_float(
        &self,
        model: &'static str,
        field: &'static str,
    ) -> Result<Option<Option<f64>>> {
        match self.get(field) {
            None => Ok(None),
            Some(StateValue::Null) => Ok(Some(None)),
            Some(value) => value
                .as_f64()
                .map(|v| Some(Some(v)))
                .ok_or(Error::InvalidField { model, field }),
        }
    }

    /// Log and skip keys that `known` does not declare.
    pub(crate) fn warn_unknown(&self, model: &'static str, known: &[&str]) {
        for key in self.fields.keys() {
            if !known.contains(&key.as_str()) {
                warn!("{model}: ignoring unknown saved state field '{key}'");
            }
        }
    }

    /// Flatten into a single mapping with the stamp under [`VERSION_LABEL`]
    /// and the model tag, if any, under [`MODEL_LABEL`].
    pub fn into_flat(self) -> FxHashMap<String, StateValue> {
        let mut flat = self.fields;
        flat.insert(
            VERSION_LABEL.to_string(),
            StateValue::Int(i64::from(self.version)),
        );
        if let Some(model) = self.model {
            flat.insert(MODEL_LABEL.to_string(), StateValue::Str(model));
        }
        flat
    }

    /// Split a flat mapping into version and fields.
    ///
    /// The stamp is removed from the mapping; it must be present and a
    /// non-negative integer. The model tag is optional but must be a string.
    pub fn from_flat(mut flat: FxHashMap<String, StateValue>) -> Result<Self> {
        let version = match flat.remove(VERSION_LABEL) {
            None => return Err(Error::MissingVersion { key: VERSION_LABEL }),
            Some(StateValue::Int(v)) => {
                u32::try_from(v).map_err(|_| Error::InvalidVersion { key: VERSION_LABEL })?
            }
            Some(_) => return Err(Error::InvalidVersion { key: VERSION_LABEL }),
        };
        let model = match flat.remove(MODEL_LABEL) {
            None => None,
            Some(StateValue::Str(name)) => Some(name),
            Some(_) => return Err(Error::InvalidModelTag { key: MODEL_LABEL }),
        };
        Ok(Self {
            version,
            model,
            fields: flat,
        })
    }

    /// Serialize the flat mapping as JSON with sorted keys.
    pub fn to_json(&self) -> Result<String> {
        let sorted: BTreeMap<String, StateValue> = self.clone().into_flat().into_iter().collect();
        Ok(serde_json::to_string(&sorted)?)
    }

    /// Parse a flat JSON mapping produced by [`SavedState::to_json`].
    pub fn from_json(json: &str) -> Result<Self> {
        let flat: FxHashMap<String, StateValue> = serde_json::from_str(json)?;
        Self::from_flat(flat)
    }
}

/// Log a successful export.
pub(crate) fn log_export(model: &dyn std::fmt::Display, state: &SavedState) {
    debug!("exported {} as state v{}", model, state.version);
}

/// Log a successful restore.
pub(crate) fn log_import(model: &dyn std::fmt::Display, version: u32) {
    debug!("restored {} from state v{}", model, version);
}

/// Versioned persistence contract implemented by every commission model.
pub trait Versioned {
    /// Model name used in diagnostics and errors.
    const MODEL: &'static str;
    /// Schema version written by [`Versioned::export_state`].
    const STATE_VERSION: u32 = 1;
    /// Oldest schema version [`Versioned::import_state`] accepts.
    const OLDEST_SUPPORTED_STATE: u32 = 1;
    /// Fields written to and read from saved state.
    const FIELDS: &'static [&'static str];

    /// Export the persisted fields stamped with [`Versioned::STATE_VERSION`].
    fn export_state(&self) -> SavedState;

    /// Restore fields from `state`.
    ///
    /// Fails with [`Error::ModelMismatch`] if the state was written by another
    /// model, with [`Error::StateTooOld`] if the stamp is below
    /// [`Versioned::OLDEST_SUPPORTED_STATE`], and with
    /// [`Error::InvalidConfig`] if the restored configuration does not
    /// validate. On any error `self` is left untouched. Declared fields
    /// missing from `state` keep their current value.
    fn import_state(&mut self, state: SavedState) -> Result<()>;

    /// Build a default instance and restore `state` into it.
    fn from_state(state: SavedState) -> Result<Self>
    where
        Self: Sized + Default,
    {
        let mut model = Self::default();
        model.import_state(state)?;
        Ok(model)
    }
}

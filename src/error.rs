//! Error types for commission configuration and saved state.

use std::path::PathBuf;

/// All errors that can occur while configuring or restoring a commission model.
///
/// `calculate` itself never fails; every variant here comes from state
/// import, configuration loading or the JSON medium.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{model} saved state is too old: version {version} < oldest supported {oldest}")]
    StateTooOld {
        model: &'static str,
        version: u32,
        oldest: u32,
    },

    #[error("saved state was written by {found}, cannot restore into {expected}")]
    ModelMismatch {
        expected: &'static str,
        found: String,
    },

    #[error("saved state has no `{key}` version stamp")]
    MissingVersion { key: &'static str },

    #[error("saved state version stamp `{key}` is not a non-negative integer")]
    InvalidVersion { key: &'static str },

    #[error("saved state model tag `{key}` is not a string")]
    InvalidModelTag { key: &'static str },

    #[error("{model} saved state field `{field}` has an invalid value")]
    InvalidField {
        model: &'static str,
        field: &'static str,
    },

    #[error("invalid {model} configuration: {reason}")]
    InvalidConfig { model: &'static str, reason: String },

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to read saved state file {path}: {source}")]
    StateRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("saved state JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

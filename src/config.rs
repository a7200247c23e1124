//! TOML configuration loading and validation.
//!
//! ```toml
//! [commission]
//! model = "per_share"
//! cost = 0.0035
//! min_trade_cost = 0.35
//! ```

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::Model;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub commission: Model,
}

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config = Self::parse(&contents)?;
        debug!("loaded {} from {}", config.commission, path.display());
        Ok(config)
    }

    /// Parse and validate config from a TOML string.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config invariants.
    pub fn validate(&self) -> Result<()> {
        self.commission.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OpenCloseCost, PerDollar, PerShare, PerTrade};
    use std::io::Write;

    #[test]
    fn parse_per_share() {
        let config = Config::parse(
            r#"
[commission]
model = "per_share"
cost = 0.0035
min_trade_cost = 0.35
"#,
        )
        .unwrap();
        assert_eq!(
            config.commission,
            Model::PerShare(PerShare::new(0.0035).with_min_trade_cost(0.35))
        );
    }

    #[test]
    fn parse_per_trade_and_per_dollar() {
        let config = Config::parse("[commission]\nmodel = \"per_trade\"\ncost = 1.0\n").unwrap();
        assert_eq!(config.commission, Model::PerTrade(PerTrade::new(1.0)));

        let config = Config::parse("[commission]\nmodel = \"per_dollar\"\ncost = 0.001\n").unwrap();
        assert_eq!(config.commission, Model::PerDollar(PerDollar::new(0.001)));
    }

    #[test]
    fn omitted_fields_take_defaults() {
        let config = Config::parse(
            r#"
[commission]
model = "open_close_cost"
close_tax = 0.0005
"#,
        )
        .unwrap();
        let expected = OpenCloseCost {
            close_tax: 0.0005,
            ..OpenCloseCost::default()
        };
        assert_eq!(config.commission, Model::OpenCloseCost(expected));
    }

    #[test]
    fn empty_config_is_default() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn unknown_model_fails_to_parse() {
        let err = Config::parse("[commission]\nmodel = \"per_lot\"\n").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn negative_cost_fails_validation() {
        let err = Config::parse("[commission]\nmodel = \"per_trade\"\ncost = -1.0\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { model: "PerTrade", .. }));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[commission]\nmodel = \"per_dollar\"\ncost = 0.002").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.commission, Model::PerDollar(PerDollar::new(0.002)));
    }

    #[test]
    fn load_missing_file() {
        let err = Config::load(Path::new("does_not_exist.toml")).unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
    }
}

//! Configuration for pricing sessions, loaded from TOML.
//!
//! ```toml
//! [session]
//! verbosity = 2
//! decimals = 6
//! echo_contract = true
//!
//! [defaults]
//! dividend_yield = 0.015
//! ```
//!
//! Every field is optional; missing fields take the values of
//! [`PricerConfig::standard`].

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest number of decimals a price is printed with.
pub const MAX_DECIMALS: usize = 12;

/// Settings controlling how an interactive session reports results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Verbosity level (0=silent, 1=minimal, 2=normal, 3=debug)
    #[serde(default = "default_verbosity")]
    pub verbosity: u8,
    /// Decimals used when printing a price
    #[serde(default = "default_decimals")]
    pub decimals: usize,
    /// Print the validated contract before its price
    #[serde(default)]
    pub echo_contract: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            verbosity: default_verbosity(),
            decimals: default_decimals(),
            echo_contract: false,
        }
    }
}

/// Market inputs substituted when the caller leaves them blank
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MarketDefaults {
    /// Continuous dividend yield used for an empty answer (default: 0.0)
    #[serde(default)]
    pub dividend_yield: f64,
}

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricerConfig {
    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub defaults: MarketDefaults,
}

impl PricerConfig {
    /// Default settings: minimal logging, four decimals, no dividend.
    pub fn standard() -> Self {
        Self::default()
    }

    /// Errors only, no contract echo
    pub fn quiet() -> Self {
        Self {
            session: SessionConfig {
                verbosity: 0,
                ..SessionConfig::default()
            },
            ..Self::default()
        }
    }

    /// Debug logging, six decimals and the contract echoed before each price
    pub fn verbose() -> Self {
        Self {
            session: SessionConfig {
                verbosity: 3,
                decimals: 6,
                echo_contract: true,
            },
            ..Self::default()
        }
    }

    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: PricerConfig =
            toml::from_str(text).context("Failed to parse pricer configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if !self.defaults.dividend_yield.is_finite() {
            return Err(anyhow!(
                "defaults.dividend_yield ({}) must be finite",
                self.defaults.dividend_yield
            ));
        }
        if self.session.decimals > MAX_DECIMALS {
            return Err(anyhow!(
                "session.decimals ({}) must be at most {}",
                self.session.decimals,
                MAX_DECIMALS
            ));
        }
        Ok(())
    }

    /// Default `tracing` filter directive for the configured verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.session.verbosity {
            0 => "error",
            1 => "warn",
            2 => "info",
            _ => "debug",
        }
    }
}

fn default_verbosity() -> u8 {
    1
}

fn default_decimals() -> usize {
    4
}

use std::env;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::services::checkout::DiscountPolicy;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{key} must be a decimal number, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },

    #[error("{key} is out of range: {message}")]
    OutOfRange { key: &'static str, message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct Config {
    pub discount: DiscountPolicy,
    pub currency: String,
    pub log_level: String,
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            discount: DiscountPolicy::default(),
            currency: "Rp".to_string(),
            log_level: "warn".to_string(),
            environment: "development".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let config = Self::from_lookup(|key| env::var(key).ok())?;

        tracing::info!("Config: successfully loaded for {} environment", config.environment);
        Ok(config)
    }

    /// Build a config from any key lookup, falling back to defaults for
    /// missing keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let threshold = match lookup("MARKET_DISCOUNT_THRESHOLD") {
            Some(value) => parse_decimal("MARKET_DISCOUNT_THRESHOLD", &value)?,
            None => defaults.discount.threshold,
        };
        let rate = match lookup("MARKET_DISCOUNT_RATE") {
            Some(value) => parse_decimal("MARKET_DISCOUNT_RATE", &value)?,
            None => defaults.discount.rate,
        };

        let config = Config {
            discount: DiscountPolicy { threshold, rate },
            currency: lookup("MARKET_CURRENCY").unwrap_or(defaults.currency),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            environment: lookup("APP_ENV").unwrap_or(defaults.environment),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.discount.threshold < Decimal::ZERO {
            return Err(ConfigError::OutOfRange {
                key: "MARKET_DISCOUNT_THRESHOLD",
                message: "must not be negative".to_string(),
            });
        }

        if self.discount.rate < Decimal::ZERO || self.discount.rate > Decimal::ONE {
            return Err(ConfigError::OutOfRange {
                key: "MARKET_DISCOUNT_RATE",
                message: "must be between 0 and 1".to_string(),
            });
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Log filter directive. `--verbose` switches to debug logging except in
    /// production, where the configured level always wins.
    pub fn log_filter(&self, verbose: bool) -> &str {
        if verbose && !self.is_production() {
            "debug"
        } else {
            &self.log_level
        }
    }
}

fn parse_decimal(key: &'static str, value: &str) -> Result<Decimal, ConfigError> {
    Decimal::from_str(value.trim()).map_err(|_| ConfigError::InvalidNumber {
        key,
        value: value.to_string(),
    })
}

//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `BAZAAR_CURRENCY` - Currency for demo catalogs (default: USD)
//! - `BAZAAR_TAX_RATE` - Order tax rate, `0 <= rate < 1` (default: 0.085)
//! - `BAZAAR_LOG_FORMAT` - `pretty` or `json` (default: pretty)
//! - `BAZAAR_DEMO_FILE` - File used by the `files` demo
//!   (default: `bazaar_demo.txt` in the system temp directory)
//! - `RUST_LOG` - Log filter (default: info)

use std::path::PathBuf;
use std::str::FromStr;

use bazaar_core::Currency;
use bazaar_core::order::PricingPolicy;
use rust_decimal::Decimal;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `pretty` or `json`, got `{other}`")),
        }
    }
}

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Currency every demo product is priced in
    pub currency: Currency,
    /// Tax and shipping rules for demo orders
    pub pricing: PricingPolicy,
    /// Log output format
    pub log_format: LogFormat,
    /// Scratch file for the scoped file demo
    pub demo_file: PathBuf,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            currency: Currency::USD,
            pricing: PricingPolicy::default(),
            log_format: LogFormat::Pretty,
            demo_file: default_demo_file(),
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns the value of a
    /// variable if set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(currency) = parse_var(&lookup, "BAZAAR_CURRENCY")? {
            config.currency = currency;
        }
        if let Some(rate) = parse_var::<Decimal, _>(&lookup, "BAZAAR_TAX_RATE")? {
            config.pricing = config
                .pricing
                .with_tax_rate(rate)
                .map_err(|e| invalid("BAZAAR_TAX_RATE", e))?;
        }
        if let Some(format) = parse_var(&lookup, "BAZAAR_LOG_FORMAT")? {
            config.log_format = format;
        }
        if let Some(path) = lookup("BAZAAR_DEMO_FILE").filter(|p| !p.trim().is_empty()) {
            config.demo_file = PathBuf::from(path);
        }

        Ok(config)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn default_demo_file() -> PathBuf {
    std::env::temp_dir().join("bazaar_demo.txt")
}

fn invalid(key: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), reason.to_string())
}

/// Parse an optional variable. Unset and blank values are `None`.
fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| invalid(key, e)),
        _ => Ok(None),
    }
}

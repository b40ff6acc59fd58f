//! Session configuration.
//!
//! # Responsibility
//! - Hold the tunable defaults used by aggregations, invoices and toasts.
//! - Read overrides from `CHANTIER_*` environment variables.
//!
//! # Invariants
//! - A malformed override is an error, never silently replaced by a default.
//! - Unset or blank variables keep the default.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub const ENV_UPCOMING_LIMIT: &str = "CHANTIER_UPCOMING_LIMIT";
pub const ENV_TAX_RATE: &str = "CHANTIER_TAX_RATE";
pub const ENV_TOAST_MS: &str = "CHANTIER_TOAST_MS";
pub const ENV_CURRENCY: &str = "CHANTIER_CURRENCY";
pub const ENV_INVOICE_PREFIX: &str = "CHANTIER_INVOICE_PREFIX";
pub const ENV_REPORT_MODEL: &str = "CHANTIER_REPORT_MODEL";
pub const ENV_RISK_MODEL: &str = "CHANTIER_RISK_MODEL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue {
                key,
                value,
                expected,
            } => write!(f, "invalid value `{value}` for {key}: expected {expected}"),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq)]
pub struct CoreConfig {
    /// Number of tasks in the dashboard preview.
    pub upcoming_task_limit: usize,
    /// Tax percentage applied to new invoices without an explicit rate.
    pub default_tax_rate: f64,
    pub toast_duration: Duration,
    pub currency_label: String,
    pub invoice_prefix: String,
    pub report_model: String,
    pub risk_model: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            upcoming_task_limit: 5,
            default_tax_rate: 18.0,
            toast_duration: Duration::from_millis(3000),
            currency_label: "FCFA".to_string(),
            invoice_prefix: "FAC".to_string(),
            report_model: "gemini-2.5-flash".to_string(),
            risk_model: "gemini-2.5-pro".to_string(),
        }
    }
}

impl CoreConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by `lookup(key)` results.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(value) = read(ENV_UPCOMING_LIMIT) {
            config.upcoming_task_limit = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_UPCOMING_LIMIT,
                value: value.clone(),
                expected: "a non-negative integer",
            })?;
        }
        if let Some(value) = read(ENV_TAX_RATE) {
            config.default_tax_rate = value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|rate| rate.is_finite() && *rate >= 0.0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    key: ENV_TAX_RATE,
                    value: value.clone(),
                    expected: "a non-negative percentage",
                })?;
        }
        if let Some(value) = read(ENV_TOAST_MS) {
            let millis: u64 = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_TOAST_MS,
                value: value.clone(),
                expected: "milliseconds as an integer",
            })?;
            config.toast_duration = Duration::from_millis(millis);
        }
        if let Some(value) = read(ENV_CURRENCY) {
            config.currency_label = value.trim().to_string();
        }
        if let Some(value) = read(ENV_INVOICE_PREFIX) {
            config.invoice_prefix = value.trim().to_string();
        }
        if let Some(value) = read(ENV_REPORT_MODEL) {
            config.report_model = value.trim().to_string();
        }
        if let Some(value) = read(ENV_RISK_MODEL) {
            config.risk_model = value.trim().to_string();
        }
        Ok(config)
    }
}

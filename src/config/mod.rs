//! Environment-driven configuration.
//!
//! Every value has a default so the engine runs without any environment set;
//! binaries load `.env` through `dotenvy` before calling [`EngineConfig::from_env`].

use std::env;
use std::str::FromStr;

use tracing::warn;

pub const DEFAULT_PRICE_API_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_CACHE_MAX_AGE_MINUTES: u64 = 180;
pub const DEFAULT_SIGNAL_DEADBAND: f64 = 0.1;
pub const DEFAULT_SUPPORT_RESISTANCE_LOOKBACK: usize = 20;

/// Deployment environment name (`ENVIRONMENT`, defaults to `sandbox`).
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

/// Redis connection string, if one is configured.
pub fn get_redis_url() -> Option<String> {
    env::var("REDIS_URL").ok().filter(|url| !url.trim().is_empty())
}

pub fn get_price_api_url() -> String {
    env::var("PRICE_API_URL").unwrap_or_else(|_| DEFAULT_PRICE_API_URL.to_string())
}

fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(variable = name, value = %raw, "Ignoring unparseable configuration value");
                default
            }
        },
        Err(_) => default,
    }
}

/// Tunables for the analysis and prediction pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub price_api_url: String,
    pub vs_currency: String,
    pub request_timeout_secs: u64,
    pub cache_max_age_minutes: u64,
    /// Scores with `|score| <= signal_deadband` resolve to neutral.
    pub signal_deadband: f64,
    pub support_resistance_lookback: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            price_api_url: DEFAULT_PRICE_API_URL.to_string(),
            vs_currency: "usd".to_string(),
            request_timeout_secs: 15,
            cache_max_age_minutes: DEFAULT_CACHE_MAX_AGE_MINUTES,
            signal_deadband: DEFAULT_SIGNAL_DEADBAND,
            support_resistance_lookback: DEFAULT_SUPPORT_RESISTANCE_LOOKBACK,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let deadband = parse_var("SIGNAL_DEADBAND", defaults.signal_deadband);
        let lookback = parse_var(
            "SUPPORT_RESISTANCE_LOOKBACK",
            defaults.support_resistance_lookback,
        );

        Self {
            price_api_url: get_price_api_url(),
            vs_currency: env::var("PRICE_VS_CURRENCY").unwrap_or(defaults.vs_currency),
            request_timeout_secs: parse_var("PRICE_API_TIMEOUT_SECS", defaults.request_timeout_secs),
            cache_max_age_minutes: parse_var(
                "PREDICTION_CACHE_MAX_AGE_MINUTES",
                defaults.cache_max_age_minutes,
            ),
            signal_deadband: if deadband.is_finite() && deadband >= 0.0 {
                deadband
            } else {
                defaults.signal_deadband
            },
            support_resistance_lookback: lookback.max(1),
        }
    }
}

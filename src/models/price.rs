use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One observation of an asset's price.
///
/// Series are expected ascending by `timestamp` with no duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl PriceSample {
    pub fn new(timestamp: i64, price: f64) -> Self {
        Self {
            timestamp,
            price,
            volume: None,
        }
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }
}

/// Extract the finite prices of a series, preserving order.
pub fn finite_prices(series: &[PriceSample]) -> Vec<f64> {
    series
        .iter()
        .map(|s| s.price)
        .filter(|p| p.is_finite())
        .collect()
}

/// History window requested from a price provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1d")]
    Day,
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
    #[serde(rename = "1y")]
    Year,
}

impl Timeframe {
    pub fn days(self) -> u32 {
        match self {
            Timeframe::Day => 1,
            Timeframe::Week => 7,
            Timeframe::Month => 30,
            Timeframe::Quarter => 90,
            Timeframe::Year => 365,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Timeframe::Day => "1d",
            Timeframe::Week => "7d",
            Timeframe::Month => "30d",
            Timeframe::Quarter => "90d",
            Timeframe::Year => "1y",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1d" | "24h" => Ok(Timeframe::Day),
            "7d" | "1w" => Ok(Timeframe::Week),
            "30d" | "1m" => Ok(Timeframe::Month),
            "90d" | "3m" => Ok(Timeframe::Quarter),
            "1y" | "365d" => Ok(Timeframe::Year),
            other => Err(format!("unknown timeframe '{}'", other)),
        }
    }
}

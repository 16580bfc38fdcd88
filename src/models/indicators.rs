use serde::{Deserialize, Serialize};

use super::signal::SignalDirection;

/// A computed indicator with its own signal and aggregation weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalIndicator {
    pub name: String,
    pub value: f64,
    pub signal: SignalDirection,
    pub weight: f64,
}

impl TechnicalIndicator {
    pub fn new(name: impl Into<String>, value: f64, signal: SignalDirection, weight: f64) -> Self {
        Self {
            name: name.into(),
            value,
            signal,
            weight,
        }
    }

    /// Signed contribution to the aggregate score.
    pub fn contribution(&self) -> f64 {
        self.signal.polarity() * self.weight
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RsiIndicator {
    pub value: f64,
    pub period: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdIndicator {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
    pub period: (u32, u32, u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovingAverageIndicator {
    pub value: f64,
    pub period: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerBandsIndicator {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    pub period: u32,
    pub std_dev: f64,
}

/// Price bands around the latest price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupportResistanceIndicator {
    pub support_level: f64,
    pub resistance_level: f64,
    /// Distance from the latest price down to support, in percent.
    pub support_distance_pct: f64,
    /// Distance from the latest price up to resistance, in percent.
    pub resistance_distance_pct: f64,
}

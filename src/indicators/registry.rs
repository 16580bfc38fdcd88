//! Indicator catalogue: names, lookbacks and aggregation weights

use serde::{Deserialize, Serialize};

/// Supported indicator families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorKind {
    Momentum3,
    Sma5,
    Roc10,
    Rsi14,
    Sma20,
    Bollinger20,
    EmaCross12x26,
    Macd12x26x9,
}

/// Static description of one catalogue entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorSpec {
    pub kind: IndicatorKind,
    pub name: &'static str,
    /// Minimum number of prices needed to compute the indicator.
    pub lookback: usize,
    pub weight: f64,
}

/// Output order of the calculator.
pub const CATALOGUE: [IndicatorSpec; 8] = [
    IndicatorSpec {
        kind: IndicatorKind::Momentum3,
        name: "MOM(3)",
        lookback: 4,
        weight: 0.75,
    },
    IndicatorSpec {
        kind: IndicatorKind::Sma5,
        name: "SMA(5)",
        lookback: 5,
        weight: 0.75,
    },
    IndicatorSpec {
        kind: IndicatorKind::Roc10,
        name: "ROC(10)",
        lookback: 11,
        weight: 1.0,
    },
    IndicatorSpec {
        kind: IndicatorKind::Rsi14,
        name: "RSI(14)",
        lookback: 15,
        weight: 1.5,
    },
    IndicatorSpec {
        kind: IndicatorKind::Sma20,
        name: "SMA(20)",
        lookback: 20,
        weight: 1.0,
    },
    IndicatorSpec {
        kind: IndicatorKind::Bollinger20,
        name: "BB(20,2)",
        lookback: 20,
        weight: 1.0,
    },
    IndicatorSpec {
        kind: IndicatorKind::EmaCross12x26,
        name: "EMA(12/26)",
        lookback: 26,
        weight: 1.25,
    },
    IndicatorSpec {
        kind: IndicatorKind::Macd12x26x9,
        name: "MACD(12,26,9)",
        lookback: 35,
        weight: 1.5,
    },
];

/// Catalogue entries computable from `len` prices.
pub fn available_for(len: usize) -> impl Iterator<Item = &'static IndicatorSpec> {
    CATALOGUE.iter().filter(move |spec| len >= spec.lookback)
}

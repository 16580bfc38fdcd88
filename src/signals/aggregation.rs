//! Weighted aggregation of indicator signals

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_SIGNAL_DEADBAND;
use crate::models::indicators::TechnicalIndicator;
use crate::models::signal::{SignalDirection, SignalReason};
use crate::signals::scoring::clamp_score;

/// Aggregate score and the trend it resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregatedSignal {
    /// Weighted score in `[-1, 1]`.
    pub score: f64,
    pub trend: SignalDirection,
}

/// Combines per-indicator signals into one directional score.
///
/// Each indicator contributes `+weight` (buy), `-weight` (sell) or `0`
/// (neutral); the sum is divided by the total weight. Contributions are
/// summed in sorted order, so any permutation of the input gives a
/// bit-identical score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalAggregator {
    deadband: f64,
}

impl Default for SignalAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_SIGNAL_DEADBAND)
    }
}

impl SignalAggregator {
    pub fn new(deadband: f64) -> Self {
        let deadband = if deadband.is_finite() { deadband.abs() } else { 0.0 };
        Self { deadband }
    }

    pub fn deadband(&self) -> f64 {
        self.deadband
    }

    pub fn aggregate(&self, indicators: &[TechnicalIndicator]) -> AggregatedSignal {
        let score = Self::weighted_score(indicators);
        AggregatedSignal {
            score,
            trend: self.trend_for(score),
        }
    }

    /// Normalized weighted score. Indicators with a non-finite or
    /// non-positive weight are ignored; no usable weight gives 0.
    pub fn weighted_score(indicators: &[TechnicalIndicator]) -> f64 {
        let usable = indicators
            .iter()
            .filter(|indicator| indicator.weight.is_finite() && indicator.weight > 0.0);

        let mut contributions: Vec<f64> = Vec::new();
        let mut weights: Vec<f64> = Vec::new();
        for indicator in usable {
            contributions.push(indicator.contribution());
            weights.push(indicator.weight);
        }

        contributions.sort_by(f64::total_cmp);
        weights.sort_by(f64::total_cmp);

        let total_weight: f64 = weights.iter().sum();
        if total_weight <= 0.0 {
            return 0.0;
        }

        clamp_score(contributions.iter().sum::<f64>() / total_weight)
    }

    /// Resolve a score to a trend; `|score| <= deadband` is neutral.
    pub fn trend_for(&self, score: f64) -> SignalDirection {
        if score.is_nan() || score.abs() <= self.deadband {
            SignalDirection::Neutral
        } else if score > 0.0 {
            SignalDirection::Buy
        } else {
            SignalDirection::Sell
        }
    }

    /// Explainability breakdown: the strongest directional contributors.
    ///
    /// Ties on weight are broken by name so the output is independent of
    /// input order.
    pub fn generate_reasons(indicators: &[TechnicalIndicator], limit: usize) -> Vec<SignalReason> {
        let mut directional: Vec<&TechnicalIndicator> = indicators
            .iter()
            .filter(|i| i.signal != SignalDirection::Neutral && i.weight.is_finite() && i.weight > 0.0)
            .collect();

        directional.sort_by(|a, b| {
            b.weight
                .total_cmp(&a.weight)
                .then_with(|| a.name.cmp(&b.name))
        });

        directional
            .into_iter()
            .take(limit)
            .map(|indicator| SignalReason {
                description: format!(
                    "{} {} ({:.4})",
                    indicator.name,
                    match indicator.signal {
                        SignalDirection::Buy => "bullish",
                        SignalDirection::Sell => "bearish",
                        SignalDirection::Neutral => "neutral",
                    },
                    indicator.value
                ),
                weight: indicator.weight,
            })
            .collect()
    }
}

use serde::{Deserialize, Serialize};

use super::indicators::TechnicalIndicator;
use super::signal::{SignalDirection, SignalReason};

/// Output of one analysis pass over a price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub indicators: Vec<TechnicalIndicator>,
    /// Weighted directional score in `[-1, 1]`.
    pub overall_signal: f64,
    pub overall_trend: SignalDirection,
    pub support_level: f64,
    pub resistance_level: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<SignalReason>,
}

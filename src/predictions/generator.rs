//! Prediction generators.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::analysis::facade::compute_analysis;
use crate::error::PredictionError;
use crate::models::price::PriceSample;
use crate::models::signal::SignalDirection;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Produces a prediction for an asset over a horizon.
///
/// Invoked only on a cache miss by [`crate::predictions::PredictionService`].
#[async_trait]
pub trait PredictionGenerator: Send + Sync {
    type Output: Serialize + DeserializeOwned + Send + Sync;

    /// Namespace used in the cache key, e.g. `technical`.
    fn prediction_type(&self) -> &str;

    async fn generate(
        &self,
        series: &[PriceSample],
        asset: &str,
        horizon_days: u32,
    ) -> Result<Self::Output, PredictionError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePrediction {
    pub asset: String,
    pub horizon_days: u32,
    pub current_price: f64,
    pub predicted_price: f64,
    pub change_pct: f64,
    pub trend: SignalDirection,
    /// 0.0 to 1.0
    pub confidence: f64,
    pub generated_at: DateTime<Utc>,
}

/// Heuristic generator: least-squares price trend projected over the
/// horizon, with confidence from the fit quality and its agreement with the
/// technical signal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TrendProjectionGenerator;

/// Slope in price per millisecond and coefficient of determination.
fn linear_fit(points: &[(f64, f64)]) -> (f64, f64) {
    let n = points.len() as f64;
    if points.len() < 2 {
        return (0.0, 0.0);
    }

    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (mut sxx, mut sxy, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in points {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    if sxx == 0.0 {
        return (0.0, 0.0);
    }
    let slope = sxy / sxx;
    let r_squared = if syy == 0.0 {
        1.0
    } else {
        (sxy * sxy) / (sxx * syy)
    };
    (slope, r_squared.clamp(0.0, 1.0))
}

#[async_trait]
impl PredictionGenerator for TrendProjectionGenerator {
    type Output = PricePrediction;

    fn prediction_type(&self) -> &str {
        "technical"
    }

    async fn generate(
        &self,
        series: &[PriceSample],
        asset: &str,
        horizon_days: u32,
    ) -> Result<PricePrediction, PredictionError> {
        let analysis =
            compute_analysis(series).ok_or_else(|| PredictionError::NoData(asset.to_string()))?;

        // Anchor timestamps at the first sample to keep the fit well conditioned.
        let origin = series.first().map(|s| s.timestamp).unwrap_or_default();
        let points: Vec<(f64, f64)> = series
            .iter()
            .filter(|s| s.price.is_finite())
            .map(|s| ((s.timestamp - origin) as f64, s.price))
            .collect();
        let current_price = points
            .last()
            .map(|(_, price)| *price)
            .ok_or_else(|| PredictionError::NoData(asset.to_string()))?;

        let (slope, r_squared) = linear_fit(&points);
        let projected = current_price + slope * MILLIS_PER_DAY * f64::from(horizon_days);
        let predicted_price = projected.max(0.0);

        if !predicted_price.is_finite() {
            return Err(PredictionError::Generation(format!(
                "non-finite projection for {}",
                asset
            )));
        }

        let change_pct = if current_price == 0.0 {
            0.0
        } else {
            (predicted_price - current_price) / current_price * 100.0
        };

        let agreement = match analysis.overall_trend {
            SignalDirection::Neutral => 0.75,
            trend if trend.polarity() * slope > 0.0 => 1.0,
            _ => 0.5,
        };

        Ok(PricePrediction {
            asset: asset.to_lowercase(),
            horizon_days,
            current_price,
            predicted_price,
            change_pct,
            trend: analysis.overall_trend,
            confidence: (r_squared * agreement).clamp(0.0, 1.0),
            generated_at: Utc::now(),
        })
    }
}

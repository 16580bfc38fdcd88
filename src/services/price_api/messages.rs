//! Wire format of the `market_chart` endpoint.

use std::collections::HashMap;

use serde::Deserialize;

use crate::models::price::PriceSample;

/// `{"prices": [[ms, price], ...], "total_volumes": [[ms, volume], ...]}`
#[derive(Debug, Clone, Deserialize)]
pub struct MarketChartResponse {
    pub prices: Vec<(f64, f64)>,
    #[serde(default)]
    pub total_volumes: Vec<(f64, f64)>,
}

impl MarketChartResponse {
    /// Convert to an ascending series with unique timestamps.
    ///
    /// Volumes are joined by timestamp; for duplicate timestamps the last
    /// price wins.
    pub fn into_samples(self) -> Vec<PriceSample> {
        let volumes: HashMap<i64, f64> = self
            .total_volumes
            .into_iter()
            .map(|(ts, volume)| (ts as i64, volume))
            .collect();

        let mut samples: Vec<PriceSample> = self
            .prices
            .into_iter()
            .map(|(ts, price)| {
                let timestamp = ts as i64;
                PriceSample {
                    timestamp,
                    price,
                    volume: volumes.get(&timestamp).copied(),
                }
            })
            .collect();

        // Stable sort keeps arrival order among equal timestamps.
        samples.sort_by_key(|s| s.timestamp);
        let mut deduped: Vec<PriceSample> = Vec::with_capacity(samples.len());
        for sample in samples {
            match deduped.last_mut() {
                Some(last) if last.timestamp == sample.timestamp => *last = sample,
                _ => deduped.push(sample),
            }
        }
        deduped
    }
}

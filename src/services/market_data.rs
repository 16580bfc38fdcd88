//! Price history provider interface.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tokio_util::sync::CancellationToken;

use crate::error::FetchError;
use crate::models::price::{PriceSample, Timeframe};

#[async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    /// Ordered (ascending) price history for `asset` over `timeframe`.
    ///
    /// Implementations should return [`FetchError::Aborted`] promptly once
    /// `cancel` fires.
    async fn fetch_price_history(
        &self,
        asset: &str,
        timeframe: Timeframe,
        cancel: CancellationToken,
    ) -> Result<Vec<PriceSample>, FetchError>;
}

/// In-memory provider serving preloaded series, keyed by lower-cased asset.
///
/// Every timeframe returns the same series.
#[derive(Default)]
pub struct StaticPriceHistoryProvider {
    series: RwLock<HashMap<String, Vec<PriceSample>>>,
}

impl StaticPriceHistoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(self, asset: &str, series: Vec<PriceSample>) -> Self {
        self.insert(asset, series);
        self
    }

    pub fn insert(&self, asset: &str, series: Vec<PriceSample>) {
        self.series.write().insert(asset.to_lowercase(), series);
    }
}

#[async_trait]
impl PriceHistoryProvider for StaticPriceHistoryProvider {
    async fn fetch_price_history(
        &self,
        asset: &str,
        _timeframe: Timeframe,
        cancel: CancellationToken,
    ) -> Result<Vec<PriceSample>, FetchError> {
        if cancel.is_cancelled() {
            return Err(FetchError::Aborted);
        }
        Ok(self
            .series
            .read()
            .get(&asset.to_lowercase())
            .cloned()
            .unwrap_or_default())
    }
}

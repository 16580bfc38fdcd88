//! Cache-first prediction orchestration.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cache::prediction::PredictionCache;
use crate::error::{FetchError, PredictionError};
use crate::models::price::{PriceSample, Timeframe};
use crate::predictions::generator::PredictionGenerator;
use crate::services::market_data::PriceHistoryProvider;

pub struct PredictionService<G> {
    cache: PredictionCache,
    generator: G,
    max_age_minutes: u64,
}

impl<G> PredictionService<G>
where
    G: PredictionGenerator,
{
    pub fn new(cache: PredictionCache, generator: G) -> Self {
        let max_age_minutes = cache.default_max_age_minutes();
        Self {
            cache,
            generator,
            max_age_minutes,
        }
    }

    pub fn with_max_age(mut self, minutes: u64) -> Self {
        self.max_age_minutes = minutes;
        self
    }

    pub fn cache(&self) -> &PredictionCache {
        &self.cache
    }

    /// Cached prediction for `(asset, horizon_days)`, if still fresh.
    pub fn cached(&self, asset: &str, horizon_days: u32) -> Option<G::Output> {
        self.cache.get(
            self.generator.prediction_type(),
            asset,
            horizon_days,
            self.max_age_minutes,
        )
    }

    /// Return the cached prediction, or generate one from `series` and
    /// cache it.
    pub async fn get_or_generate(
        &self,
        asset: &str,
        horizon_days: u32,
        series: &[PriceSample],
    ) -> Result<G::Output, PredictionError> {
        if let Some(hit) = self.cached(asset, horizon_days) {
            debug!(asset = %asset, horizon_days, "Serving cached prediction");
            return Ok(hit);
        }

        if series.is_empty() {
            return Err(PredictionError::NoData(asset.to_string()));
        }

        let fresh = self.generator.generate(series, asset, horizon_days).await?;
        self.cache.set(
            self.generator.prediction_type(),
            asset,
            horizon_days,
            &fresh,
        )?;

        info!(
            asset = %asset,
            horizon_days,
            kind = self.generator.prediction_type(),
            "Generated and cached prediction"
        );
        Ok(fresh)
    }

    /// Like [`get_or_generate`](Self::get_or_generate), fetching the price
    /// history only on a cache miss.
    ///
    /// `Ok(None)` means the fetch was cancelled.
    pub async fn get_or_fetch<P>(
        &self,
        provider: &P,
        asset: &str,
        timeframe: Timeframe,
        horizon_days: u32,
        cancel: CancellationToken,
    ) -> Result<Option<G::Output>, PredictionError>
    where
        P: PriceHistoryProvider + ?Sized,
    {
        if let Some(hit) = self.cached(asset, horizon_days) {
            debug!(asset = %asset, horizon_days, "Serving cached prediction");
            return Ok(Some(hit));
        }

        let series = match provider.fetch_price_history(asset, timeframe, cancel).await {
            Ok(series) => series,
            Err(FetchError::Aborted) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        self.get_or_generate(asset, horizon_days, &series)
            .await
            .map(Some)
    }
}

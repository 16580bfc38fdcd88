//! Cache-first prediction flow over the in-memory store

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokenlens::cache::{cache_key, KeyValueStore, ManualClock, MemoryStore, PredictionCache};
use tokenlens::error::{CacheError, PredictionError};
use tokenlens::models::{PriceSample, SignalDirection, Timeframe};
use tokenlens::predictions::{PredictionGenerator, PredictionService, TrendProjectionGenerator};
use tokenlens::services::StaticPriceHistoryProvider;
use tokio_util::sync::CancellationToken;

use crate::test_utils::{uptrend, START_MS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Projection {
    asset: String,
    horizon_days: u32,
    last_price: f64,
}

#[derive(Clone, Default)]
struct CountingGenerator {
    calls: Arc<AtomicUsize>,
}

impl CountingGenerator {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PredictionGenerator for CountingGenerator {
    type Output = Projection;

    fn prediction_type(&self) -> &str {
        "counting"
    }

    async fn generate(
        &self,
        series: &[PriceSample],
        asset: &str,
        horizon_days: u32,
    ) -> Result<Projection, PredictionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let last = series
            .last()
            .ok_or_else(|| PredictionError::NoData(asset.to_string()))?;
        Ok(Projection {
            asset: asset.to_string(),
            horizon_days,
            last_price: last.price,
        })
    }
}

fn service_with_clock(
    store: Arc<MemoryStore>,
    clock: Arc<ManualClock>,
) -> (PredictionService<CountingGenerator>, CountingGenerator) {
    let generator = CountingGenerator::default();
    let cache = PredictionCache::with_clock(store, clock);
    (PredictionService::new(cache, generator.clone()), generator)
}

#[tokio::test]
async fn second_request_is_served_from_cache() {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(START_MS));
    let (service, generator) = service_with_clock(store.clone(), clock);
    let series = uptrend(30);

    let first = service.get_or_generate("bitcoin", 7, &series).await.unwrap();
    let second = service.get_or_generate("BITCOIN", 7, &series).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(generator.calls(), 1);
    assert!(store.get(&cache_key("counting", "bitcoin", 7)).unwrap().is_some());
}

#[tokio::test]
async fn horizons_are_cached_separately() {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(START_MS));
    let (service, generator) = service_with_clock(store.clone(), clock);
    let series = uptrend(30);

    service.get_or_generate("bitcoin", 7, &series).await.unwrap();
    service.get_or_generate("bitcoin", 30, &series).await.unwrap();

    assert_eq!(generator.calls(), 2);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn expired_prediction_is_regenerated() {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(START_MS));
    let (service, generator) = service_with_clock(store.clone(), clock.clone());
    let service = service.with_max_age(60);
    let series = uptrend(30);

    service.get_or_generate("bitcoin", 7, &series).await.unwrap();

    clock.advance_minutes(60);
    service.get_or_generate("bitcoin", 7, &series).await.unwrap();
    assert_eq!(generator.calls(), 1);

    clock.advance_minutes(1);
    assert!(service.cached("bitcoin", 7).is_none());
    assert!(store.is_empty());

    service.get_or_generate("bitcoin", 7, &series).await.unwrap();
    assert_eq!(generator.calls(), 2);
}

#[tokio::test]
async fn empty_series_on_miss_is_no_data() {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(START_MS));
    let (service, generator) = service_with_clock(store, clock);

    let err = service.get_or_generate("bitcoin", 7, &[]).await.unwrap_err();
    assert!(matches!(err, PredictionError::NoData(asset) if asset == "bitcoin"));
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn cache_write_failure_propagates() {
    let store = Arc::new(MemoryStore::with_capacity(0));
    let clock = Arc::new(ManualClock::new(START_MS));
    let (service, _generator) = service_with_clock(store, clock);

    let err = service
        .get_or_generate("bitcoin", 7, &uptrend(30))
        .await
        .unwrap_err();
    assert!(matches!(err, PredictionError::Cache(CacheError::Store(_))));
}

#[tokio::test]
async fn fetches_history_only_on_miss() {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(START_MS));
    let (service, generator) = service_with_clock(store, clock);
    let provider = StaticPriceHistoryProvider::new().with_series("ethereum", uptrend(30));

    let fetched = service
        .get_or_fetch(&provider, "ethereum", Timeframe::Week, 7, CancellationToken::new())
        .await
        .unwrap()
        .expect("prediction");
    assert_eq!(fetched.last_price, uptrend(30)[29].price);

    // A cancelled token would abort a fetch; a cache hit never fetches.
    let cancelled = CancellationToken::new();
    cancelled.cancel();
    let cached = service
        .get_or_fetch(&provider, "ethereum", Timeframe::Week, 7, cancelled.clone())
        .await
        .unwrap();
    assert_eq!(cached, Some(fetched));
    assert_eq!(generator.calls(), 1);

    let aborted = service
        .get_or_fetch(&provider, "solana", Timeframe::Week, 7, cancelled)
        .await
        .unwrap();
    assert!(aborted.is_none());
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn trend_projection_follows_rising_series() {
    let cache = PredictionCache::new(Arc::new(MemoryStore::new()));
    let service = PredictionService::new(cache, TrendProjectionGenerator);
    let series = uptrend(60);

    let prediction = service.get_or_generate("Bitcoin", 7, &series).await.unwrap();

    assert_eq!(prediction.asset, "bitcoin");
    assert_eq!(prediction.horizon_days, 7);
    assert_eq!(prediction.current_price, series[59].price);
    assert!(prediction.predicted_price > prediction.current_price);
    assert!(prediction.change_pct > 0.0);
    assert_eq!(prediction.trend, SignalDirection::Buy);
    assert!(prediction.confidence > 0.9 && prediction.confidence <= 1.0);

    let cached = service.cached("bitcoin", 7).expect("cached prediction");
    assert_eq!(cached, prediction);
}

#[tokio::test]
async fn trend_projection_never_goes_negative() {
    let prices: Vec<f64> = (0..40).map(|i| 40.0 - i as f64).collect();
    let series = crate::test_utils::hourly_series(&prices);

    let prediction = TrendProjectionGenerator
        .generate(&series, "doge", 30)
        .await
        .unwrap();
    assert_eq!(prediction.predicted_price, 0.0);
    assert!(prediction.change_pct < 0.0);
}

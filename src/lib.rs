//! Client-side technical analysis and prediction engine.
//!
//! Price series come in through a [`services::PriceHistoryProvider`], are
//! turned into indicators, an aggregated signal and support/resistance bands
//! by [`analysis::TechnicalAnalyzer`], and predictions are cached in a
//! TTL-bound [`cache::PredictionCache`]. [`fetch::FetchSubscription`] keeps
//! overlapping requests from applying stale results.

pub mod analysis;
pub mod cache;
pub mod common;
pub mod config;
pub mod error;
pub mod fetch;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod predictions;
pub mod services;
pub mod signals;

pub use analysis::{compute_analysis, AnalysisSession, TechnicalAnalyzer};
pub use cache::{KeyValueStore, MemoryStore, PredictionCache, RedisStore};
pub use error::{CacheError, FetchError, PredictionError, StoreError};
pub use fetch::{FetchState, FetchSubscription};
pub use models::{AnalysisResult, PriceSample, SignalDirection, TechnicalIndicator};

//! Error types for the engine boundaries.
//!
//! Data-shape problems in price input never surface here: the indicator and
//! band calculators degrade to empty or `None` results instead.

use thiserror::Error;

/// Failure of the underlying key/value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store quota exceeded: {used} of {capacity} entries in use")]
    QuotaExceeded { used: usize, capacity: usize },
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

/// Failure while writing to or clearing the prediction cache.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to serialize cache entry: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failure of an asynchronous fetch.
///
/// [`FetchError::Aborted`] is the cooperative-cancellation outcome and is
/// swallowed by [`crate::fetch::FetchSubscription`]; everything else
/// propagates to the caller.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("fetch aborted")]
    Aborted,
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("invalid request url: {0}")]
    InvalidUrl(String),
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl FetchError {
    pub fn is_abort(&self) -> bool {
        matches!(self, FetchError::Aborted)
    }
}

/// Failure of the cache-first prediction flow.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("no price data available for {0}")]
    NoData(String),
    #[error("prediction generation failed: {0}")]
    Generation(String),
    #[error(transparent)]
    Cache(#[from] CacheError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

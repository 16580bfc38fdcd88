//! TTL-bound prediction cache.
//!
//! Entries live under `prediction:{type}:{asset}:{horizon_days}` as
//! `{"data": ..., "timestamp": <epoch ms>}`. Expiry is lazy: an entry older
//! than the requested max age is treated as absent and deleted by the read
//! that finds it. There is no background sweep.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cache::clock::{Clock, SystemClock};
use crate::cache::store::KeyValueStore;
use crate::config::DEFAULT_CACHE_MAX_AGE_MINUTES;
use crate::error::CacheError;

pub const KEY_NAMESPACE: &str = "prediction";

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Persisted cache record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionCacheEntry<T> {
    pub data: T,
    /// Write time in epoch milliseconds.
    pub timestamp: i64,
}

/// Compose the storage key; the asset is lower-cased so lookups are
/// case-insensitive.
pub fn cache_key(prediction_type: &str, asset: &str, horizon_days: u32) -> String {
    format!(
        "{}:{}:{}:{}",
        KEY_NAMESPACE,
        prediction_type,
        asset.to_lowercase(),
        horizon_days
    )
}

#[derive(Clone)]
pub struct PredictionCache {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    default_max_age_minutes: u64,
}

impl PredictionCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            default_max_age_minutes: DEFAULT_CACHE_MAX_AGE_MINUTES,
        }
    }

    pub fn with_default_max_age(mut self, minutes: u64) -> Self {
        self.default_max_age_minutes = minutes;
        self
    }

    pub fn default_max_age_minutes(&self) -> u64 {
        self.default_max_age_minutes
    }

    /// Write `data`, replacing any previous entry for the same key.
    ///
    /// Storage failures are returned to the caller.
    pub fn set<T: Serialize>(
        &self,
        prediction_type: &str,
        asset: &str,
        horizon_days: u32,
        data: &T,
    ) -> Result<(), CacheError> {
        let key = cache_key(prediction_type, asset, horizon_days);
        let entry = PredictionCacheEntry {
            data,
            timestamp: self.clock.now_millis(),
        };
        let payload = serde_json::to_string(&entry)?;
        self.store.set(&key, &payload)?;
        debug!(key = %key, "Cached prediction");
        Ok(())
    }

    /// Cached data no older than `max_age_minutes`, or `None`.
    ///
    /// Stale entries are deleted. Corrupt entries and store read failures
    /// are logged and reported as a miss.
    pub fn get<T: DeserializeOwned>(
        &self,
        prediction_type: &str,
        asset: &str,
        horizon_days: u32,
        max_age_minutes: u64,
    ) -> Option<T> {
        let key = cache_key(prediction_type, asset, horizon_days);

        let raw = match self.store.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %key, "Prediction cache miss");
                return None;
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Prediction cache read failed; treating as miss");
                return None;
            }
        };

        let entry: PredictionCacheEntry<T> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(key = %key, error = %e, "Corrupt prediction cache entry; treating as miss");
                return None;
            }
        };

        let age_ms = self.clock.now_millis().saturating_sub(entry.timestamp);
        let max_age_ms = i64::try_from(max_age_minutes)
            .unwrap_or(i64::MAX)
            .saturating_mul(MILLIS_PER_MINUTE);

        if age_ms > max_age_ms {
            debug!(key = %key, age_ms, max_age_ms, "Prediction cache entry expired");
            if let Err(e) = self.store.delete(&key) {
                warn!(key = %key, error = %e, "Failed to delete expired prediction cache entry");
            }
            return None;
        }

        debug!(key = %key, age_ms, "Prediction cache hit");
        Some(entry.data)
    }

    /// [`get`](Self::get) with the configured default max age.
    pub fn get_default<T: DeserializeOwned>(
        &self,
        prediction_type: &str,
        asset: &str,
        horizon_days: u32,
    ) -> Option<T> {
        self.get(
            prediction_type,
            asset,
            horizon_days,
            self.default_max_age_minutes,
        )
    }

    /// Remove every entry of `prediction_type`, or every prediction entry
    /// when `None`. Returns the number of keys removed.
    pub fn clear(&self, prediction_type: Option<&str>) -> Result<usize, CacheError> {
        let prefix = match prediction_type {
            Some(kind) => format!("{}:{}:", KEY_NAMESPACE, kind),
            None => format!("{}:", KEY_NAMESPACE),
        };

        let keys = self.store.keys(&prefix)?;
        for key in &keys {
            self.store.delete(key)?;
        }

        debug!(prefix = %prefix, removed = keys.len(), "Cleared prediction cache");
        Ok(keys.len())
    }
}

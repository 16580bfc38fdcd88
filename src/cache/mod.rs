//! Prediction persistence over an injected key/value store.

pub mod clock;
pub mod prediction;
pub mod redis_store;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use prediction::{cache_key, PredictionCache, PredictionCacheEntry, KEY_NAMESPACE};
pub use redis_store::RedisStore;
pub use store::{KeyValueStore, MemoryStore};

//! Unit tests for the prediction cache

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokenlens::cache::{cache_key, KeyValueStore, ManualClock, MemoryStore, PredictionCache};
use tokenlens::error::{CacheError, StoreError};

const NOW: i64 = 1_700_000_000_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Forecast {
    price: f64,
    label: String,
}

fn forecast() -> Forecast {
    Forecast {
        price: 71_234.5,
        label: "up".to_string(),
    }
}

fn setup() -> (Arc<MemoryStore>, Arc<ManualClock>, PredictionCache) {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(NOW));
    let cache = PredictionCache::with_clock(store.clone(), clock.clone());
    (store, clock, cache)
}

#[test]
fn test_key_format() {
    assert_eq!(cache_key("technical", "BitCoin", 7), "prediction:technical:bitcoin:7");
}

#[test]
fn test_round_trip() {
    let (_, _, cache) = setup();
    cache.set("technical", "bitcoin", 7, &forecast()).unwrap();
    assert_eq!(cache.get::<Forecast>("technical", "bitcoin", 7, 180), Some(forecast()));
}

#[test]
fn test_round_trip_is_bit_exact() {
    let (_, _, cache) = setup();
    let values = [12874.560591713891, 0.1 + 0.2, 67_431.108_273_915_2, 1e-9 / 3.0, f64::MAX];

    for (horizon, value) in values.iter().enumerate() {
        cache.set("technical", "bitcoin", horizon as u32, value).unwrap();
        let read: f64 = cache
            .get("technical", "bitcoin", horizon as u32, 180)
            .expect("cached value");
        assert_eq!(read.to_bits(), value.to_bits(), "value {} changed in the cache", value);
    }
}

#[test]
fn test_lookup_is_case_insensitive() {
    let (_, _, cache) = setup();
    cache.set("technical", "bitcoin", 7, &forecast()).unwrap();
    assert_eq!(cache.get::<Forecast>("technical", "BITCOIN", 7, 180), Some(forecast()));
}

#[test]
fn test_keys_are_distinct_per_type_and_horizon() {
    let (_, _, cache) = setup();
    cache.set("technical", "bitcoin", 7, &1).unwrap();
    cache.set("technical", "bitcoin", 30, &2).unwrap();
    cache.set("ai", "bitcoin", 7, &3).unwrap();

    assert_eq!(cache.get::<i32>("technical", "bitcoin", 7, 180), Some(1));
    assert_eq!(cache.get::<i32>("technical", "bitcoin", 30, 180), Some(2));
    assert_eq!(cache.get::<i32>("ai", "bitcoin", 7, 180), Some(3));
    assert_eq!(cache.get::<i32>("technical", "ethereum", 7, 180), None);
}

#[test]
fn test_write_overwrites() {
    let (store, _, cache) = setup();
    cache.set("technical", "bitcoin", 7, &1).unwrap();
    cache.set("technical", "bitcoin", 7, &2).unwrap();
    assert_eq!(cache.get::<i32>("technical", "bitcoin", 7, 180), Some(2));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_persisted_layout() {
    let (store, _, cache) = setup();
    cache.set("technical", "bitcoin", 7, &forecast()).unwrap();

    let raw = store.get("prediction:technical:bitcoin:7").unwrap().unwrap();
    let value: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["timestamp"], NOW);
    assert_eq!(value["data"]["price"], 71_234.5);
    assert_eq!(value["data"]["label"], "up");
    assert_eq!(value.as_object().unwrap().len(), 2);
}

#[test]
fn test_entry_at_max_age_is_fresh() {
    let (_, clock, cache) = setup();
    cache.set("technical", "bitcoin", 7, &1).unwrap();
    clock.advance_minutes(180);
    assert_eq!(cache.get::<i32>("technical", "bitcoin", 7, 180), Some(1));
}

#[test]
fn test_expired_entry_is_deleted_on_read() {
    let (store, clock, cache) = setup();
    cache.set("technical", "bitcoin", 7, &1).unwrap();
    clock.advance_minutes(181);

    assert_eq!(cache.get::<i32>("technical", "bitcoin", 7, 180), None);
    assert_eq!(store.get("prediction:technical:bitcoin:7").unwrap(), None);
}

#[test]
fn test_backdated_entry_is_a_miss() {
    let (store, _, cache) = setup();
    let backdated = NOW - 4 * 60 * 60_000;
    store
        .set(
            "prediction:technical:bitcoin:7",
            &format!(r#"{{"data":5,"timestamp":{}}}"#, backdated),
        )
        .unwrap();

    assert_eq!(cache.get::<i32>("technical", "bitcoin", 7, 180), None);
    assert!(store.is_empty());

    // A longer max age would have accepted it, but it is gone now.
    assert_eq!(cache.get::<i32>("technical", "bitcoin", 7, 600), None);
}

#[test]
fn test_default_max_age() {
    let (_, clock, cache) = setup();
    let cache = cache.with_default_max_age(30);
    cache.set("technical", "bitcoin", 7, &1).unwrap();

    clock.advance_minutes(30);
    assert_eq!(cache.get_default::<i32>("technical", "bitcoin", 7), Some(1));
    clock.advance_minutes(1);
    assert_eq!(cache.get_default::<i32>("technical", "bitcoin", 7), None);
}

#[test]
fn test_corrupt_entry_is_a_miss() {
    let (store, _, cache) = setup();
    store.set("prediction:technical:bitcoin:7", "{not json").unwrap();
    store.set("prediction:technical:bitcoin:30", r#"{"data":"text","timestamp":1}"#).unwrap();

    assert_eq!(cache.get::<i32>("technical", "bitcoin", 7, 180), None);
    assert_eq!(cache.get::<i32>("technical", "bitcoin", 30, 10_000_000), None);
}

#[test]
fn test_clear_by_type() {
    let (store, _, cache) = setup();
    cache.set("technical", "bitcoin", 7, &1).unwrap();
    cache.set("technical", "ethereum", 7, &1).unwrap();
    cache.set("ai", "bitcoin", 7, &1).unwrap();
    store.set("wallet-address", "0xabc").unwrap();

    assert_eq!(cache.clear(Some("technical")).unwrap(), 2);
    assert_eq!(cache.get::<i32>("ai", "bitcoin", 7, 180), Some(1));
    assert_eq!(cache.get::<i32>("technical", "bitcoin", 7, 180), None);

    assert_eq!(cache.clear(None).unwrap(), 1);
    assert_eq!(store.keys("").unwrap(), vec!["wallet-address".to_string()]);
}

#[test]
fn test_type_prefix_does_not_match_longer_types() {
    let (_, _, cache) = setup();
    cache.set("tech", "bitcoin", 7, &1).unwrap();
    cache.set("technical", "bitcoin", 7, &2).unwrap();

    assert_eq!(cache.clear(Some("tech")).unwrap(), 1);
    assert_eq!(cache.get::<i32>("technical", "bitcoin", 7, 180), Some(2));
}

#[test]
fn test_write_failure_propagates() {
    let store = Arc::new(MemoryStore::with_capacity(0));
    let cache = PredictionCache::new(store);

    let err = cache.set("technical", "bitcoin", 7, &1).unwrap_err();
    assert!(matches!(err, CacheError::Store(StoreError::QuotaExceeded { .. })));
}

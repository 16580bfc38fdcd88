//! Redis-backed [`KeyValueStore`].

use parking_lot::Mutex;
use redis::Commands;
use tracing::info;

use crate::cache::store::KeyValueStore;
use crate::error::StoreError;

/// Store over a single synchronous Redis connection.
pub struct RedisStore {
    conn: Mutex<redis::Connection>,
}

impl RedisStore {
    pub fn connect(redis_url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(redis_url)?;
        let conn = client.get_connection()?;
        info!("Connected to Redis prediction store");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

/// Escape Redis glob metacharacters so `prefix` matches literally.
fn escape_glob(prefix: &str) -> String {
    let mut escaped = String::with_capacity(prefix.len() + 1);
    for ch in prefix.chars() {
        if matches!(ch, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('*');
    escaped
}

impl KeyValueStore for RedisStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value: Option<String> = self.conn.lock().get(key)?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _: () = self.conn.lock().set(key, value)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let _: () = self.conn.lock().del(key)?;
        Ok(())
    }

    fn keys(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let mut keys: Vec<String> = self.conn.lock().keys(escape_glob(prefix))?;
        keys.sort();
        Ok(keys)
    }
}

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

/// Durable client storage: plain keyed documents plus an expiring cache.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn get_value(&self, key: &str) -> Result<Option<String>>;
    async fn put_value(&self, key: &str, payload: &str) -> Result<()>;
    async fn get_cache(&self, key: &str, now: i64) -> Result<Option<String>>;
    async fn put_cache(&self, key: &str, payload: &str, expires_at: i64) -> Result<()>;
}

/// Process-local storage; nothing survives the process.
#[derive(Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
    cache: Mutex<HashMap<String, (String, i64)>>,
}

impl MemoryStorage {
    pub fn new() -> Self { Self::default() }
}

fn poisoned<T>(_: T) -> anyhow::Error { anyhow!("memory storage lock poisoned") }

#[async_trait]
impl Storage for MemoryStorage {
    async fn get_value(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().map_err(poisoned)?.get(key).cloned())
    }

    async fn put_value(&self, key: &str, payload: &str) -> Result<()> {
        self.values.lock().map_err(poisoned)?.insert(key.to_string(), payload.to_string());
        Ok(())
    }

    async fn get_cache(&self, key: &str, now: i64) -> Result<Option<String>> {
        let cache = self.cache.lock().map_err(poisoned)?;
        Ok(cache.get(key).filter(|(_, exp)| *exp > now).map(|(p, _)| p.clone()))
    }

    async fn put_cache(&self, key: &str, payload: &str, expires_at: i64) -> Result<()> {
        self.cache.lock().map_err(poisoned)?.insert(key.to_string(), (payload.to_string(), expires_at));
        Ok(())
    }
}

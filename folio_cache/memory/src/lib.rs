use std::{
    collections::HashMap,
    fmt::Debug,
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::Context;
use folio_cache_contracts::CacheService;
use folio_di::Build;
use folio_utils::trace_instrument;
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;

/// Process local cache holding rendered page data.
#[derive(Debug, Clone, Default, Build)]
pub struct MemoryCache {
    #[state]
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

#[derive(Debug)]
struct Entry {
    value: serde_json::Value,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, including expired ones not yet dropped.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl CacheService for MemoryCache {
    #[trace_instrument(skip(self))]
    async fn get<T: DeserializeOwned + Debug + 'static>(
        &self,
        key: &str,
    ) -> anyhow::Result<Option<T>> {
        let now = Instant::now();

        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(entry) if !entry.is_expired(now) => {
                return serde_json::from_value(entry.value.clone())
                    .map(Some)
                    .with_context(|| format!("Failed to deserialize cache item {key:?}"));
            }
            Some(_) => {}
            None => return Ok(None),
        }
        drop(entries);

        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
            entries.remove(key);
        }

        Ok(None)
    }

    #[trace_instrument(skip(self, value))]
    async fn set<T: Serialize + Debug + Sync + 'static>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> anyhow::Result<()> {
        let value = serde_json::to_value(value)
            .with_context(|| format!("Failed to serialize cache item {key:?}"))?;
        // a ttl beyond what `Instant` can represent never expires
        let expires_at = ttl.and_then(|ttl| Instant::now().checked_add(ttl));

        self.entries
            .write()
            .await
            .insert(key.into(), Entry { value, expires_at });

        Ok(())
    }

    #[trace_instrument(skip(self))]
    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    #[trace_instrument(skip(self))]
    async fn remove_prefix(&self, prefix: &str) -> anyhow::Result<()> {
        self.entries
            .write()
            .await
            .retain(|key, _| !key.starts_with(prefix));
        Ok(())
    }
}

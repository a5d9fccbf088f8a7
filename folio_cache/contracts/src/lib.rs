use std::{fmt::Debug, future::Future, time::Duration};

use serde::{de::DeserializeOwned, Serialize};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait CacheService: Send + Sync + 'static {
    /// Reads a cache item.
    fn get<T: DeserializeOwned + Debug + 'static>(
        &self,
        key: &str,
    ) -> impl Future<Output = anyhow::Result<Option<T>>> + Send;

    /// Creates a new or updates an existing cache item.
    ///
    /// If `ttl` is set, the item is automatically removed after this timeout.
    fn set<T: Serialize + Debug + Sync + 'static>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Removes an existing cache item.
    ///
    /// Does nothing if the cache item does not exist.
    fn remove(&self, key: &str) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Removes every cache item whose key starts with `prefix`, e.g. a page
    /// together with all pages below it.
    fn remove_prefix(&self, prefix: &str) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg(feature = "mock")]
impl MockCacheService {
    pub fn with_get<T: DeserializeOwned + Debug + Send + 'static>(
        mut self,
        key: String,
        result: Option<T>,
    ) -> Self {
        self.expect_get()
            .once()
            .with(mockall::predicate::eq(key))
            .return_once(|_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_get_error<T: DeserializeOwned + Debug + Send + 'static>(
        mut self,
        key: String,
    ) -> Self {
        self.expect_get::<T>()
            .once()
            .with(mockall::predicate::eq(key))
            .return_once(|_| Box::pin(std::future::ready(Err(anyhow::anyhow!("cache down")))));
        self
    }

    pub fn with_set<T: Debug + PartialEq + Serialize + Send + Sync + 'static>(
        mut self,
        key: String,
        value: T,
        ttl: Option<Duration>,
    ) -> Self {
        self.expect_set()
            .once()
            .with(
                mockall::predicate::eq(key),
                mockall::predicate::eq(value),
                mockall::predicate::eq(ttl),
            )
            .return_once(|_, _, _| Box::pin(std::future::ready(Ok(()))));
        self
    }

    pub fn with_remove_prefix(mut self, prefix: String) -> Self {
        self.expect_remove_prefix()
            .once()
            .with(mockall::predicate::eq(prefix))
            .return_once(|_| Box::pin(std::future::ready(Ok(()))));
        self
    }

    pub fn with_remove_prefix_error(mut self, prefix: String) -> Self {
        self.expect_remove_prefix()
            .once()
            .with(mockall::predicate::eq(prefix))
            .return_once(|_| Box::pin(std::future::ready(Err(anyhow::anyhow!("cache down")))));
        self
    }
}

use std::time::Duration;

use folio_cache_contracts::CacheService;
use folio_core_blog_contracts::{BlogGetPostError, BlogService};
use folio_di::Build;
use folio_extern_contracts::content::ContentApiService;
use folio_models::{
    blog::{Post, PostSlug, PostSummary},
    render::RenderPath,
};
use folio_utils::trace_instrument;
use tracing::{debug, warn};

#[derive(Debug, Clone, Build)]
pub struct BlogServiceImpl<Content, Cache> {
    content: Content,
    cache: Cache,
    config: BlogFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct BlogFeatureConfig {
    /// How long rendered blog data is served from the cache before the
    /// content API is asked again.
    pub render_ttl: Duration,
}

impl<Content, Cache> BlogService for BlogServiceImpl<Content, Cache>
where
    Content: ContentApiService,
    Cache: CacheService,
{
    #[trace_instrument(skip(self))]
    async fn list_posts(&self) -> anyhow::Result<Vec<PostSummary>> {
        let cache_key = RenderPath::blog_listing().cache_key();
        if let Some(posts) = self.cached(&cache_key).await {
            return Ok(posts);
        }

        let posts = self.content.list_posts().await?;
        self.store(&cache_key, &posts).await;

        Ok(posts)
    }

    #[trace_instrument(skip(self))]
    async fn get_post(&self, slug: String) -> Result<Post, BlogGetPostError> {
        let Ok(slug) = PostSlug::try_new(slug) else {
            return Err(BlogGetPostError::NotFound);
        };

        let cache_key = RenderPath::blog_post(&slug).cache_key();
        if let Some(post) = self.cached(&cache_key).await {
            return Ok(post);
        }

        let post = self
            .content
            .get_post(slug)
            .await?
            .ok_or(BlogGetPostError::NotFound)?;
        self.store(&cache_key, &post).await;

        Ok(post)
    }
}

impl<Content, Cache> BlogServiceImpl<Content, Cache>
where
    Cache: CacheService,
{
    async fn cached<T>(&self, cache_key: &str) -> Option<T>
    where
        T: serde::de::DeserializeOwned + std::fmt::Debug + Send + 'static,
    {
        match self.cache.get(cache_key).await {
            Ok(value) => {
                debug!(cache_key, hit = value.is_some(), "Render cache lookup");
                value
            }
            Err(err) => {
                warn!(cache_key, "Failed to read render cache: {err:#}");
                None
            }
        }
    }

    async fn store<T>(&self, cache_key: &str, value: &T)
    where
        T: serde::Serialize + std::fmt::Debug + Sync + 'static,
    {
        if let Err(err) = self
            .cache
            .set(cache_key, value, Some(self.config.render_ttl))
            .await
        {
            warn!(cache_key, "Failed to write render cache: {err:#}");
        }
    }
}

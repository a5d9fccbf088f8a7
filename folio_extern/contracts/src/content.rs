use std::future::Future;

use folio_models::blog::{Post, PostSlug, PostSummary};

/// Client of the headless CMS holding the blog posts.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContentApiService: Send + Sync + 'static {
    fn list_posts(&self) -> impl Future<Output = anyhow::Result<Vec<PostSummary>>> + Send;

    fn get_post(&self, slug: PostSlug)
        -> impl Future<Output = anyhow::Result<Option<Post>>> + Send;
}

#[cfg(feature = "mock")]
impl MockContentApiService {
    pub fn with_list_posts(mut self, result: Vec<PostSummary>) -> Self {
        self.expect_list_posts()
            .once()
            .with()
            .return_once(|| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_list_posts_error(mut self) -> Self {
        self.expect_list_posts()
            .once()
            .with()
            .return_once(|| Box::pin(std::future::ready(Err(anyhow::anyhow!("bad gateway")))));
        self
    }

    pub fn with_get_post(mut self, slug: PostSlug, result: Option<Post>) -> Self {
        self.expect_get_post()
            .once()
            .with(mockall::predicate::eq(slug))
            .return_once(|_| Box::pin(std::future::ready(Ok(result))));
        self
    }
}

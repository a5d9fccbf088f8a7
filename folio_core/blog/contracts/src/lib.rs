use std::future::Future;

use folio_models::blog::{Post, PostSummary};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait BlogService: Send + Sync + 'static {
    /// Return all published posts, newest first as ordered by the CMS.
    fn list_posts(&self) -> impl Future<Output = anyhow::Result<Vec<PostSummary>>> + Send;

    /// Return the post with the given slug.
    fn get_post(&self, slug: String) -> impl Future<Output = Result<Post, BlogGetPostError>> + Send;
}

#[derive(Debug, Error)]
pub enum BlogGetPostError {
    #[error("Post not found")]
    NotFound,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockBlogService {
    pub fn with_list_posts(mut self, result: Vec<PostSummary>) -> Self {
        self.expect_list_posts()
            .once()
            .with()
            .return_once(|| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_get_post(mut self, slug: String, result: Result<Post, BlogGetPostError>) -> Self {
        self.expect_get_post()
            .once()
            .with(mockall::predicate::eq(slug))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}

use std::{sync::Arc, time::Duration};

use anyhow::{bail, Context};
use folio_di::Build;
use folio_extern_contracts::content::ContentApiService;
use folio_models::{
    blog::{Post, PostSlug, PostSummary},
    Sensitive,
};
use folio_utils::{trace_instrument, Apply};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use url::Url;

use crate::http::HttpClient;

const LIST_POSTS_QUERY: &str = "\
query ListPosts {
  posts {
    id
    slug
    title
    excerpt
    coverImage { url }
    author { name }
  }
}";

const GET_POST_QUERY: &str = "\
query GetPost($slug: String!) {
  post(where: { slug: $slug }) {
    id
    slug
    title
    excerpt
    date
    content { json }
    coverImage { url width height }
    author { name }
  }
}";

#[derive(Debug, Clone, Build)]
pub struct ContentApiServiceImpl {
    config: ContentApiServiceConfig,
    #[state]
    http: HttpClient,
}

#[derive(Debug, Clone)]
pub struct ContentApiServiceConfig {
    /// GraphQL endpoint of the content API.
    pub url: Arc<Url>,
    /// Permanent auth token, only needed if public read access is disabled.
    pub token: Option<Sensitive<Arc<str>>>,
    pub request_timeout: Duration,
}

impl ContentApiService for ContentApiServiceImpl {
    #[trace_instrument(skip(self))]
    async fn list_posts(&self) -> anyhow::Result<Vec<PostSummary>> {
        #[derive(Debug, Deserialize)]
        struct Data {
            posts: Vec<PostSummary>,
        }

        self.query::<Data>(LIST_POSTS_QUERY, json!({}))
            .await
            .map(|data| data.posts)
    }

    #[trace_instrument(skip(self))]
    async fn get_post(&self, slug: PostSlug) -> anyhow::Result<Option<Post>> {
        #[derive(Debug, Deserialize)]
        struct Data {
            post: Option<Post>,
        }

        self.query::<Data>(GET_POST_QUERY, json!({ "slug": slug }))
            .await
            .map(|data| data.post)
    }
}

impl ContentApiServiceImpl {
    async fn query<T: DeserializeOwned>(&self, query: &str, variables: Value) -> anyhow::Result<T> {
        let response = self
            .http
            .post((*self.config.url).clone())
            .apply_map(self.config.token.as_ref(), |request, token| {
                request.bearer_auth(&***token)
            })
            .timeout(self.config.request_timeout)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await
            .context("Failed to send content api request")?
            .error_for_status()
            .context("Content api request returned an error")?
            .json::<GraphQlResponse<T>>()
            .await
            .context("Failed to deserialize content api response")?;

        if let Some(errors) = response.errors.filter(|errors| !errors.is_empty()) {
            let messages = errors
                .into_iter()
                .map(|err| err.message)
                .collect::<Vec<_>>()
                .join("; ");
            bail!("Content api returned errors: {messages}");
        }

        response.data.context("Content api response contained no data")
    }
}

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

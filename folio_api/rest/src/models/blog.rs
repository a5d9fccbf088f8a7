use folio_models::blog::{Asset, Author, Post, PostSummary};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPostSummary {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<ApiAsset>,
    pub author: Option<ApiAuthor>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPost {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    /// Publication date, `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Rich text document tree.
    pub content: Option<Value>,
    pub cover_image: Option<ApiAsset>,
    pub author: Option<ApiAuthor>,
}

#[derive(Debug, Serialize)]
pub struct ApiAsset {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ApiAuthor {
    pub name: String,
}

impl From<PostSummary> for ApiPostSummary {
    fn from(value: PostSummary) -> Self {
        Self {
            id: value.id,
            slug: value.slug,
            title: value.title,
            excerpt: value.excerpt,
            cover_image: value.cover_image.map(Into::into),
            author: value.author.map(Into::into),
        }
    }
}

impl From<Post> for ApiPost {
    fn from(value: Post) -> Self {
        Self {
            id: value.id,
            slug: value.slug,
            title: value.title,
            excerpt: value.excerpt,
            date: value.date.map(|date| date.to_string()),
            content: value.content.map(|content| content.json),
            cover_image: value.cover_image.map(Into::into),
            author: value.author.map(Into::into),
        }
    }
}

impl From<Asset> for ApiAsset {
    fn from(value: Asset) -> Self {
        Self {
            url: value.url,
            width: value.width,
            height: value.height,
        }
    }
}

impl From<Author> for ApiAuthor {
    fn from(value: Author) -> Self {
        Self { name: value.name }
    }
}

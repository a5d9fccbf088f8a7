use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::macros::nutype_string;

pub static POST_SLUG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[A-Za-z0-9_-]+$").unwrap());

nutype_string!(PostSlug(validate(
    len_char_min = 1,
    len_char_max = 256,
    regex = POST_SLUG_REGEX
)));

/// Entry of the blog listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub cover_image: Option<Asset>,
    #[serde(default)]
    pub author: Option<Author>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Rich text document as delivered by the content API.
    #[serde(default)]
    pub content: Option<PostContent>,
    #[serde(default)]
    pub cover_image: Option<Asset>,
    #[serde(default)]
    pub author: Option<Author>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostContent {
    pub json: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_validation() {
        assert!(PostSlug::try_new("hello-world_2").is_ok());
        assert!(PostSlug::try_new("").is_err());
        assert!(PostSlug::try_new("../etc/passwd").is_err());
        assert!(PostSlug::try_new("a b").is_err());
    }

    #[test]
    fn deserialize_post_from_content_api() {
        let json = serde_json::json!({
            "id": "clx1",
            "slug": "first-post",
            "title": "First post",
            "excerpt": "Hello",
            "date": "2024-05-01",
            "content": { "json": { "children": [] } },
            "coverImage": { "url": "https://media.example/cover.png", "width": 800, "height": 400 },
            "author": { "name": "Peter" }
        });

        let post = serde_json::from_value::<Post>(json).unwrap();

        assert_eq!(post.date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(post.cover_image.unwrap().width, Some(800));
        assert_eq!(post.author.unwrap().name, "Peter");
    }
}

use crate::blog::PostSlug;

/// Path of a page produced by the rendering layer.
///
/// Rendered pages are cached under [`RenderPath::cache_key`], so dropping that
/// key is how a page gets marked for regeneration. The listing key is a prefix
/// of every post key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderPath(String);

impl RenderPath {
    pub fn blog_listing() -> Self {
        Self("/blog".into())
    }

    pub fn blog_post(slug: &PostSlug) -> Self {
        Self(format!("/blog/{slug}"))
    }

    pub fn cache_key(&self) -> String {
        format!("render:{}", self.0)
    }
}

//! Page-head metadata: titles and social-sharing meta tags
//!
//! Resolvers take the slug from a route, look up the matching post, and
//! project its front-matter into the values rendered in `<head>`.

mod tags;

pub use tags::{MetaAttribute, MetaTag};

use crate::config::SiteConfig;
use crate::content::{Post, PostIndex};
use crate::error::BlogError;
use crate::helpers::{encode_segment, full_url_for, iso_timestamp};

/// Resolves head metadata for pages of one site
pub struct MetaResolver<'a> {
    config: &'a SiteConfig,
}

impl<'a> MetaResolver<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    /// Document title for the post at `slug`
    pub fn resolve_title(&self, posts: &PostIndex, slug: &str) -> Result<String, BlogError> {
        posts.get(slug).map(|post| self.post_title(post))
    }

    /// Meta tags for the post at `slug`
    pub fn resolve_meta(&self, posts: &PostIndex, slug: &str) -> Result<Vec<MetaTag>, BlogError> {
        posts.get(slug).map(|post| self.post_meta(post, slug))
    }

    /// `"<title> | <author>"`
    pub fn post_title(&self, post: &Post) -> String {
        format!("{} | {}", post.title(), self.config.author)
    }

    /// Meta tags for a post reached through `slug`.
    ///
    /// `og:url` uses the requested slug, so a post reached by its file name
    /// advertises that URL. Image tags are only emitted with a cover image.
    pub fn post_meta(&self, post: &Post, slug: &str) -> Vec<MetaTag> {
        let author = &self.config.author;
        let description = post.description();

        let mut tags = vec![
            MetaTag::name("author", author),
            MetaTag::name("article:author", author),
            MetaTag::name("description", description),
        ];

        match post.date {
            Some(date) => tags.push(MetaTag::property(
                "article:published_time",
                iso_timestamp(&date),
            )),
            None => tracing::warn!(
                "Post {} has no valid date; omitting article:published_time",
                post.source
            ),
        }

        tags.extend([
            MetaTag::property("og:title", self.post_title(post)),
            MetaTag::property("og:type", "article"),
            MetaTag::property("og:description", description),
            MetaTag::property(
                "og:url",
                format!("{}/{}", self.config.base_url(), encode_segment(slug)),
            ),
        ]);

        if let Some(cover) = post.cover_image() {
            let image_url = full_url_for(self.config, cover);
            tags.push(MetaTag::property("og:image", &image_url));
            tags.push(MetaTag::property("twitter:image", image_url));
        }

        tags
    }

    /// Document title for the post listing
    pub fn index_title(&self) -> String {
        self.config.title.clone()
    }

    /// Meta tags for the post listing
    pub fn index_meta(&self) -> Vec<MetaTag> {
        vec![
            MetaTag::name("author", &self.config.author),
            MetaTag::name("description", &self.config.description),
            MetaTag::property("og:title", &self.config.title),
            MetaTag::property("og:type", "website"),
            MetaTag::property("og:description", &self.config.description),
            MetaTag::property("og:url", format!("{}/", self.config.base_url())),
        ]
    }
}

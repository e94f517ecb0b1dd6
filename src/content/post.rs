//! Post model and the in-memory post index

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::hash_map::{Entry, HashMap};

use super::{PostAttributes, ReadingTime};
use crate::config::BuildMode;
use crate::error::BlogError;
use crate::helpers::encode_segment;

/// A content file: front-matter attributes plus its Markdown body
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// Front-matter attributes
    pub attributes: PostAttributes,

    /// Path under the content dir without extension, `/`-separated
    pub source: String,

    /// Raw markdown body
    pub raw: String,

    /// Rendered HTML body
    pub content: String,

    /// Publication date parsed from the front-matter
    pub date: Option<DateTime<Utc>>,

    /// Estimated reading time, absent for an empty body
    pub reading_time: Option<ReadingTime>,
}

impl Post {
    /// Create a post with an empty body
    pub fn new(attributes: PostAttributes, source: impl Into<String>) -> Self {
        let source = source.into();
        let date = attributes.parse_date();
        Self {
            attributes,
            source,
            raw: String::new(),
            content: String::new(),
            date,
            reading_time: None,
        }
    }

    /// Title from the front-matter, falling back to the file name
    pub fn title(&self) -> &str {
        self.attributes
            .title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| self.file_name())
    }

    /// Base name of the source file without extension
    pub fn file_name(&self) -> &str {
        self.source.rsplit('/').next().unwrap_or(&self.source)
    }

    /// Route slug: the declared slug, or the file name
    pub fn slug(&self) -> &str {
        self.attributes
            .declared_slug()
            .unwrap_or_else(|| self.file_name())
    }

    /// Percent-encoded route path, e.g. `/my-post`
    pub fn route_path(&self) -> String {
        format!("/{}", encode_segment(self.slug()))
    }

    pub fn description(&self) -> &str {
        &self.attributes.description
    }

    pub fn tags(&self) -> &[String] {
        &self.attributes.tags
    }

    pub fn cover_image(&self) -> Option<&str> {
        self.attributes.cover_image()
    }

    pub fn is_draft(&self) -> bool {
        self.attributes.draft
    }

    /// Whether a route slug refers to this post, by route slug or source path
    pub fn matches_slug(&self, slug: &str) -> bool {
        self.slug() == slug || self.source == slug
    }
}

/// All loaded posts, newest first
#[derive(Debug, Clone, Default)]
pub struct PostIndex {
    posts: Vec<Post>,
}

impl PostIndex {
    /// Build an index, sorting newest first. Undated posts sort last.
    pub fn new(mut posts: Vec<Post>) -> Self {
        posts.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| a.source.cmp(&b.source))
        });

        // A route slug can collide with another post's slug or source path
        let mut claimed: HashMap<&str, &str> = HashMap::new();
        for post in &posts {
            for key in [post.slug(), post.source.as_str()] {
                match claimed.entry(key) {
                    Entry::Occupied(owner) if *owner.get() != post.source => {
                        tracing::warn!(
                            "Duplicate slug '{}' in {} (already used by {}); only the first match is reachable",
                            key,
                            post.source,
                            owner.get()
                        );
                    }
                    Entry::Occupied(_) => {}
                    Entry::Vacant(slot) => {
                        slot.insert(&post.source);
                    }
                }
            }
        }

        Self { posts }
    }

    /// Every post, drafts included
    pub fn all(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Posts visible in listings for the given build mode
    pub fn listed(&self, mode: BuildMode) -> impl Iterator<Item = &Post> {
        self.posts
            .iter()
            .filter(move |p| mode.shows_drafts() || !p.is_draft())
    }

    /// Find a post by route slug
    pub fn find(&self, slug: &str) -> Option<&Post> {
        self.lookup(slug, |_| true)
    }

    /// Find a post by route slug, failing with [`BlogError::PostNotFound`]
    pub fn get(&self, slug: &str) -> Result<&Post, BlogError> {
        self.find(slug)
            .ok_or_else(|| BlogError::post_not_found(slug))
    }

    /// Find a post that is routable in the given build mode. Hidden drafts
    /// never shadow a listed post with the same slug.
    pub fn get_listed(&self, slug: &str, mode: BuildMode) -> Result<&Post, BlogError> {
        self.lookup(slug, |p| mode.shows_drafts() || !p.is_draft())
            .ok_or_else(|| BlogError::post_not_found(slug))
    }

    /// Route slugs win over source paths, then index order decides
    fn lookup(&self, slug: &str, visible: impl Fn(&Post) -> bool) -> Option<&Post> {
        let mut candidates = self.posts.iter().filter(|p| visible(*p));
        candidates
            .clone()
            .find(|p| p.slug() == slug)
            .or_else(|| candidates.find(|p| p.matches_slug(slug)))
    }
}

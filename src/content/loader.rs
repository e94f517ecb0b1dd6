//! Content loader - loads posts from the content directory

use anyhow::Result;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{MarkdownRenderer, Post, PostAttributes, PostIndex, ReadingTime};
use crate::error::BlogError;
use crate::Blog;

/// Loads content from the content directory
pub struct ContentLoader<'a> {
    blog: &'a Blog,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(blog: &'a Blog) -> Self {
        let highlight = &blog.config.highlight;
        let renderer = MarkdownRenderer::with_options(&highlight.theme, highlight.line_number);
        Self { blog, renderer }
    }

    /// Load every post under the content directory, drafts included
    pub fn load_posts(&self) -> Result<PostIndex> {
        let content_dir = &self.blog.content_dir;
        if !content_dir.exists() {
            tracing::warn!("Content directory {:?} does not exist", content_dir);
            return Ok(PostIndex::default());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(content_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                match self.load_post(path) {
                    Ok(post) => posts.push(post),
                    Err(e) => {
                        tracing::warn!("Skipping {:?}: {}", path, e);
                    }
                }
            }
        }

        let index = PostIndex::new(posts);
        tracing::debug!("Loaded {} posts from {:?}", index.len(), content_dir);
        Ok(index)
    }

    /// Load a single post from a file
    pub fn load_post(&self, path: &Path) -> Result<Post> {
        let content = fs::read_to_string(path)?;
        let (attributes, body) = PostAttributes::parse(&content)
            .map_err(|e| BlogError::frontmatter(path, e.to_string()))?;

        if attributes.date.is_some() && attributes.parse_date().is_none() {
            tracing::warn!(
                "Unrecognized date {:?} in {:?}",
                attributes.date.as_deref().unwrap_or_default(),
                path
            );
        }

        let source = source_name(&self.blog.content_dir, path);

        let mut post = Post::new(attributes, source);
        post.raw = body.to_string();
        post.content = self.renderer.render(&post.raw)?;
        post.reading_time = ReadingTime::estimate(&post.raw, self.blog.config.words_per_minute);

        Ok(post)
    }
}

/// Path relative to the content dir, without extension, `/`-separated
fn source_name(content_dir: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(content_dir).unwrap_or(path);
    let without_ext = relative.with_extension("");
    without_ext
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildMode;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn site() -> (TempDir, Blog) {
        let tmp = TempDir::new().unwrap();
        let blog = Blog::new(tmp.path()).unwrap();
        (tmp, blog)
    }

    #[test]
    fn test_load_posts() {
        let (_tmp, blog) = site();
        write(
            &blog.content_dir,
            "first.md",
            "---\ntitle: First\ndate: 2023-01-01\ndescription: one\n---\n\nHello there world.\n",
        );
        write(
            &blog.content_dir,
            "second.md",
            "---\ntitle: Second\nslug: the-second\ndate: 2023-06-01\ndraft: true\n---\n\nBody.\n",
        );
        write(&blog.content_dir, "notes.txt", "not markdown");

        let index = ContentLoader::new(&blog).load_posts().unwrap();
        assert_eq!(index.len(), 2);

        let first = index.get("first").unwrap();
        assert_eq!(first.title(), "First");
        assert_eq!(first.reading_time.unwrap().to_string(), "1min");
        assert!(first.content.contains("<p>Hello there world.</p>"));

        let second = index.get("the-second").unwrap();
        assert!(second.is_draft());
        assert_eq!(index.get("second").unwrap().slug(), "the-second");

        let listed: Vec<_> = index.listed(BuildMode::Production).collect();
        assert_eq!(listed.len(), 1);
    }

    #[test]
    fn test_malformed_frontmatter_is_skipped() {
        let (_tmp, blog) = site();
        write(&blog.content_dir, "bad.md", "---\ntitle: [oops\n---\nbody");
        write(&blog.content_dir, "good.md", "---\ntitle: Good\n---\nbody");

        let index = ContentLoader::new(&blog).load_posts().unwrap();
        assert_eq!(index.len(), 1);
        assert!(index.find("good").is_some());
    }

    #[test]
    fn test_missing_content_dir() {
        let (_tmp, blog) = site();
        let index = ContentLoader::new(&blog).load_posts().unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_empty_body_has_no_reading_time() {
        let (_tmp, blog) = site();
        write(&blog.content_dir, "empty.md", "---\ntitle: Empty\n---\n");
        let index = ContentLoader::new(&blog).load_posts().unwrap();
        assert!(index.get("empty").unwrap().reading_time.is_none());
    }

    #[test]
    fn test_reading_time_counts_body_only() {
        let (_tmp, blog) = site();
        let body = vec!["word"; 450].join(" ");
        write(
            &blog.content_dir,
            "long.md",
            &format!("---\ntitle: Long read\ndescription: many words here\n---\n{}\n", body),
        );
        let index = ContentLoader::new(&blog).load_posts().unwrap();
        let post = index.get("long").unwrap();
        assert!(!post.raw.contains("title:"));
        assert_eq!(post.reading_time.unwrap().to_string(), "2min");
    }

    #[test]
    fn test_nested_post_found_by_route_slug() {
        let (_tmp, blog) = site();
        write(&blog.content_dir, "2023/nested.md", "---\ntitle: Nested\n---\nbody");
        let index = ContentLoader::new(&blog).load_posts().unwrap();
        let post = index.get("nested").unwrap();
        assert_eq!(post.source, "2023/nested");
        assert_eq!(post.route_path(), "/nested");
    }

    #[test]
    fn test_source_name_is_slash_separated() {
        let dir = Path::new("/site/src/content");
        let path = dir.join("2023").join("post.md");
        assert_eq!(source_name(dir, &path), "2023/post");
    }
}

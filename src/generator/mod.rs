//! Generator module - prerenders the site into static HTML files

mod sitemap;

pub use sitemap::{SitemapEntry, SitemapGenerator};

use anyhow::{Context as _, Result};
use std::fs;
use std::path::Path;
use tera::Context;
use walkdir::WalkDir;

use crate::content::{Post, PostIndex};
use crate::meta::{MetaResolver, MetaTag};
use crate::nav::nav_class;
use crate::routes::{prerender_routes, Route};
use crate::templates::{PostData, SiteData, TemplateRenderer};
use crate::Blog;

/// Static site generator using the embedded templates
pub struct Generator {
    blog: Blog,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Blog) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;

        Ok(Self {
            blog: blog.clone(),
            renderer,
        })
    }

    /// Generate the entire site, returning the number of pages written
    pub fn generate(&self, posts: &PostIndex) -> Result<usize> {
        let output_dir = &self.blog.output_dir;
        fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create output dir {:?}", output_dir))?;

        self.copy_assets()?;

        let routes = prerender_routes(posts, self.blog.mode);
        let mut written = 0;

        for route in &routes {
            let html = self.render_route(posts, route)?;
            let output_path = self.output_path(route);
            write_file(&output_path, &html)?;
            tracing::debug!("Generated {} -> {:?}", route.path(), output_path);
            written += 1;
        }

        let not_found = self.render_not_found()?;
        write_file(&output_dir.join("404.html"), &not_found)?;

        self.generate_sitemap(posts, &routes)?;

        Ok(written)
    }

    /// Render the page for a route. Unknown slugs and drafts hidden by the
    /// current build mode yield the 404 page.
    pub fn render_route(&self, posts: &PostIndex, route: &Route) -> Result<String> {
        match route {
            Route::Index => self.render_index(posts),
            Route::Post(slug) => match posts.get_listed(slug, self.blog.mode) {
                Ok(post) => self.render_post(post, slug),
                Err(e) => {
                    tracing::debug!("{}", e);
                    self.render_not_found()
                }
            },
            Route::NotFound => self.render_not_found(),
        }
    }

    /// Render the post listing
    fn render_index(&self, posts: &PostIndex) -> Result<String> {
        let resolver = MetaResolver::new(&self.blog.config);
        let listed: Vec<PostData> = posts.listed(self.blog.mode).map(PostData::from).collect();

        let mut context = self.base_context(
            &Route::Index,
            &resolver.index_title(),
            &resolver.index_meta(),
        );
        context.insert("posts", &listed);

        Ok(self.renderer.render("index.html", &context)?)
    }

    /// Render a single post reached through `slug`
    fn render_post(&self, post: &Post, slug: &str) -> Result<String> {
        let resolver = MetaResolver::new(&self.blog.config);
        let route = Route::Post(slug.to_string());

        let mut context = self.base_context(
            &route,
            &resolver.post_title(post),
            &resolver.post_meta(post, slug),
        );
        context.insert("post", &PostData::from(post));
        context.insert("post_content", &post.content);

        Ok(self.renderer.render("post.html", &context)?)
    }

    /// Render the not-found page
    pub fn render_not_found(&self) -> Result<String> {
        let title = format!("Not found | {}", self.blog.config.author);
        let context = self.base_context(&Route::NotFound, &title, &[]);
        Ok(self.renderer.render("404.html", &context)?)
    }

    /// Create a base context with common variables
    fn base_context(&self, route: &Route, title: &str, meta_tags: &[MetaTag]) -> Context {
        let config = &self.blog.config;
        let mut context = Context::new();
        context.insert(
            "site",
            &SiteData {
                title: config.title.clone(),
                description: config.description.clone(),
                author: config.author.clone(),
                url: config.base_url().to_string(),
            },
        );
        context.insert("page_title", title);
        context.insert("meta_tags", meta_tags);
        context.insert("nav_class", &nav_class(route));
        context.insert("current_path", &route.path());
        context
    }

    /// Output file for a prerendered route
    fn output_path(&self, route: &Route) -> std::path::PathBuf {
        match route {
            Route::Index => self.blog.output_dir.join("index.html"),
            Route::Post(slug) => self.blog.output_dir.join(slug).join("index.html"),
            Route::NotFound => self.blog.output_dir.join("404.html"),
        }
    }

    /// Write sitemap.xml for every prerendered route
    fn generate_sitemap(&self, posts: &PostIndex, routes: &[Route]) -> Result<()> {
        let host = self.blog.config.sitemap_host();
        let entries: Vec<SitemapEntry> = routes
            .iter()
            .map(|route| {
                let lastmod = match route {
                    Route::Post(slug) => posts
                        .get_listed(slug, self.blog.mode)
                        .ok()
                        .and_then(|p| p.date),
                    _ => None,
                };
                SitemapEntry::new(host, route, lastmod)
            })
            .collect();

        let xml = SitemapGenerator::generate(&entries);
        write_file(&self.blog.output_dir.join("sitemap.xml"), &xml)?;
        tracing::debug!("Generated sitemap with {} entries", entries.len());
        Ok(())
    }

    /// Copy static assets (images, styles, favicon) into the output
    fn copy_assets(&self) -> Result<()> {
        let assets_dir = &self.blog.assets_dir;
        if !assets_dir.exists() {
            return Ok(());
        }

        let mut copied = 0;
        for entry in WalkDir::new(assets_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let relative = path.strip_prefix(assets_dir).unwrap_or(path);
            let target = self.blog.output_dir.join(relative);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &target)
                .with_context(|| format!("Failed to copy {:?} to {:?}", path, target))?;
            copied += 1;
        }

        tracing::debug!("Copied {} assets from {:?}", copied, assets_dir);
        Ok(())
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create dir {:?}", parent))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
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

    fn site(mode: BuildMode) -> (TempDir, Blog) {
        let tmp = TempDir::new().unwrap();
        let blog = Blog::new(tmp.path()).unwrap().with_mode(mode);
        write(
            &blog.content_dir,
            "hello.md",
            "---\ntitle: Hello\nslug: hello-world\ndescription: Greeting\ndate: 2023-08-05\n\
             coverImage: /images/cover.jpg\ntags: [rust, web]\n---\n\n# Hi\n\nSome words here.\n",
        );
        write(
            &blog.content_dir,
            "secret.md",
            "---\ntitle: Secret\ndescription: Not yet\ndate: 2024-01-01\ndraft: true\n---\n\nWIP\n",
        );
        write(&blog.assets_dir, "images/cover.jpg", "jpeg");
        (tmp, blog)
    }

    fn generate(blog: &Blog) -> usize {
        let posts = blog.load_posts().unwrap();
        Generator::new(blog).unwrap().generate(&posts).unwrap()
    }

    #[test]
    fn test_generate_production_site() {
        let (_tmp, blog) = site(BuildMode::Production);
        assert_eq!(generate(&blog), 2);

        let out = &blog.output_dir;
        let index = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(index.contains(r#"href="/hello-world""#));
        assert!(index.contains("August 5, 2023"));
        assert!(index.contains(">rust</a>"));
        assert!(!index.contains("Secret"));

        let post = fs::read_to_string(out.join("hello-world/index.html")).unwrap();
        assert!(post.contains("<title>Hello | DrDreo</title>"));
        assert!(post.contains(
            r#"<meta property="og:image" content="https://blog.drdreo.com/images/cover.jpg">"#
        ));
        assert!(post.contains(r#"<meta name="description" content="Greeting">"#));
        assert!(post.contains("<h1>Hi</h1>"));
        assert!(post.contains("1min"));
        assert!(post.contains("sticky top-0 -mx-20"));

        assert!(!out.join("secret").exists());
        assert!(out.join("404.html").exists());
        assert!(out.join("images/cover.jpg").exists());

        let sitemap = fs::read_to_string(out.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>https://blog.drdreo.com/hello-world</loc>"));
        assert!(!sitemap.contains("secret"));
    }

    #[test]
    fn test_generate_development_includes_drafts() {
        let (_tmp, blog) = site(BuildMode::Development);
        assert_eq!(generate(&blog), 3);

        let index = fs::read_to_string(blog.output_dir.join("index.html")).unwrap();
        assert!(index.contains("Secret"));
        assert!(blog.output_dir.join("secret/index.html").exists());
    }

    #[test]
    fn test_render_route_unknown_slug_is_not_found() {
        let (_tmp, blog) = site(BuildMode::Production);
        let posts = blog.load_posts().unwrap();
        let generator = Generator::new(&blog).unwrap();

        let html = generator
            .render_route(&posts, &Route::Post("nope".into()))
            .unwrap();
        assert!(html.contains("Page not found"));

        let draft = generator
            .render_route(&posts, &Route::Post("secret".into()))
            .unwrap();
        assert!(draft.contains("Page not found"));
    }

    #[test]
    fn test_unsafe_slug_left_out_of_pages_and_sitemap() {
        let (_tmp, blog) = site(BuildMode::Production);
        write(
            &blog.content_dir,
            "escape.md",
            "---\ntitle: Escape\nslug: \"..\"\ndate: 2023-09-01\n---\n\nbody\n",
        );
        assert_eq!(generate(&blog), 2);

        let sitemap = fs::read_to_string(blog.output_dir.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>https://blog.drdreo.com/hello-world</loc>"));
        assert!(!sitemap.contains("/..</loc>"));
    }

    #[test]
    fn test_nested_post_page_is_rendered() {
        let (_tmp, blog) = site(BuildMode::Production);
        write(
            &blog.content_dir,
            "2023/nested.md",
            "---\ntitle: Nested Post\ndate: 2023-03-01\n---\n\nInside a folder.\n",
        );
        assert_eq!(generate(&blog), 3);

        let index = fs::read_to_string(blog.output_dir.join("index.html")).unwrap();
        assert!(index.contains(r#"href="/nested""#));
        let page = fs::read_to_string(blog.output_dir.join("nested/index.html")).unwrap();
        assert!(page.contains("Inside a folder."));
        assert!(!page.contains("Page not found"));
    }

    #[test]
    fn test_hidden_draft_does_not_shadow_published_post() {
        let (_tmp, blog) = site(BuildMode::Production);
        write(
            &blog.content_dir,
            "intro.md",
            "---\ntitle: Intro Draft\ndate: 2024-05-01\ndraft: true\n---\n\nUnfinished.\n",
        );
        write(
            &blog.content_dir,
            "2020-intro.md",
            "---\ntitle: Intro\nslug: intro\ndate: 2020-01-01\n---\n\nPublished intro.\n",
        );
        generate(&blog);

        let page = fs::read_to_string(blog.output_dir.join("intro/index.html")).unwrap();
        assert!(page.contains("Published intro."));
        assert!(!page.contains("Page not found"));
    }

    #[test]
    fn test_index_links_are_encoded() {
        let (_tmp, blog) = site(BuildMode::Production);
        write(
            &blog.content_dir,
            "quoted.md",
            "---\ntitle: Quoted\nslug: 'a\" onmouseover=\"alert(1)'\ndate: 2023-02-01\n---\n\nbody\n",
        );
        generate(&blog);

        let index = fs::read_to_string(blog.output_dir.join("index.html")).unwrap();
        assert!(index.contains(r#"href="/a%22%20onmouseover=%22alert(1)""#));
        assert!(!index.contains(r#"onmouseover="alert"#));
    }

    #[test]
    fn test_post_reachable_by_file_name() {
        let (_tmp, blog) = site(BuildMode::Production);
        let posts = blog.load_posts().unwrap();
        let generator = Generator::new(&blog).unwrap();

        let html = generator
            .render_route(&posts, &Route::Post("hello".into()))
            .unwrap();
        assert!(html.contains(r#"content="https://blog.drdreo.com/hello">"#));
    }
}

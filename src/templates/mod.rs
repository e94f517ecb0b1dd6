//! Built-in page templates using the Tera template engine
//!
//! Templates are embedded in the binary; the page shell (`layout.html`)
//! holds the head metadata, the navigation bar, and the routed content area.

use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::content::{parse_date_string, Post};
use crate::error::BlogError;
use crate::helpers::{html_escape, iso_timestamp, long_date};

/// Template renderer with the embedded blog templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self, BlogError> {
        let mut tera = Tera::default();

        // Values are escaped explicitly in the templates; rendered post HTML must pass through
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("blog/layout.html")),
            ("index.html", include_str!("blog/index.html")),
            ("post.html", include_str!("blog/post.html")),
            ("404.html", include_str!("blog/404.html")),
        ])?;

        tera.register_filter("long_date", long_date_filter);
        tera.register_filter("esc", escape_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String, BlogError> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: HTML-escape text and attribute values, leaving `/` intact
fn escape_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("esc", "value", String, value);
    Ok(tera::Value::String(html_escape(&s)))
}

/// Tera filter: `2023-08-05T00:00:00.000Z` -> `August 5, 2023`
fn long_date_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("long_date", "value", String, value);
    let formatted = parse_date_string(&s)
        .map(|date| long_date(&date))
        .unwrap_or(s);
    Ok(tera::Value::String(formatted))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub author: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub title: String,
    pub slug: String,
    pub path: String,
    pub description: String,
    /// ISO timestamp, absent when the post has no valid date
    pub date: Option<String>,
    pub tags: Vec<String>,
    pub cover_image: Option<String>,
    pub reading_time: Option<String>,
    pub draft: bool,
}

impl From<&Post> for PostData {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title().to_string(),
            slug: post.slug().to_string(),
            path: post.route_path(),
            description: post.description().to_string(),
            date: post.date.as_ref().map(iso_timestamp),
            tags: post.tags().to_vec(),
            cover_image: post.cover_image().map(str::to_string),
            reading_time: post.reading_time.map(|rt| rt.to_string()),
            draft: post.is_draft(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::MetaTag;

    fn base_context() -> Context {
        let mut context = Context::new();
        context.insert(
            "site",
            &SiteData {
                title: "DrDreo".into(),
                description: "desc".into(),
                author: "DrDreo".into(),
                url: "https://blog.drdreo.com".into(),
            },
        );
        context.insert("page_title", "Hello & welcome");
        context.insert("meta_tags", &vec![MetaTag::property("og:type", "article")]);
        context.insert("nav_class", "flex sticky");
        context
    }

    #[test]
    fn test_templates_compile() {
        assert!(TemplateRenderer::new().is_ok());
    }

    #[test]
    fn test_layout_renders_head_and_nav() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer.render("404.html", &base_context()).unwrap();
        assert!(html.contains("<title>Hello &amp; welcome</title>"));
        assert!(html.contains(r#"<meta property="og:type" content="article">"#));
        assert!(html.contains(r#"<nav class="flex sticky">"#));
        assert!(html.contains(">Home</a>"));
    }

    #[test]
    fn test_long_date_filter() {
        let value = tera::Value::String("2023-08-05T00:00:00.000Z".into());
        let out = long_date_filter(&value, &HashMap::new()).unwrap();
        assert_eq!(out, tera::Value::String("August 5, 2023".into()));

        let value = tera::Value::String("garbage".into());
        let out = long_date_filter(&value, &HashMap::new()).unwrap();
        assert_eq!(out, tera::Value::String("garbage".into()));
    }
}

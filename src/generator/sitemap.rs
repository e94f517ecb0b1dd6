//! Sitemap generation for prerendered routes

use chrono::{DateTime, Utc};

use crate::helpers::{escape_xml, short_date};
use crate::routes::Route;

/// A sitemap URL entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    /// Absolute URL
    pub loc: String,
    /// Last modification date
    pub lastmod: Option<DateTime<Utc>>,
}

impl SitemapEntry {
    pub fn new(host: &str, route: &Route, lastmod: Option<DateTime<Utc>>) -> Self {
        let path = route.path();
        let loc = if route.is_index() {
            format!("{}/", host.trim_end_matches('/'))
        } else {
            format!("{}{}", host.trim_end_matches('/'), path)
        };
        Self { loc, lastmod }
    }
}

/// Sitemap XML writer
pub struct SitemapGenerator;

impl SitemapGenerator {
    /// Generate sitemap XML from entries
    pub fn generate(entries: &[SitemapEntry]) -> String {
        let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
        xml.push('\n');

        for entry in entries {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
            if let Some(lastmod) = &entry.lastmod {
                xml.push_str(&format!("    <lastmod>{}</lastmod>\n", short_date(lastmod)));
            }
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

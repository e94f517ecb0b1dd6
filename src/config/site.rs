//! Site configuration (blog.yml)

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::content::DEFAULT_WORDS_PER_MINUTE;
use crate::error::BlogError;

/// Name of the configuration file at the site root
pub const CONFIG_FILE: &str = "blog.yml";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,

    // URL
    pub url: String,

    // Directory
    pub content_dir: String,
    pub assets_dir: String,
    pub output_dir: String,

    // Writing
    pub words_per_minute: u32,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Prerender
    #[serde(default)]
    pub sitemap: SitemapConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "DrDreo".to_string(),
            description: "A blog created with Next.js and Tailwind.css".to_string(),
            author: "DrDreo".to_string(),

            url: "https://blog.drdreo.com".to_string(),

            content_dir: "src/content".to_string(),
            assets_dir: "public".to_string(),
            output_dir: "dist".to_string(),

            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            highlight: HighlightConfig::default(),

            sitemap: SitemapConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would produce broken URLs
    pub fn validate(&self) -> Result<(), BlogError> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(BlogError::Config(format!(
                "url must be absolute (http:// or https://), got '{}'",
                self.url
            )));
        }
        if self.content_dir.trim().is_empty() || self.output_dir.trim().is_empty() {
            return Err(BlogError::Config(
                "content_dir and output_dir must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Site url without a trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Host used for sitemap entries, falling back to the site url
    pub fn sitemap_host(&self) -> &str {
        self.sitemap
            .host
            .as_deref()
            .unwrap_or(&self.url)
            .trim_end_matches('/')
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

/// Sitemap configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    pub host: Option<String>,
}

/// Build mode. Drafts are only listed in development.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Development,
    #[default]
    Production,
}

impl BuildMode {
    pub fn shows_drafts(self) -> bool {
        self == BuildMode::Development
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildMode::Development => f.write_str("development"),
            BuildMode::Production => f.write_str("production"),
        }
    }
}

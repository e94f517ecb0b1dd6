//! drdreo-blog: a personal blog that renders Markdown posts into article pages
//!
//! Posts are Markdown files with YAML front-matter. The crate loads them,
//! resolves routes and social-sharing metadata, renders pages with embedded
//! Tera templates, and either prerenders the site or serves it locally.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod meta;
pub mod nav;
pub mod routes;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

use config::{BuildMode, SiteConfig, CONFIG_FILE};
use content::{ContentLoader, PostIndex};

pub use error::BlogError;

/// The blog application
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: SiteConfig,
    /// Build mode (controls draft visibility)
    pub mode: BuildMode,
    /// Base directory
    pub base_dir: PathBuf,
    /// Markdown content directory
    pub content_dir: PathBuf,
    /// Static assets copied verbatim into the output
    pub assets_dir: PathBuf,
    /// Output directory
    pub output_dir: PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            SiteConfig::load(&config_path)?
        } else {
            SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a Blog with an explicit configuration
    pub fn with_config(base_dir: PathBuf, config: SiteConfig) -> Self {
        let content_dir = base_dir.join(&config.content_dir);
        let assets_dir = base_dir.join(&config.assets_dir);
        let output_dir = base_dir.join(&config.output_dir);

        Self {
            config,
            mode: BuildMode::default(),
            base_dir,
            content_dir,
            assets_dir,
            output_dir,
        }
    }

    /// Set the build mode
    pub fn with_mode(mut self, mode: BuildMode) -> Self {
        self.mode = mode;
        self
    }

    /// Path of the configuration file
    pub fn config_path(&self) -> PathBuf {
        self.base_dir.join(CONFIG_FILE)
    }

    /// Load all posts
    pub fn load_posts(&self) -> Result<PostIndex> {
        ContentLoader::new(self).load_posts()
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the output directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}

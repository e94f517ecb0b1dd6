//! Error types shared across the blog library

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced at the library boundary
#[derive(Error, Debug)]
pub enum BlogError {
    /// No post matches the requested route slug
    #[error("No post found for slug '{slug}'")]
    PostNotFound { slug: String },

    /// Malformed front-matter in a content file
    #[error("Front-matter error in {path}: {message}")]
    Frontmatter { path: PathBuf, message: String },

    /// Invalid site configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Template rendering failure
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    /// File system I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BlogError {
    pub fn post_not_found(slug: impl Into<String>) -> Self {
        Self::PostNotFound { slug: slug.into() }
    }

    pub fn frontmatter(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Frontmatter {
            path: path.into(),
            message: message.into(),
        }
    }
}

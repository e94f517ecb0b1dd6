//! Configuration module

mod site;

pub use site::BuildMode;
pub use site::HighlightConfig;
pub use site::SiteConfig;
pub use site::SitemapConfig;
pub use site::CONFIG_FILE;

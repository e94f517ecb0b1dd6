//! Content module - handles posts, front-matter, and rendering

mod frontmatter;
pub mod loader;
mod markdown;
mod post;
mod reading_time;

pub use frontmatter::{parse_date_string, PostAttributes};
pub use loader::ContentLoader;
pub use markdown::MarkdownRenderer;
pub use post::{Post, PostIndex};
pub use reading_time::{count_words, ReadingTime, DEFAULT_WORDS_PER_MINUTE};

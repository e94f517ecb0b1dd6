//! URL routes: `/` lists posts, `/<slug>` shows one post

use crate::config::BuildMode;
use crate::content::PostIndex;
use crate::helpers::{decode_segment, encode_segment};

/// A resolved page route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The post listing at `/`
    Index,
    /// A post detail page at `/<slug>`
    Post(String),
    /// Anything else
    NotFound,
}

impl Route {
    /// Parse a request path into a route
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.trim_start_matches('/');
        let path = path
            .strip_suffix("index.html")
            .unwrap_or(path)
            .trim_end_matches('/');

        if path.is_empty() {
            return Route::Index;
        }

        if path.contains('/') {
            return Route::NotFound;
        }

        let slug = decode_segment(path);
        if is_safe_slug(&slug) {
            Route::Post(slug)
        } else {
            Route::NotFound
        }
    }

    pub fn is_index(&self) -> bool {
        matches!(self, Route::Index)
    }

    /// URL path for this route
    pub fn path(&self) -> String {
        match self {
            Route::Index => "/".to_string(),
            Route::Post(slug) => format!("/{}", encode_segment(slug)),
            Route::NotFound => "/404.html".to_string(),
        }
    }
}

/// A slug must map to exactly one directory under the output dir
pub fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && slug != ".."
        && !slug.contains(['/', '\\'])
        && slug != "404.html"
}

/// Routes to prerender: the listing followed by each listed post whose slug
/// is safe to write
pub fn prerender_routes(index: &PostIndex, mode: BuildMode) -> Vec<Route> {
    let posts = index.listed(mode).filter_map(|p| {
        if is_safe_slug(p.slug()) {
            Some(Route::Post(p.slug().to_string()))
        } else {
            tracing::warn!("Skipping {} with unsafe slug {:?}", p.source, p.slug());
            None
        }
    });
    std::iter::once(Route::Index).chain(posts).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Post, PostAttributes};

    #[test]
    fn test_parse_index() {
        assert_eq!(Route::parse("/"), Route::Index);
        assert_eq!(Route::parse(""), Route::Index);
        assert_eq!(Route::parse("/index.html"), Route::Index);
        assert_eq!(Route::parse("/?utm=x"), Route::Index);
    }

    #[test]
    fn test_parse_post() {
        assert_eq!(Route::parse("/hello"), Route::Post("hello".into()));
        assert_eq!(Route::parse("/hello/"), Route::Post("hello".into()));
        assert_eq!(Route::parse("/hello/index.html"), Route::Post("hello".into()));
        assert_eq!(Route::parse("/hello%20world"), Route::Post("hello world".into()));
    }

    #[test]
    fn test_parse_not_found() {
        assert_eq!(Route::parse("/a/b"), Route::NotFound);
        assert_eq!(Route::parse("/a%2Fb"), Route::NotFound);
        assert_eq!(Route::parse("/.."), Route::NotFound);
        assert_eq!(Route::parse("/%2E%2E"), Route::NotFound);
        assert_eq!(Route::parse("/%2e"), Route::NotFound);
        assert_eq!(Route::parse("/..%5Cetc"), Route::NotFound);
    }

    #[test]
    fn test_unsafe_slugs() {
        assert!(is_safe_slug("hello-world"));
        assert!(is_safe_slug("v1.2"));
        assert!(!is_safe_slug(".."));
        assert!(!is_safe_slug("a/b"));
        assert!(!is_safe_slug(""));
        assert!(!is_safe_slug("404.html"));
    }

    #[test]
    fn test_route_path() {
        assert_eq!(Route::Index.path(), "/");
        assert_eq!(Route::Post("hello world".into()).path(), "/hello%20world");
    }

    #[test]
    fn test_prerender_routes_skip_drafts() {
        let draft = PostAttributes {
            draft: true,
            ..Default::default()
        };
        let published = PostAttributes {
            slug: Some("custom".into()),
            ..Default::default()
        };
        let index = PostIndex::new(vec![
            Post::new(draft, "wip"),
            Post::new(published, "published"),
        ]);

        assert_eq!(
            prerender_routes(&index, BuildMode::Production),
            vec![Route::Index, Route::Post("custom".into())]
        );
        assert_eq!(prerender_routes(&index, BuildMode::Development).len(), 3);
    }

    #[test]
    fn test_prerender_routes_skip_unsafe_slugs() {
        let dots = PostAttributes {
            slug: Some("..".into()),
            ..Default::default()
        };
        let index = PostIndex::new(vec![
            Post::new(dots, "escape"),
            Post::new(PostAttributes::default(), "fine"),
        ]);
        assert_eq!(
            prerender_routes(&index, BuildMode::Production),
            vec![Route::Index, Route::Post("fine".into())]
        );
    }
}

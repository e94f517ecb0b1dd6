//! List site content

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::content::PostIndex;
use crate::routes::prerender_routes;
use crate::templates::PostData;
use crate::Blog;

/// What to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListKind {
    Posts,
    Tags,
    Routes,
}

/// List site content by kind, as text or JSON
pub fn run(blog: &Blog, kind: ListKind, json: bool) -> Result<()> {
    let posts = blog.load_posts()?;
    let output = render(blog, &posts, kind, json)?;
    println!("{}", output);
    Ok(())
}

fn render(blog: &Blog, posts: &PostIndex, kind: ListKind, json: bool) -> Result<String> {
    match kind {
        ListKind::Posts => {
            let listed: Vec<PostData> = posts.listed(blog.mode).map(PostData::from).collect();
            if json {
                return Ok(serde_json::to_string_pretty(&listed)?);
            }
            let mut out = format!("Posts ({}):", listed.len());
            for post in &listed {
                out.push_str(&format!(
                    "\n  {} - {} [{}]{}{}",
                    post.date.as_deref().map(|d| &d[..10]).unwrap_or("----------"),
                    post.title,
                    post.path,
                    post.reading_time
                        .as_deref()
                        .map(|rt| format!(" {}", rt))
                        .unwrap_or_default(),
                    if post.draft { " (draft)" } else { "" }
                ));
            }
            Ok(out)
        }
        ListKind::Tags => {
            let tags = tag_counts(posts, blog);
            if json {
                return Ok(serde_json::to_string_pretty(&tags)?);
            }
            let mut sorted: Vec<_> = tags.into_iter().collect();
            sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            let mut out = format!("Tags ({}):", sorted.len());
            for (tag, count) in sorted {
                out.push_str(&format!("\n  {} ({})", tag, count));
            }
            Ok(out)
        }
        ListKind::Routes => {
            let routes: Vec<String> = prerender_routes(posts, blog.mode)
                .iter()
                .map(|r| r.path())
                .collect();
            if json {
                return Ok(serde_json::to_string_pretty(&RouteList { routes: &routes })?);
            }
            let mut out = format!("Routes ({}):", routes.len());
            for route in &routes {
                out.push_str(&format!("\n  {}", route));
            }
            Ok(out)
        }
    }
}

#[derive(Serialize)]
struct RouteList<'a> {
    routes: &'a [String],
}

fn tag_counts(posts: &PostIndex, blog: &Blog) -> BTreeMap<String, usize> {
    let mut tags = BTreeMap::new();
    for post in posts.listed(blog.mode) {
        for tag in post.tags() {
            *tags.entry(tag.clone()).or_insert(0) += 1;
        }
    }
    tags
}

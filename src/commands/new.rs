//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Blog;

/// Default scaffold used when `scaffolds/post.md` does not exist
const DEFAULT_SCAFFOLD: &str = r#"---
title: {{ title }}
slug: {{ slug }}
description: ""
date: {{ date }}
tags: []
draft: true
---
"#;

/// Create a new draft post, returning its path
pub fn create_post(blog: &Blog, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();

    let slug = match slug {
        Some(s) => slug::slugify(s),
        None => slug::slugify(title),
    };
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a slug from title {:?}; pass --slug", title);
    }

    fs::create_dir_all(&blog.content_dir)?;
    let file_path = blog.content_dir.join(format!("{}.md", slug));

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let scaffold_path = blog.base_dir.join("scaffolds").join("post.md");
    let scaffold = if scaffold_path.exists() {
        fs::read_to_string(&scaffold_path)?
    } else {
        DEFAULT_SCAFFOLD.to_string()
    };

    let content = scaffold
        .replace("{{ title }}", &yaml_string(title))
        .replace("{{ slug }}", &slug)
        .replace("{{ date }}", &today);

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

/// Quote a value for a YAML scalar
fn yaml_string(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PostAttributes;
    use tempfile::TempDir;

    #[test]
    fn test_create_post() {
        let tmp = TempDir::new().unwrap();
        let blog = Blog::new(tmp.path()).unwrap();

        let path = create_post(&blog, "Hello: \"Rust\" World", None).unwrap();
        assert_eq!(path, blog.content_dir.join("hello-rust-world.md"));

        let content = fs::read_to_string(&path).unwrap();
        let (attrs, _) = PostAttributes::parse(&content).unwrap();
        assert_eq!(attrs.title.as_deref(), Some("Hello: \"Rust\" World"));
        assert_eq!(attrs.declared_slug(), Some("hello-rust-world"));
        assert!(attrs.draft);
        assert!(attrs.parse_date().is_some());
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let tmp = TempDir::new().unwrap();
        let blog = Blog::new(tmp.path()).unwrap();
        create_post(&blog, "Once", None).unwrap();
        assert!(create_post(&blog, "Once", None).is_err());
    }

    #[test]
    fn test_custom_slug_and_scaffold() {
        let tmp = TempDir::new().unwrap();
        let blog = Blog::new(tmp.path()).unwrap();
        let scaffolds = tmp.path().join("scaffolds");
        fs::create_dir_all(&scaffolds).unwrap();
        fs::write(
            scaffolds.join("post.md"),
            "---\ntitle: {{ title }}\nslug: {{ slug }}\n---\nWrite here.\n",
        )
        .unwrap();

        let path = create_post(&blog, "Anything", Some("My Custom Slug")).unwrap();
        assert!(path.ends_with("my-custom-slug.md"));
        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("Write here."));
    }
}

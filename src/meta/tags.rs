//! Meta tag values rendered into the page head

use serde::Serialize;
use std::fmt;

use crate::helpers::html_escape;

/// Which attribute carries the tag key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetaAttribute {
    /// `<meta name="...">`
    Name,
    /// `<meta property="...">` (Open Graph)
    Property,
}

impl MetaAttribute {
    pub fn as_str(self) -> &'static str {
        match self {
            MetaAttribute::Name => "name",
            MetaAttribute::Property => "property",
        }
    }
}

/// A single `<meta>` tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaTag {
    pub attribute: MetaAttribute,
    pub key: String,
    pub content: String,
}

impl MetaTag {
    pub fn name(key: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            attribute: MetaAttribute::Name,
            key: key.into(),
            content: content.into(),
        }
    }

    pub fn property(key: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            attribute: MetaAttribute::Property,
            key: key.into(),
            content: content.into(),
        }
    }
}

impl fmt::Display for MetaTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"<meta {}="{}" content="{}">"#,
            self.attribute.as_str(),
            html_escape(&self.key),
            html_escape(&self.content)
        )
    }
}

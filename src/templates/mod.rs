//! Built-in site templates using the Tera template engine
//!
//! Templates and static assets are embedded directly in the binary.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::helpers::{strip_html, truncate};

/// Stylesheet written to `public/css/style.css`
pub const STYLE_CSS: &str = include_str!("assets/style.css");

/// Browser glue written to `public/js/nav.js`
pub const NAV_JS: &str = include_str!("assets/nav.js");

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Values that must be escaped go through `| escape` in the templates;
        // URLs and rendered article HTML are inserted as-is
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("index.html", include_str!("site/index.html")),
            ("article.html", include_str!("site/article.html")),
            ("archive.html", include_str!("site/archive.html")),
            ("tags.html", include_str!("site/tags.html")),
            ("tag_single.html", include_str!("site/tag_single.html")),
            // Partials
            ("partials/head.html", include_str!("site/partials/head.html")),
            (
                "partials/header.html",
                include_str!("site/partials/header.html"),
            ),
            (
                "partials/footer.html",
                include_str!("site/partials/footer.html"),
            ),
            ("partials/pager.html", include_str!("site/partials/pager.html")),
            (
                "partials/macros.html",
                include_str!("site/partials/macros.html"),
            ),
        ])?;

        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    Ok(tera::Value::String(strip_html(&s)))
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 160,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => "...".to_string(),
    };

    Ok(tera::Value::String(truncate(s.trim(), length, Some(&omission))))
}

// Data structures for template context

/// Site-wide values
#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub url: String,
    pub root: String,
    /// Feed URL, absent when the feed is disabled
    pub feed_url: Option<String>,
    pub social_links: Vec<crate::config::SocialLink>,
}

/// Asset URLs
#[derive(Debug, Clone, Serialize)]
pub struct AssetData {
    pub style_css: String,
    pub nav_js: String,
}

/// Pre-rendered `<head>` tags shared by every page
#[derive(Debug, Clone, Serialize)]
pub struct HeadData {
    pub generator: String,
    pub feed: String,
}

/// Per-page metadata
#[derive(Debug, Clone, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    /// Site-relative path of the page
    pub path: String,
    pub canonical: String,
    pub open_graph: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagRef {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageData {
    pub src: String,
    pub alt: String,
}

/// An article as seen by templates
#[derive(Debug, Clone, Serialize)]
pub struct ArticleData {
    pub title: String,
    pub slug: String,
    pub path: String,
    pub permalink: String,
    pub date_iso: String,
    pub date_display: String,
    pub description: String,
    pub tags: Vec<TagRef>,
    pub image: Option<ImageData>,
    /// Rendered HTML; empty in listings that don't need it
    pub content: String,
    pub draft: bool,
}

impl ArticleData {
    /// Copy without the rendered body
    pub fn summary(&self) -> Self {
        Self {
            content: String::new(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PaginationData {
    pub per_page: usize,
    pub total: usize,
    pub current: usize,
    pub current_url: String,
    pub prev_link: String,
    pub next_link: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavArticle {
    pub title: String,
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArchiveYearData {
    pub year: i32,
    pub articles: Vec<ArticleData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagData {
    pub name: String,
    pub slug: String,
    pub path: String,
    pub count: usize,
    /// e.g. "3 articles"
    pub count_label: String,
    pub articles: Vec<ArticleData>,
}

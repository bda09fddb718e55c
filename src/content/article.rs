//! Article model

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use super::{ContentError, FrontMatter, Image};
use crate::helpers::{article_path, article_slug, parse_datetime};

/// A validated blog article.
///
/// Built once at the load boundary; every shape variant of the front-matter
/// has already been converted, so nothing downstream branches on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    pub title: String,

    /// Publication time
    pub datetime: DateTime<Utc>,

    pub description: String,

    pub tags: Vec<String>,

    /// Drafts are left out of listings and feeds
    pub draft: bool,

    pub image: Option<Image>,

    /// Resolved slug (explicit `slug` field, else the title)
    pub slug: String,

    /// Raw markdown content
    pub body: String,

    /// Source path relative to the articles directory
    pub source: String,
}

impl Article {
    /// Create a published article with minimal fields
    pub fn new(title: &str, datetime: DateTime<Utc>, source: &str) -> Self {
        Self {
            title: title.to_string(),
            datetime,
            description: String::new(),
            tags: Vec::new(),
            draft: false,
            image: None,
            slug: article_slug(None, title),
            body: String::new(),
            source: source.to_string(),
        }
    }

    /// Validate raw front-matter against the article schema.
    ///
    /// Dates without an offset are interpreted in `tz`. All problems of the
    /// file are reported in one error.
    pub fn from_front_matter(
        fm: FrontMatter,
        body: &str,
        source: &str,
        tz: Tz,
    ) -> Result<Self, ContentError> {
        let mut problems = Vec::new();

        let title = match fm.title.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            Some(_) => {
                problems.push("`title` must not be empty".to_string());
                String::new()
            }
            None => {
                problems.push("missing `title`".to_string());
                String::new()
            }
        };

        let datetime = match fm.datetime.as_deref() {
            Some(raw) => match parse_datetime(raw, &tz) {
                Some(dt) => Some(dt),
                None => {
                    problems.push(format!("`datetime` {:?} is not a valid date", raw));
                    None
                }
            },
            None => {
                problems.push("missing `datetime`".to_string());
                None
            }
        };

        if fm.description.is_none() {
            problems.push("missing `description`".to_string());
        }
        if fm.tags.is_none() {
            problems.push("missing `tags`".to_string());
        }
        if fm.draft.is_none() {
            problems.push("missing `draft`".to_string());
        }

        let slug = article_slug(fm.slug.as_deref(), &title);
        if problems.is_empty() && slug.is_empty() {
            problems.push(format!("title {:?} does not produce a usable slug", title));
        }

        match datetime {
            Some(datetime) if problems.is_empty() => Ok(Self {
                title,
                datetime,
                description: fm.description.unwrap_or_default(),
                tags: fm.tags.unwrap_or_default(),
                draft: fm.draft.unwrap_or_default(),
                image: fm.image,
                slug,
                body: body.to_string(),
                source: source.to_string(),
            }),
            _ => Err(ContentError::schema(source, problems.join("; "))),
        }
    }

    /// Site-relative link, e.g. `/articles/hello-world/`
    pub fn link(&self) -> String {
        format!("/{}", article_path(&self.slug))
    }
}

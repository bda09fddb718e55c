//! Site configuration (_config.yml)

use anyhow::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,
    /// IANA timezone name used for dates without an offset and for display.
    /// Empty means UTC.
    pub timezone: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,
    /// Articles are read from `<source_dir>/<articles_dir>`; they are
    /// always published under `/articles/<slug>/`
    pub articles_dir: String,
    pub tag_dir: String,

    // Writing
    pub render_drafts: bool,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Listing
    pub per_page: usize,

    // Outputs
    #[serde(default)]
    pub feed: FeedConfig,
    pub sitemap: bool,

    // Navigation (IndexMap keeps the YAML order)
    #[serde(default)]
    pub menu: IndexMap<String, String>,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let mut menu = IndexMap::new();
        menu.insert("Home".to_string(), "/".to_string());
        menu.insert("Articles".to_string(), "/articles/".to_string());
        menu.insert("Tags".to_string(), "/tags/".to_string());

        Self {
            title: "Folio".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),
            timezone: String::new(),

            url: "https://example.com".to_string(),
            root: "/".to_string(),

            source_dir: "source".to_string(),
            public_dir: "public".to_string(),
            articles_dir: "articles".to_string(),
            tag_dir: "tags".to_string(),

            render_drafts: false,
            highlight: HighlightConfig::default(),

            per_page: 10,

            feed: FeedConfig::default(),
            sitemap: true,

            menu,
            social_links: Vec::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Resolve the configured timezone, falling back to UTC
    pub fn tz(&self) -> chrono_tz::Tz {
        if self.timezone.trim().is_empty() {
            return chrono_tz::UTC;
        }
        match self.timezone.parse::<chrono_tz::Tz>() {
            Ok(tz) => tz,
            Err(_) => {
                tracing::warn!("Unknown timezone {:?}, using UTC", self.timezone);
                chrono_tz::UTC
            }
        }
    }
}

/// Syntax highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

/// RSS feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub enable: bool,
    /// Output path relative to the public dir
    pub path: String,
    /// Stylesheet referenced by the feed
    pub stylesheet: String,
    /// Maximum number of entries; everything when unset
    pub limit: Option<usize>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            enable: true,
            path: "rss.xml".to_string(),
            stylesheet: "/rss/styles.xsl".to_string(),
            limit: None,
        }
    }
}

/// Footer link to an external profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
    pub icon: String,
    pub path: String,
}

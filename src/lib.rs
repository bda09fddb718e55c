//! folio: a static blog generator with an RSS feed
//!
//! Markdown articles with YAML front-matter are validated into typed
//! [`content::Article`] values, sorted newest first and rendered to HTML
//! pages, an RSS 2.0 feed and a sitemap.

pub mod commands;
pub mod config;
pub mod content;
pub mod feed;
pub mod generator;
pub mod helpers;
pub mod i18n;
pub mod preferences;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// A site rooted at a directory
#[derive(Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Source directory
    pub source_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
    /// Article collection directory
    pub articles_dir: PathBuf,
}

impl Folio {
    /// Open the site in `base_dir`; `_config.yml` is optional
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Open the site in `base_dir` with an explicit configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let source_dir = base_dir.join(&config.source_dir);
        let public_dir = base_dir.join(&config.public_dir);
        let articles_dir = source_dir.join(&config.articles_dir);

        Self {
            config,
            base_dir,
            source_dir,
            public_dir,
            articles_dir,
        }
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new article
    pub fn new_article(&self, title: &str, draft: bool) -> Result<PathBuf> {
        commands::new::create_article(self, title, draft)
    }

    /// Where preferences of this site are persisted
    pub fn preference_store(&self) -> preferences::JsonFileStore {
        preferences::JsonFileStore::for_site(&self.base_dir)
    }

    /// Directory with per-language label overrides
    pub fn languages_dir(&self) -> PathBuf {
        self.base_dir.join("languages")
    }
}

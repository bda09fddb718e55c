//! Content loader - loads articles from the source directory

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono_tz::Tz;
use walkdir::WalkDir;

use super::markdown::strip_mdx_preamble;
use super::{Article, ContentError, FrontMatter};
use crate::Folio;

/// Loads and validates articles
pub struct ContentLoader<'a> {
    folio: &'a Folio,
    tz: Tz,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(folio: &'a Folio) -> Self {
        Self {
            folio,
            tz: folio.config.tz(),
        }
    }

    /// Load every article, drafts included.
    ///
    /// Fails if any file violates the schema or if two articles resolve to
    /// the same slug. Articles come back in source path order.
    pub fn load_articles(&self) -> Result<Vec<Article>, ContentError> {
        let articles_dir = &self.folio.articles_dir;
        if !articles_dir.exists() {
            tracing::warn!("Articles directory {:?} does not exist", articles_dir);
            return Ok(Vec::new());
        }

        let mut articles = Vec::new();
        let mut errors = Vec::new();

        for entry in WalkDir::new(articles_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_content_file(path) {
                match self.load_article(path) {
                    Ok(article) => articles.push(article),
                    Err(e) => {
                        tracing::error!("{}", e);
                        errors.push(e);
                    }
                }
            }
        }

        if !errors.is_empty() {
            return Err(ContentError::Invalid(errors));
        }

        check_unique_slugs(&articles)?;

        tracing::debug!("Loaded {} articles from {:?}", articles.len(), articles_dir);
        Ok(articles)
    }

    /// Load a single article from a file
    fn load_article(&self, path: &Path) -> Result<Article, ContentError> {
        let source = path
            .strip_prefix(&self.folio.articles_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        let content = fs::read_to_string(path).map_err(|error| ContentError::Io {
            file: source.clone(),
            error,
        })?;

        let (fm, body) = FrontMatter::parse(&content).map_err(|e| ContentError::Frontmatter {
            file: source.clone(),
            message: e.to_string(),
        })?;

        let body = if is_mdx(path) {
            strip_mdx_preamble(body)
        } else {
            body
        };

        Article::from_front_matter(fm, body, &source, self.tz)
    }
}

/// Reject two articles resolving to the same slug; they would share a URL
pub fn check_unique_slugs(articles: &[Article]) -> Result<(), ContentError> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for article in articles {
        if let Some(first) = seen.insert(&article.slug, &article.source) {
            return Err(ContentError::DuplicateSlug {
                slug: article.slug.clone(),
                first: first.to_string(),
                second: article.source.clone(),
            });
        }
    }
    Ok(())
}

/// Check if a file is a markdown or MDX file
fn is_content_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e, "md" | "markdown" | "mdx"))
        .unwrap_or(false)
}

fn is_mdx(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("mdx")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn site() -> (TempDir, Folio) {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("source/articles")).unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        (dir, folio)
    }

    fn write(folio: &Folio, name: &str, content: &str) {
        let path = folio.articles_dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    const VALID: &str = "---\ntitle: First Post\ndatetime: 2024-01-01\ndescription: d\ntags: [rust]\ndraft: false\n---\nHello\n";

    #[test]
    fn test_load_articles() {
        let (_dir, folio) = site();
        write(&folio, "first.md", VALID);
        write(
            &folio,
            "nested/second.mdx",
            "---\ntitle: Second\ndatetime: 2024-02-01\ndescription: d\ntags: []\ndraft: true\n---\nimport X from './x';\n\nBody\n",
        );
        write(&folio, "notes.txt", "ignored");

        let articles = ContentLoader::new(&folio).load_articles().unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].slug, "first-post");
        assert_eq!(articles[0].source, "first.md");
        assert_eq!(articles[1].body, "Body\n");
        assert!(articles[1].draft);
    }

    #[test]
    fn test_invalid_articles_collected() {
        let (_dir, folio) = site();
        write(&folio, "a.md", VALID);
        write(&folio, "b.md", "---\ntitle: No date\n---\n");
        write(&folio, "c.md", "no front matter at all\n");

        match ContentLoader::new(&folio).load_articles() {
            Err(ContentError::Invalid(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let (_dir, folio) = site();
        write(&folio, "a.md", VALID);
        write(
            &folio,
            "b.md",
            "---\ntitle: Other\nslug: first post\ndatetime: 2024-03-01\ndescription: d\ntags: []\ndraft: false\n---\n",
        );

        match ContentLoader::new(&folio).load_articles() {
            Err(ContentError::DuplicateSlug { slug, first, second }) => {
                assert_eq!(slug, "first-post");
                assert_eq!(first, "a.md");
                assert_eq!(second, "b.md");
            }
            other => panic!("expected duplicate slug, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_articles_dir() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        assert!(ContentLoader::new(&folio).load_articles().unwrap().is_empty());
    }
}

//! Create a new article

use anyhow::{bail, Result};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use crate::helpers::slugify;
use crate::Folio;

/// Frontmatter written for a new article
#[derive(Serialize)]
struct Scaffold<'a> {
    title: &'a str,
    datetime: String,
    description: &'a str,
    tags: Vec<String>,
    draft: bool,
}

/// Create `<articles_dir>/<slug>.md` with a complete frontmatter block
pub fn create_article(folio: &Folio, title: &str, draft: bool) -> Result<PathBuf> {
    let slug = slugify(title);
    if slug.is_empty() {
        bail!("Title {:?} does not produce a usable slug", title);
    }

    let file_path = folio.articles_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        bail!("File already exists: {:?}", file_path);
    }

    let now = chrono::Utc::now().with_timezone(&folio.config.tz());
    let scaffold = Scaffold {
        title,
        datetime: now.format("%Y-%m-%dT%H:%M:%S%:z").to_string(),
        description: "",
        tags: Vec::new(),
        draft,
    };
    let front_matter = serde_yaml::to_string(&scaffold)?;

    fs::create_dir_all(&folio.articles_dir)?;
    fs::write(&file_path, format!("---\n{}---\n\n", front_matter))?;

    tracing::info!("Created: {:?}", file_path);
    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::loader::ContentLoader;
    use tempfile::TempDir;

    #[test]
    fn test_create_article() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();

        let path = create_article(&folio, "Notes: on Rust & YAML", true).unwrap();
        assert_eq!(path, folio.articles_dir.join("notes-on-rust-yaml.md"));

        let articles = ContentLoader::new(&folio).load_articles().unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Notes: on Rust & YAML");
        assert!(articles[0].draft);
        assert!(articles[0].tags.is_empty());
    }

    #[test]
    fn test_existing_file_is_kept() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();

        create_article(&folio, "Twice", false).unwrap();
        assert!(create_article(&folio, "Twice", false).is_err());
        assert!(create_article(&folio, "???", false).is_err());
    }
}

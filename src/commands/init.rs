//! Initialize a new site

use anyhow::{bail, Result};
use std::fs;
use std::path::Path;

const CONFIG_TEMPLATE: &str = r#"# Site
title: Folio
description: A personal blog
author: John Doe
language: en
# IANA name, e.g. Europe/Berlin; empty means UTC
timezone: ''

# URL
url: https://example.com
root: /

# Directory
source_dir: source
public_dir: public
articles_dir: articles
tag_dir: tags

# Writing
render_drafts: false
highlight:
  theme: base16-ocean.dark
  line_number: false

# Listing
per_page: 10

# Outputs
feed:
  enable: true
  path: rss.xml
  stylesheet: /rss/styles.xsl
sitemap: true

# Navigation
menu:
  Home: /
  Articles: /articles/
  Tags: /tags/

social_links:
  - icon: GitHub
    path: https://github.com/
"#;

const SAMPLE_ARTICLE: &str = r#"
Welcome to your new site. This article lives in `source/articles/hello-world.md`.

## Writing

Create a new article with:

```bash
$ folio new "My New Article"
```

Every article starts with a frontmatter block carrying `title`, `datetime`,
`description`, `tags` and `draft`. Drafts stay out of listings and the feed.

## Building

```bash
$ folio generate
$ folio server
```
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        bail!("A site already exists in {:?}", target_dir);
    }

    fs::create_dir_all(target_dir.join("source/articles"))?;
    fs::create_dir_all(target_dir.join("languages"))?;
    fs::write(&config_path, CONFIG_TEMPLATE)?;

    let now = chrono::Utc::now();
    let sample = format!(
        "---\ntitle: Hello World\ndatetime: {}\ndescription: The first article on this site\ntags:\n  - meta\ndraft: false\n---\n{}",
        now.format("%Y-%m-%dT%H:%M:%SZ"),
        SAMPLE_ARTICLE
    );
    fs::write(target_dir.join("source/articles/hello-world.md"), sample)?;

    tracing::debug!("Wrote {:?}", config_path);
    Ok(())
}

//! List site content

use anyhow::{bail, Result};
use std::collections::BTreeMap;

use crate::content::loader::ContentLoader;
use crate::content::{sort_by_recency, sorted_posts, Article};
use crate::helpers::slugify;
use crate::Folio;

/// Print site content by type
pub fn run(folio: &Folio, content_type: &str) -> Result<()> {
    let articles = ContentLoader::new(folio).load_articles()?;
    for line in describe(&articles, content_type)? {
        println!("{}", line);
    }
    Ok(())
}

/// Lines printed for `content_type`
pub fn describe(articles: &[Article], content_type: &str) -> Result<Vec<String>> {
    let mut lines = Vec::new();

    match content_type {
        "article" | "articles" | "post" | "posts" => {
            let published = sorted_posts(articles);
            lines.push(format!("Articles ({}):", published.len()));
            lines.extend(published.iter().map(article_line));
        }
        "draft" | "drafts" => {
            let drafts: Vec<_> = articles.iter().filter(|a| a.draft).cloned().collect();
            let drafts = sort_by_recency(drafts);
            lines.push(format!("Drafts ({}):", drafts.len()));
            lines.extend(drafts.iter().map(article_line));
        }
        "tag" | "tags" => {
            // Keyed by slug so spelling variants count together
            let mut tags: BTreeMap<String, (String, usize)> = BTreeMap::new();
            for article in articles.iter().filter(|a| !a.draft) {
                for tag in &article.tags {
                    let slug = slugify(tag);
                    if slug.is_empty() {
                        continue;
                    }
                    tags.entry(slug).or_insert_with(|| (tag.clone(), 0)).1 += 1;
                }
            }
            lines.push(format!("Tags ({}):", tags.len()));
            let mut tags: Vec<_> = tags.into_values().collect();
            tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            lines.extend(
                tags.into_iter()
                    .map(|(tag, count)| format!("  {} ({})", tag, count)),
            );
        }
        _ => {
            bail!(
                "Unknown type: {}. Available: articles, drafts, tags",
                content_type
            );
        }
    }

    Ok(lines)
}

fn article_line(article: &Article) -> String {
    format!(
        "  {} - {} [{}]",
        article.datetime.format("%Y-%m-%d"),
        article.title,
        article.source
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn article(title: &str, day: u32, tags: &[&str], draft: bool) -> Article {
        let dt = Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap();
        let mut a = Article::new(title, dt, &format!("{}.md", title.to_lowercase()));
        a.tags = tags.iter().map(|t| t.to_string()).collect();
        a.draft = draft;
        a
    }

    fn fixture() -> Vec<Article> {
        vec![
            article("One", 1, &["rust"], false),
            article("Two", 2, &["Rust", "web"], false),
            article("Three", 3, &["web"], true),
        ]
    }

    #[test]
    fn test_list_articles() {
        let lines = describe(&fixture(), "articles").unwrap();
        assert_eq!(
            lines,
            vec![
                "Articles (2):",
                "  2024-01-02 - Two [two.md]",
                "  2024-01-01 - One [one.md]",
            ]
        );
    }

    #[test]
    fn test_list_drafts() {
        let lines = describe(&fixture(), "drafts").unwrap();
        assert_eq!(lines, vec!["Drafts (1):", "  2024-01-03 - Three [three.md]"]);
    }

    #[test]
    fn test_list_tags() {
        let lines = describe(&fixture(), "tags").unwrap();
        assert_eq!(lines, vec!["Tags (2):", "  rust (2)", "  web (1)"]);
    }

    #[test]
    fn test_unknown_type() {
        assert!(describe(&fixture(), "categories").is_err());
    }
}

//! URL helper functions

use super::slugs::slugify;
use crate::config::SiteConfig;

/// Path segment all articles are published under
pub const ARTICLES_PATH: &str = "articles";

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/rss.xml") // -> "/blog/rss.xml"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/about/") // -> "https://example.com/blog/about/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    format!("{}{}", config.url.trim_end_matches('/'), url_for(config, path))
}

/// Root-relative path of an article, e.g. `articles/hello-world/`
pub fn article_path(slug: &str) -> String {
    format!("{}/{}/", ARTICLES_PATH, slug)
}

/// Root-relative path of a tag page, e.g. `tags/web-dev/`
pub fn tag_path(config: &SiteConfig, tag: &str) -> String {
    format!("{}/{}/", config.tag_dir.trim_matches('/'), slugify(tag))
}

/// Root-relative path of an index page; page 1 is the home page
pub fn index_page_path(page: usize) -> String {
    if page <= 1 {
        String::new()
    } else {
        format!("page/{}/", page)
    }
}

/// Make a site-relative link absolute against `site`
pub fn absolute_url(site: &str, link: &str) -> String {
    if link.starts_with("http://") || link.starts_with("https://") {
        return link.to_string();
    }
    format!(
        "{}/{}",
        site.trim_end_matches('/'),
        link.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        SiteConfig {
            url: "https://example.com".to_string(),
            root: "/blog/".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/rss.xml"), "/blog/rss.xml");
        assert_eq!(url_for(&config, "about/"), "/blog/about/");
        assert_eq!(url_for(&config, ""), "/blog/");
        assert_eq!(url_for(&SiteConfig::default(), ""), "/");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "/about/"),
            "https://example.com/blog/about/"
        );
    }

    #[test]
    fn test_paths() {
        let config = SiteConfig::default();
        assert_eq!(article_path("hello-world"), "articles/hello-world/");
        assert_eq!(tag_path(&config, "Web Dev"), "tags/web-dev/");
        assert_eq!(index_page_path(1), "");
        assert_eq!(index_page_path(3), "page/3/");
    }

    #[test]
    fn test_absolute_url() {
        assert_eq!(
            absolute_url("https://example.com/", "/articles/a/"),
            "https://example.com/articles/a/"
        );
        assert_eq!(
            absolute_url("https://example.com", "https://other.org/x"),
            "https://other.org/x"
        );
    }
}

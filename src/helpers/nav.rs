//! Navigation helpers

use serde::Serialize;

use super::url::url_for;
use crate::config::SiteConfig;

/// A menu entry as handed to templates
#[derive(Debug, Clone, Serialize)]
pub struct MenuItem {
    pub name: String,
    pub path: String,
    /// Rendered as `aria-current="page"`
    pub current: bool,
}

/// Whether a nav link points at the section of `pathname`.
///
/// The home link is current only on `/`; any other link is current when it
/// contains the first segment of the path.
pub fn is_current(pathname: &str, href: &str) -> bool {
    if pathname == "/" && href == "/" {
        return true;
    }
    match pathname.split('/').nth(1) {
        Some(section) if !section.is_empty() => href.contains(section),
        _ => false,
    }
}

/// Menu from config with the current entry marked.
///
/// `pathname` is relative to the site root, so the match ignores `root`.
pub fn menu_items(config: &SiteConfig, pathname: &str) -> Vec<MenuItem> {
    config
        .menu
        .iter()
        .map(|(name, path)| {
            let current = is_current(pathname, path);
            let path = if path.starts_with("http://") || path.starts_with("https://") {
                path.clone()
            } else {
                url_for(config, path)
            };
            MenuItem {
                name: name.clone(),
                path,
                current,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_link() {
        assert!(is_current("/", "/"));
        assert!(!is_current("/articles/", "/"));
        assert!(!is_current("/", "/articles/"));
    }

    #[test]
    fn test_section_links() {
        assert!(is_current("/articles/hello-world/", "/articles/"));
        assert!(is_current("/tags/rust/", "/tags/"));
        assert!(!is_current("/tags/rust/", "/articles/"));
    }

    #[test]
    fn test_menu_items() {
        let config = SiteConfig::default();
        let items = menu_items(&config, "/articles/a/");
        let current: Vec<_> = items.iter().filter(|i| i.current).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].name, "Articles");
        assert_eq!(items[0].path, "/");
    }

    #[test]
    fn test_menu_items_under_root() {
        let config = SiteConfig {
            root: "/blog/".to_string(),
            ..Default::default()
        };
        let items = menu_items(&config, "/");
        assert!(items[0].current);
        assert_eq!(items[0].path, "/blog/");
        assert_eq!(items[1].path, "/blog/articles/");
        assert!(!items[1].current);
    }
}

//! HTML helper functions

use super::url::url_for;
use crate::config::SiteConfig;

/// Remove disallowed markup from rendered article HTML.
///
/// Uses ammonia's default allow-list: `<script>`/`<style>` elements are
/// dropped along with their contents, event handler attributes and
/// `javascript:` URLs are removed, ordinary formatting survives.
pub fn sanitize_html(html: &str) -> String {
    ammonia::clean(html)
}

/// Generate a feed link tag
pub fn feed_tag(config: &SiteConfig, path: &str, title: Option<&str>) -> String {
    let href = url_for(config, path);
    let title = title.unwrap_or(&config.title);
    format!(
        r#"<link rel="alternate" href="{}" title="{}" type="application/rss+xml">"#,
        href,
        html_escape(title)
    )
}

/// Generate Open Graph meta tags
pub fn open_graph(
    title: &str,
    description: &str,
    url: &str,
    image: Option<(&str, &str)>,
    site_name: &str,
) -> String {
    let og_type = if url.contains("/articles/") {
        "article"
    } else {
        "website"
    };
    let mut tags = vec![
        format!(r#"<meta property="og:type" content="{}">"#, og_type),
        format!(
            r#"<meta property="og:title" content="{}">"#,
            html_escape(title)
        ),
        format!(r#"<meta property="og:url" content="{}">"#, url),
        format!(
            r#"<meta property="og:site_name" content="{}">"#,
            html_escape(site_name)
        ),
    ];

    if !description.is_empty() {
        tags.push(format!(
            r#"<meta property="og:description" content="{}">"#,
            html_escape(description)
        ));
    }

    if let Some((src, alt)) = image {
        tags.push(format!(r#"<meta property="og:image" content="{}">"#, src));
        tags.push(format!(
            r#"<meta property="og:image:alt" content="{}">"#,
            html_escape(alt)
        ));
    }

    tags.join("\n")
}

/// Generate meta generator tag
pub fn meta_generator() -> String {
    format!(
        r#"<meta name="generator" content="folio {}">"#,
        env!("CARGO_PKG_VERSION")
    )
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Strip HTML tags from a string
pub fn strip_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_tag = false;

    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    result
}

/// Truncate a string to a specified length
pub fn truncate(s: &str, length: usize, omission: Option<&str>) -> String {
    let omission = omission.unwrap_or("...");

    if s.chars().count() <= length {
        s.to_string()
    } else {
        let truncated: String = s
            .chars()
            .take(length.saturating_sub(omission.chars().count()))
            .collect();
        format!("{}{}", truncated.trim_end(), omission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_drops_script() {
        let clean = sanitize_html("<script>x</script><p>hi</p>");
        assert!(clean.contains("<p>hi</p>"));
        assert!(!clean.contains("script"));
        assert!(!clean.contains('x'));
    }

    #[test]
    fn test_sanitize_drops_handlers_and_js_urls() {
        let clean = sanitize_html(
            r#"<p onclick="steal()">a <a href="javascript:alert(1)">link</a> <em>b</em></p>"#,
        );
        assert!(!clean.contains("onclick"));
        assert!(!clean.contains("javascript:"));
        assert!(clean.contains("<em>b</em>"));
    }

    #[test]
    fn test_feed_tag() {
        let config = SiteConfig::default();
        let tag = feed_tag(&config, "rss.xml", None);
        assert!(tag.contains(r#"href="/rss.xml""#));
        assert!(tag.contains("application/rss+xml"));
    }

    #[test]
    fn test_open_graph() {
        let tags = open_graph(
            "A \"quoted\" title",
            "",
            "https://example.com/articles/a/",
            Some(("/img/a.png", "Alt")),
            "Site",
        );
        assert!(tags.contains(r#"content="article""#));
        assert!(tags.contains("&quot;quoted&quot;"));
        assert!(!tags.contains("og:description"));
        assert!(tags.contains("og:image:alt"));
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<p>Hello <b>World</b></p>"), "Hello World");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 8, None), "Hello...");
        assert_eq!(truncate("Hi", 10, None), "Hi");
    }
}

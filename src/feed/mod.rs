//! RSS feed assembly and serialization

use std::io::Cursor;

use anyhow::Result;
use chrono::{DateTime, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::{Article, ContentRenderer};
use crate::helpers::{absolute_url, date_rfc2822, full_url_for, sanitize_html, url_for};

/// XSL stylesheet that makes the feed readable in a browser
pub const FEED_STYLESHEET: &str = include_str!("styles.xsl");

/// Site-level metadata carried by the feed envelope
#[derive(Debug, Clone, Serialize)]
pub struct SiteMeta {
    pub title: String,
    pub description: String,
    /// Absolute base URL, e.g. `https://example.com/`
    pub site: String,
    /// Stylesheet path referenced by the feed
    pub stylesheet: String,
}

impl SiteMeta {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            site: full_url_for(config, ""),
            stylesheet: stylesheet_href(config),
        }
    }
}

/// Stylesheet href under the site root; absolute URLs are kept as given
fn stylesheet_href(config: &SiteConfig) -> String {
    let stylesheet = &config.feed.stylesheet;
    if stylesheet.is_empty() || stylesheet.contains("://") {
        stylesheet.clone()
    } else {
        url_for(config, stylesheet)
    }
}

/// One feed entry
#[derive(Debug, Clone, Serialize)]
pub struct FeedItem {
    pub title: String,
    pub pub_date: DateTime<Utc>,
    pub description: String,
    /// Site-relative, `/articles/{slug}/`
    pub link: String,
    /// Sanitized HTML body
    pub content: String,
}

/// A syndication feed document
#[derive(Debug, Clone, Serialize)]
pub struct Feed {
    pub title: String,
    pub description: String,
    pub site: String,
    pub stylesheet: String,
    pub items: Vec<FeedItem>,
}

/// Build the feed for `posts`, which are expected to be filtered and sorted
/// already.
///
/// An article whose body fails to render is left out with a warning; the rest
/// of the feed is still produced.
pub fn build_feed<R: ContentRenderer + ?Sized>(
    site: &SiteMeta,
    posts: &[Article],
    renderer: &R,
) -> Feed {
    let items = posts
        .iter()
        .filter_map(|post| match renderer.render(&post.body) {
            Ok(html) => Some(FeedItem {
                title: post.title.clone(),
                pub_date: post.datetime,
                description: post.description.clone(),
                link: post.link(),
                content: sanitize_html(&html),
            }),
            Err(e) => {
                tracing::warn!("Skipping {} in feed: {}", post.source, e);
                None
            }
        })
        .collect();

    Feed {
        title: site.title.clone(),
        description: site.description.clone(),
        site: site.site.clone(),
        stylesheet: site.stylesheet.clone(),
        items,
    }
}

impl Feed {
    /// Serialize as RSS 2.0
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        if !self.stylesheet.is_empty() {
            let pi = format!(
                r#"xml-stylesheet href="{}" type="text/xsl""#,
                escape_attr(&self.stylesheet)
            );
            writer.write_event(Event::PI(BytesPI::new(pi.as_str())))?;
        }

        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        rss.push_attribute(("xmlns:content", "http://purl.org/rss/1.0/modules/content/"));
        rss.push_attribute(("xmlns:atom", "http://www.w3.org/2005/Atom"));
        writer.write_event(Event::Start(rss))?;
        writer.write_event(Event::Start(BytesStart::new("channel")))?;

        write_text_element(&mut writer, "title", &self.title)?;
        write_text_element(&mut writer, "description", &self.description)?;
        write_text_element(&mut writer, "link", &self.site)?;

        let last_build = self
            .items
            .iter()
            .map(|i| i.pub_date)
            .max()
            .unwrap_or_else(Utc::now);
        write_text_element(&mut writer, "lastBuildDate", &date_rfc2822(&last_build))?;

        for item in &self.items {
            let link = absolute_url(&self.site, &item.link);

            writer.write_event(Event::Start(BytesStart::new("item")))?;
            write_text_element(&mut writer, "title", &item.title)?;
            write_text_element(&mut writer, "link", &link)?;

            let mut guid = BytesStart::new("guid");
            guid.push_attribute(("isPermaLink", "true"));
            writer.write_event(Event::Start(guid))?;
            writer.write_event(Event::Text(BytesText::new(&link)))?;
            writer.write_event(Event::End(BytesEnd::new("guid")))?;

            write_text_element(&mut writer, "description", &item.description)?;
            write_text_element(&mut writer, "pubDate", &date_rfc2822(&item.pub_date))?;
            write_text_element(&mut writer, "content:encoded", &item.content)?;
            writer.write_event(Event::End(BytesEnd::new("item")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("channel")))?;
        writer.write_event(Event::End(BytesEnd::new("rss")))?;

        let mut xml = String::from_utf8(writer.into_inner().into_inner())?;
        xml.push('\n');
        Ok(xml)
    }
}

fn write_text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<()> {
    let text = strip_invalid_xml_chars(text);
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(&text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Drop characters XML 1.0 does not allow (control characters other than
/// tab, newline and carriage return)
fn strip_invalid_xml_chars(s: &str) -> String {
    s.chars()
        .filter(|&c| {
            c == '\t'
                || c == '\n'
                || c == '\r'
                || ('\u{0020}'..='\u{D7FF}').contains(&c)
                || ('\u{E000}'..='\u{FFFD}').contains(&c)
                || ('\u{10000}'..='\u{10FFFF}').contains(&c)
        })
        .collect()
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;").replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MarkdownRenderer;
    use chrono::TimeZone;

    fn site() -> SiteMeta {
        SiteMeta {
            title: "With Mike".to_string(),
            description: "Thoughts & notes".to_string(),
            site: "https://example.com/".to_string(),
            stylesheet: "/rss/styles.xsl".to_string(),
        }
    }

    fn article(title: &str, body: &str) -> Article {
        let dt = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();
        let mut a = Article::new(title, dt, &format!("{}.md", title));
        a.body = body.to_string();
        a.description = format!("About {}", title);
        a
    }

    struct FailingRenderer;

    impl ContentRenderer for FailingRenderer {
        fn render(&self, markdown: &str) -> Result<String> {
            if markdown.contains("boom") {
                anyhow::bail!("renderer exploded");
            }
            Ok(format!("<p>{}</p>", markdown))
        }
    }

    #[test]
    fn test_entry_fields() {
        let renderer = MarkdownRenderer::new();
        let feed = build_feed(&site(), &[article("Hello World", "Some *text*")], &renderer);

        assert_eq!(feed.title, "With Mike");
        assert_eq!(feed.stylesheet, "/rss/styles.xsl");
        assert_eq!(feed.items.len(), 1);
        let item = &feed.items[0];
        assert_eq!(item.title, "Hello World");
        assert_eq!(item.link, "/articles/hello-world/");
        assert_eq!(item.description, "About Hello World");
        assert!(item.content.contains("<em>text</em>"));
    }

    #[test]
    fn test_content_is_sanitized() {
        let renderer = MarkdownRenderer::new();
        let feed = build_feed(
            &site(),
            &[article("Post", "<script>x</script><p>hi</p>")],
            &renderer,
        );
        let content = &feed.items[0].content;
        assert!(content.contains("<p>hi</p>"));
        assert!(!content.contains("<script"));
    }

    #[test]
    fn test_failed_entry_is_skipped() {
        let posts = [article("Good", "fine"), article("Bad", "boom"), article("Also Good", "ok")];
        let feed = build_feed(&site(), &posts, &FailingRenderer);
        let titles: Vec<_> = feed.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Good", "Also Good"]);
    }

    #[test]
    fn test_to_xml() {
        let renderer = MarkdownRenderer::new();
        let feed = build_feed(&site(), &[article("A & B", "<p>hi</p>")], &renderer);
        let xml = feed.to_xml().unwrap();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"<?xml-stylesheet href="/rss/styles.xsl" type="text/xsl"?>"#));
        assert!(xml.contains(r#"<rss version="2.0""#));
        assert!(xml.contains("<title>With Mike</title>"));
        assert!(xml.contains("<description>Thoughts &amp; notes</description>"));
        assert!(xml.contains("<title>A &amp; B</title>"));
        assert!(xml.contains("<link>https://example.com/articles/a-b/</link>"));
        assert!(xml.contains("&lt;p&gt;hi&lt;/p&gt;"));
        assert!(xml.contains("<pubDate>Fri,"));
    }

    #[test]
    fn test_control_chars_dropped() {
        let renderer = MarkdownRenderer::new();
        let mut post = article("Bell", "ding\u{7}dong");
        post.description = "form\u{c}feed".to_string();
        let xml = build_feed(&site(), &[post], &renderer).to_xml().unwrap();
        assert!(xml.contains("<description>formfeed</description>"));
        assert!(!xml.contains('\u{7}'));
    }

    #[test]
    fn test_empty_feed() {
        let renderer = MarkdownRenderer::new();
        let feed = build_feed(&site(), &[], &renderer);
        assert!(feed.items.is_empty());
        let xml = feed.to_xml().unwrap();
        assert!(xml.contains("<channel>"));
        assert!(!xml.contains("<item>"));
    }

    #[test]
    fn test_site_meta_from_config() {
        let config = SiteConfig {
            url: "https://example.com".to_string(),
            root: "/blog/".to_string(),
            ..Default::default()
        };
        let meta = SiteMeta::from_config(&config);
        assert_eq!(meta.site, "https://example.com/blog/");
        assert_eq!(meta.stylesheet, "/blog/rss/styles.xsl");
    }

    #[test]
    fn test_stylesheet_href() {
        let mut config = SiteConfig::default();
        assert_eq!(SiteMeta::from_config(&config).stylesheet, "/rss/styles.xsl");

        config.feed.stylesheet = "https://cdn.example.com/feed.xsl".to_string();
        config.root = "/blog/".to_string();
        assert_eq!(
            SiteMeta::from_config(&config).stylesheet,
            "https://cdn.example.com/feed.xsl"
        );

        config.feed.stylesheet = String::new();
        assert_eq!(SiteMeta::from_config(&config).stylesheet, "");
    }
}

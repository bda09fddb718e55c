//! Generator module - generates static HTML files using built-in Tera templates

use anyhow::{Context as _, Result};
use chrono::{Datelike, Utc};
use chrono_tz::Tz;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::collections::BTreeMap;
use std::fs;
use std::io::Cursor;
use std::path::Path;

use tera::Context;
use walkdir::WalkDir;

use crate::content::{sort_by_recency, sorted_posts, Article, MarkdownRenderer};
use crate::feed::{build_feed, SiteMeta, FEED_STYLESHEET};
use crate::helpers::{
    absolute_url, date_xml, feed_tag, format_datetime, full_url_for, index_page_path,
    menu_items, meta_generator, open_graph, slugify, tag_path, url_for, ARTICLES_PATH,
};
use crate::i18n::I18n;
use crate::preferences::{ThemePreference, ThemeState};
use crate::templates::{
    ArchiveYearData, ArticleData, AssetData, ConfigData, HeadData, ImageData, NavArticle,
    PageMeta, PaginationData, TagData, TagRef, TemplateRenderer, NAV_JS, STYLE_CSS,
};
use crate::Folio;

const STYLE_CSS_PATH: &str = "css/style.css";
const NAV_JS_PATH: &str = "js/nav.js";
const SITEMAP_PATH: &str = "sitemap.xml";

/// Static site generator using Tera templates
pub struct Generator {
    folio: Folio,
    renderer: TemplateRenderer,
    markdown: MarkdownRenderer,
    i18n: I18n,
    theme: ThemePreference,
    tz: Tz,
}

impl Generator {
    /// Create a new generator
    pub fn new(folio: &Folio) -> Result<Self> {
        let config = &folio.config;
        let renderer = TemplateRenderer::new()?;
        let markdown =
            MarkdownRenderer::with_options(&config.highlight.theme, config.highlight.line_number);

        let mut i18n = I18n::new(&config.language);
        i18n.load_overrides(folio.languages_dir(), &config.language)?;

        let theme = ThemeState::load(&folio.preference_store())?.preference();

        Ok(Self {
            folio: folio.clone(),
            renderer,
            markdown,
            i18n,
            theme,
            tz: config.tz(),
        })
    }

    /// Generate the entire site from every loaded article, drafts included
    pub fn generate(&self, articles: &[Article]) -> Result<()> {
        fs::create_dir_all(&self.folio.public_dir)?;

        self.write_assets()?;
        self.copy_source_assets()?;

        let listed = if self.folio.config.render_drafts {
            sort_by_recency(articles.to_vec())
        } else {
            sorted_posts(articles)
        };
        let data = listed
            .iter()
            .map(|a| self.article_data(a))
            .collect::<Result<Vec<_>>>()?;
        let tags = self.build_tags_data(&listed, &data);

        let base = self.create_base_context();

        self.generate_index_pages(&data, &base)?;
        self.generate_article_pages(&data, &base)?;
        self.generate_archive_page(&listed, &data, &base)?;
        self.generate_tag_pages(&tags, &base)?;

        if self.folio.config.feed.enable {
            self.generate_feed(articles)?;
        }
        if self.folio.config.sitemap {
            self.generate_sitemap(articles)?;
        }

        tracing::info!(
            "Generated {} articles and {} tag pages",
            data.len(),
            tags.len()
        );
        Ok(())
    }

    /// Convert an article for templates, rendering its body
    fn article_data(&self, article: &Article) -> Result<ArticleData> {
        let config = &self.folio.config;
        let content = self
            .markdown
            .render(&article.body)
            .with_context(|| format!("Failed to render {}", article.source))?;

        let tags = article
            .tags
            .iter()
            .filter(|t| !slugify(t).is_empty())
            .map(|t| TagRef {
                name: t.clone(),
                path: url_for(config, &tag_path(config, t)),
            })
            .collect();

        Ok(ArticleData {
            title: article.title.clone(),
            slug: article.slug.clone(),
            path: url_for(config, &article.link()),
            permalink: full_url_for(config, &article.link()),
            date_iso: date_xml(&article.datetime),
            date_display: format_datetime(&article.datetime, self.i18n.locale(), &self.tz),
            description: article.description.clone(),
            tags,
            image: article.image.as_ref().map(|i| ImageData {
                src: i.src.clone(),
                alt: i.alt.clone(),
            }),
            content,
            draft: article.draft,
        })
    }

    /// Group listed articles by tag slug, ordered by slug
    fn build_tags_data(&self, listed: &[Article], data: &[ArticleData]) -> Vec<TagData> {
        let config = &self.folio.config;
        let mut tags_map: BTreeMap<String, TagData> = BTreeMap::new();

        for (article, item) in listed.iter().zip(data) {
            for tag in &article.tags {
                let slug = slugify(tag);
                if slug.is_empty() {
                    continue;
                }
                let entry = tags_map.entry(slug.clone()).or_insert_with(|| TagData {
                    name: tag.clone(),
                    path: url_for(config, &tag_path(config, tag)),
                    slug,
                    count: 0,
                    count_label: String::new(),
                    articles: Vec::new(),
                });
                // "Rust" and "rust" on one article count once
                if entry.articles.last().map(|a| &a.slug) != Some(&item.slug) {
                    entry.articles.push(item.summary());
                    entry.count += 1;
                }
            }
        }

        tags_map
            .into_values()
            .map(|mut tag| {
                tag.count_label = self.i18n.get_plural("articles", tag.count);
                tag
            })
            .collect()
    }

    /// Create a base context with the values every page uses
    fn create_base_context(&self) -> Context {
        let config = &self.folio.config;
        let feed_enabled = config.feed.enable;

        let config_data = ConfigData {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            language: config.language.clone(),
            url: config.url.clone(),
            root: url_for(config, ""),
            feed_url: feed_enabled.then(|| url_for(config, &config.feed.path)),
            social_links: config.social_links.clone(),
        };
        let head = HeadData {
            generator: meta_generator(),
            feed: if feed_enabled {
                feed_tag(config, &config.feed.path, None)
            } else {
                String::new()
            },
        };
        let assets = AssetData {
            style_css: url_for(config, STYLE_CSS_PATH),
            nav_js: url_for(config, NAV_JS_PATH),
        };

        let mut context = Context::new();
        context.insert("config", &config_data);
        context.insert("head", &head);
        context.insert("assets", &assets);
        context.insert("t", &self.i18n.labels());
        context.insert("theme", self.theme.as_str());
        context.insert(
            "current_year",
            &Utc::now().with_timezone(&self.tz).year().to_string(),
        );
        context
    }

    /// Extend the base context for the page at `path` (relative to the root)
    fn page_context(
        &self,
        base: &Context,
        path: &str,
        title: &str,
        description: &str,
        image: Option<&ImageData>,
    ) -> Context {
        let config = &self.folio.config;
        let canonical = full_url_for(config, path);
        let site = full_url_for(config, "");
        let og_image = image.map(|i| (absolute_url(&site, &i.src), i.alt.as_str()));
        let og_description = if description.is_empty() {
            config.description.as_str()
        } else {
            description
        };

        let page = PageMeta {
            title: title.to_string(),
            description: og_description.to_string(),
            path: url_for(config, path),
            open_graph: open_graph(
                if title.is_empty() {
                    config.title.as_str()
                } else {
                    title
                },
                og_description,
                &canonical,
                og_image.as_ref().map(|(src, alt)| (src.as_str(), *alt)),
                &config.title,
            ),
            canonical,
        };

        let pathname = format!("/{}", path.trim_start_matches('/'));
        let mut context = base.clone();
        context.insert("page", &page);
        context.insert("menu", &menu_items(config, &pathname));
        context
    }

    /// Generate index pages with pagination
    fn generate_index_pages(&self, data: &[ArticleData], base: &Context) -> Result<()> {
        let per_page = self.folio.config.per_page.max(1);
        let total_pages = data.len().div_ceil(per_page).max(1);

        for page_num in 1..=total_pages {
            let start = (page_num - 1) * per_page;
            let end = (start + per_page).min(data.len());
            let page_articles = &data[start.min(end)..end];

            let pagination = PaginationData {
                per_page,
                total: total_pages,
                current: page_num,
                current_url: url_for(&self.folio.config, &index_page_path(page_num)),
                prev_link: if page_num > 1 {
                    url_for(&self.folio.config, &index_page_path(page_num - 1))
                } else {
                    String::new()
                },
                next_link: if page_num < total_pages {
                    url_for(&self.folio.config, &index_page_path(page_num + 1))
                } else {
                    String::new()
                },
            };

            let path = index_page_path(page_num);
            let title = if page_num == 1 {
                String::new()
            } else {
                format!("{} {}", self.i18n.get("all_articles"), page_num)
            };
            let mut context = self.page_context(base, &path, &title, "", None);
            context.insert("articles", page_articles);
            context.insert("pagination", &pagination);

            let html = self.renderer.render("index.html", &context)?;
            self.write_page(&path, &html)?;
        }

        tracing::debug!("Generated {} index pages", total_pages);
        Ok(())
    }

    /// Generate individual article pages
    fn generate_article_pages(&self, data: &[ArticleData], base: &Context) -> Result<()> {
        for (i, article) in data.iter().enumerate() {
            // Listing is newest first: "next" is newer, "prev" is older
            let next_article = i.checked_sub(1).map(|j| nav_article(&data[j]));
            let prev_article = data.get(i + 1).map(nav_article);

            let path = self.relative_path(&article.path);
            let mut context = self.page_context(
                base,
                &path,
                &article.title,
                &article.description,
                article.image.as_ref(),
            );
            context.insert("article", article);
            context.insert("prev_article", &prev_article);
            context.insert("next_article", &next_article);

            let html = self
                .renderer
                .render("article.html", &context)
                .with_context(|| format!("Failed to render page for {}", article.slug))?;
            self.write_page(&path, &html)?;
        }

        Ok(())
    }

    /// Generate the archive of all articles grouped by year
    fn generate_archive_page(
        &self,
        listed: &[Article],
        data: &[ArticleData],
        base: &Context,
    ) -> Result<()> {
        let mut years_map: BTreeMap<i32, Vec<ArticleData>> = BTreeMap::new();
        for (article, item) in listed.iter().zip(data) {
            let year = article.datetime.with_timezone(&self.tz).year();
            years_map.entry(year).or_default().push(item.summary());
        }

        // Newest year first; articles keep the listing order
        let archive_years: Vec<ArchiveYearData> = years_map
            .into_iter()
            .rev()
            .map(|(year, articles)| ArchiveYearData { year, articles })
            .collect();

        let path = format!("{}/", ARTICLES_PATH);
        let mut context =
            self.page_context(base, &path, &self.i18n.get("all_articles"), "", None);
        context.insert("archive_years", &archive_years);
        context.insert("total_label", &self.i18n.get_plural("articles", data.len()));

        let html = self.renderer.render("archive.html", &context)?;
        self.write_page(&path, &html)?;
        tracing::debug!("Generated archive page");
        Ok(())
    }

    /// Generate the tag index and one page per tag
    fn generate_tag_pages(&self, tags: &[TagData], base: &Context) -> Result<()> {
        let tag_dir = format!("{}/", self.folio.config.tag_dir.trim_matches('/'));

        let mut context = self.page_context(base, &tag_dir, &self.i18n.get("tags"), "", None);
        context.insert("all_tags", tags);
        let html = self.renderer.render("tags.html", &context)?;
        self.write_page(&tag_dir, &html)?;

        for tag in tags {
            let path = self.relative_path(&tag.path);
            let title = format!("{} #{}", self.i18n.get("tagged"), tag.name);
            let mut context = self.page_context(base, &path, &title, "", None);
            context.insert("tag", tag);

            let html = self.renderer.render("tag_single.html", &context)?;
            self.write_page(&path, &html)?;
        }

        Ok(())
    }

    /// Generate the RSS feed and its stylesheet.
    ///
    /// The feed never carries drafts, whatever `render_drafts` says.
    fn generate_feed(&self, articles: &[Article]) -> Result<()> {
        let config = &self.folio.config;
        let mut posts = sorted_posts(articles);
        if let Some(limit) = config.feed.limit {
            posts.truncate(limit);
        }

        let feed = build_feed(&SiteMeta::from_config(config), &posts, &self.markdown);
        let xml = feed.to_xml()?;
        self.write_file(config.feed.path.trim_start_matches('/'), &xml)?;

        let stylesheet = &config.feed.stylesheet;
        if !stylesheet.is_empty() && !stylesheet.contains("://") {
            self.write_file(stylesheet.trim_start_matches('/'), FEED_STYLESHEET)?;
        }

        tracing::info!("Generated {} with {} items", config.feed.path, feed.items.len());
        Ok(())
    }

    /// Generate sitemap.xml with absolute URLs.
    ///
    /// Like the feed, it lists published articles and their tags only.
    fn generate_sitemap(&self, articles: &[Article]) -> Result<()> {
        let config = &self.folio.config;
        let published = sorted_posts(articles);
        let mut entries: Vec<(String, Option<String>)> = vec![
            (full_url_for(config, ""), None),
            (
                full_url_for(config, &format!("{}/", ARTICLES_PATH)),
                None,
            ),
            (
                full_url_for(config, &format!("{}/", config.tag_dir.trim_matches('/'))),
                None,
            ),
        ];
        for article in &published {
            entries.push((
                full_url_for(config, &article.link()),
                Some(date_xml(&article.datetime)),
            ));
        }

        let mut tags: BTreeMap<String, &str> = BTreeMap::new();
        for tag in published.iter().flat_map(|a| &a.tags) {
            let slug = slugify(tag);
            if !slug.is_empty() {
                tags.entry(slug).or_insert(tag);
            }
        }
        for tag in tags.values() {
            entries.push((full_url_for(config, &tag_path(config, tag)), None));
        }

        let xml = sitemap_xml(&entries)?;
        self.write_file(SITEMAP_PATH, &xml)?;
        tracing::debug!("Generated {} with {} urls", SITEMAP_PATH, entries.len());
        Ok(())
    }

    /// Write the built-in stylesheet and script
    fn write_assets(&self) -> Result<()> {
        self.write_file(STYLE_CSS_PATH, STYLE_CSS)?;
        self.write_file(NAV_JS_PATH, NAV_JS)?;
        Ok(())
    }

    /// Copy source assets (images, etc.) to public directory
    fn copy_source_assets(&self) -> Result<()> {
        let source_dir = &self.folio.source_dir;
        if !source_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(source_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || path.starts_with(&self.folio.articles_dir) {
                continue;
            }

            // Markdown is only ever an article
            let ext = path.extension().and_then(|e| e.to_str());
            if matches!(ext, Some("md") | Some("markdown") | Some("mdx")) {
                continue;
            }

            let relative = path.strip_prefix(source_dir)?;
            let dest = self.folio.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)
                .with_context(|| format!("Failed to copy {:?} to {:?}", path, dest))?;
        }

        Ok(())
    }

    /// Strip the configured root from a site path, e.g. `/blog/tags/a/` -> `tags/a/`
    fn relative_path(&self, path: &str) -> String {
        let root = url_for(&self.folio.config, "");
        path.strip_prefix(root.as_str())
            .unwrap_or(path)
            .trim_start_matches('/')
            .to_string()
    }

    /// Write `<path>/index.html`
    fn write_page(&self, path: &str, html: &str) -> Result<()> {
        let path = path.trim_start_matches('/');
        self.write_file(&format!("{}index.html", path), html)
    }

    fn write_file(&self, relative: &str, contents: &str) -> Result<()> {
        let output_path = self.folio.public_dir.join(Path::new(relative));
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| anyhow::anyhow!("Failed to create dir {:?}: {}", parent, e))?;
        }
        fs::write(&output_path, contents)
            .map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", output_path, e))?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }
}

fn nav_article(article: &ArticleData) -> NavArticle {
    NavArticle {
        title: article.title.clone(),
        path: article.path.clone(),
    }
}

/// Serialize sitemap entries of `(loc, lastmod)`
fn sitemap_xml(entries: &[(String, Option<String>)]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut urlset = BytesStart::new("urlset");
    urlset.push_attribute(("xmlns", "http://www.sitemaps.org/schemas/sitemap/0.9"));
    writer.write_event(Event::Start(urlset))?;

    for (loc, lastmod) in entries {
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        writer.write_event(Event::Start(BytesStart::new("loc")))?;
        writer.write_event(Event::Text(BytesText::new(loc)))?;
        writer.write_event(Event::End(BytesEnd::new("loc")))?;
        if let Some(lastmod) = lastmod {
            writer.write_event(Event::Start(BytesStart::new("lastmod")))?;
            writer.write_event(Event::Text(BytesText::new(lastmod)))?;
            writer.write_event(Event::End(BytesEnd::new("lastmod")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("urlset")))?;

    let mut xml = String::from_utf8(writer.into_inner().into_inner())?;
    xml.push('\n');
    Ok(xml)
}

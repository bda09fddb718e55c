//! Front-matter parsing

use serde::{Deserialize, Deserializer, Serialize};

/// Custom deserializer that handles both a single string and a list of strings.
/// A present-but-empty key yields an empty list, an absent key stays `None`.
fn string_or_vec<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Option<Vec<String>>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(vec![value.to_string()]))
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(vec![value]))
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(Some(vec))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(Vec::new()))
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(Vec::new()))
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Cover image declared in front-matter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub src: String,
    pub alt: String,
}

/// Raw front-matter of an article, before validation.
///
/// Every field is optional; [`Article::from_front_matter`](super::Article::from_front_matter)
/// checks the required ones and reports all problems of a file at once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    /// Older articles used `date` or `pubDatetime`
    #[serde(alias = "date", alias = "pubDatetime")]
    pub datetime: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub tags: Option<Vec<String>>,
    pub draft: Option<bool>,
    pub image: Option<Image>,
    pub slug: Option<String>,
}

impl FrontMatter {
    /// Parse front-matter from content string.
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), serde_yaml::Error> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        let Some(rest) = content.strip_prefix("---") else {
            return Ok((FrontMatter::default(), content));
        };
        let rest = rest.trim_start_matches(['\n', '\r']);

        // Front-matter that is closed immediately ("---\n---")
        if let Some(after) = rest.strip_prefix("---") {
            return Ok((FrontMatter::default(), after.trim_start_matches(['\n', '\r'])));
        }

        let Some(end_pos) = rest.find("\n---") else {
            // No closing ---, treat as no front-matter
            return Ok((FrontMatter::default(), content));
        };

        let yaml_content = &rest[..end_pos];
        let remaining = &rest[end_pos + 4..];
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(yaml_content)?;
        Ok((fm, remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
datetime: 2024-01-15
description: First post
tags:
  - rust
  - blog
draft: false
image:
  src: /images/hello.png
  alt: A greeting
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Hello World"));
        assert_eq!(fm.datetime.as_deref(), Some("2024-01-15"));
        assert_eq!(fm.tags, Some(vec!["rust".to_string(), "blog".to_string()]));
        assert_eq!(fm.draft, Some(false));
        assert_eq!(fm.image.unwrap().alt, "A greeting");
        assert!(remaining.starts_with("This is the content."));
    }

    #[test]
    fn test_parse_single_string_tags() {
        let content = "---\ntitle: Single\ntags: Notes\n---\nbody\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.tags, Some(vec!["Notes".to_string()]));
    }

    #[test]
    fn test_empty_tags_key_is_present() {
        let content = "---\ntitle: Empty\ntags:\n---\nbody\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.tags, Some(Vec::new()));

        let content = "---\ntitle: Missing\n---\nbody\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.tags, None);
    }

    #[test]
    fn test_date_aliases() {
        let content = "---\ntitle: Old\ndate: 2021-05-01 08:00:00\n---\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.datetime.as_deref(), Some("2021-05-01 08:00:00"));
    }

    #[test]
    fn test_no_frontmatter() {
        let (fm, remaining) = FrontMatter::parse("# Just markdown\n").unwrap();
        assert!(fm.title.is_none());
        assert_eq!(remaining, "# Just markdown\n");
    }

    #[test]
    fn test_unclosed_frontmatter_is_content() {
        let content = "---\ntitle: Never closed\n";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert!(fm.title.is_none());
        assert!(remaining.contains("Never closed"));
    }

    #[test]
    fn test_malformed_yaml_is_error() {
        let content = "---\ntitle: [unterminated\n---\nbody\n";
        assert!(FrontMatter::parse(content).is_err());
    }
}

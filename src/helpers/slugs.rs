//! Slug helper functions

/// URL-safe identifier for a title or tag.
///
/// Lowercase ASCII letters, digits and single hyphens only; non-ASCII text is
/// transliterated first. Same input, same output.
///
/// # Examples
/// ```ignore
/// slugify("Hello, World!") // -> "hello-world"
/// ```
pub fn slugify(input: &str) -> String {
    ::slug::slugify(input)
}

/// Slug of an article: the explicit `slug` field if present, else the title
pub fn article_slug(explicit: Option<&str>, title: &str) -> String {
    match explicit {
        Some(s) if !s.trim().is_empty() => slugify(s),
        _ => slugify(title),
    }
}

/// Slugify every entry of a list (tags)
pub fn slugify_all(items: &[String]) -> Vec<String> {
    items.iter().map(|s| slugify(s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_slug_charset(s: &str) -> bool {
        s.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  Rust  &  WebAssembly  "), "rust-webassembly");
        assert_eq!(slugify("Top 10 Tips (2024)"), "top-10-tips-2024");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_slugify_charset() {
        let samples = [
            "Hello, World!",
            "Ünïcödé Títle",
            "日本語のタイトル",
            "emoji 🚀 launch",
            "--already-a-slug--",
            "tabs\tand\nnewlines",
            "C++ vs. C#",
            "$$$",
        ];
        for s in samples {
            let slug = slugify(s);
            assert!(is_slug_charset(&slug), "{:?} -> {:?}", s, slug);
            assert!(!slug.starts_with('-') && !slug.ends_with('-'));
            assert!(!slug.contains("--"));
        }
    }

    #[test]
    fn test_slugify_deterministic() {
        assert_eq!(slugify("Same Input"), slugify("Same Input"));
    }

    #[test]
    fn test_article_slug() {
        assert_eq!(article_slug(None, "My Title"), "my-title");
        assert_eq!(article_slug(Some("custom"), "My Title"), "custom");
        assert_eq!(article_slug(Some("  "), "My Title"), "my-title");
    }

    #[test]
    fn test_slugify_all() {
        let tags = vec!["Web Dev".to_string(), "AWS".to_string()];
        assert_eq!(slugify_all(&tags), vec!["web-dev", "aws"]);
    }
}

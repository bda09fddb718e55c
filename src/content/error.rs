//! Errors raised while loading articles

use thiserror::Error;

/// A problem with an article source file
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {file}: {error}")]
    Io {
        file: String,
        #[source]
        error: std::io::Error,
    },

    #[error("{file}: invalid frontmatter: {message}")]
    Frontmatter { file: String, message: String },

    #[error("{file}: {message}")]
    Schema { file: String, message: String },

    #[error("duplicate slug {slug:?} resolved by {first} and {second}")]
    DuplicateSlug {
        slug: String,
        first: String,
        second: String,
    },

    #[error("{} article(s) failed validation:\n{}", .0.len(), list(.0))]
    Invalid(Vec<ContentError>),
}

fn list(errors: &[ContentError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

impl ContentError {
    pub(crate) fn schema(file: &str, message: impl Into<String>) -> Self {
        Self::Schema {
            file: file.to_string(),
            message: message.into(),
        }
    }
}

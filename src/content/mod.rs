//! Content module - article model, loading, validation and ordering

mod article;
mod error;
mod frontmatter;
pub mod loader;
mod markdown;
mod sort;

pub use article::Article;
pub use error::ContentError;
pub use frontmatter::{FrontMatter, Image};
pub use markdown::{strip_mdx_preamble, ContentRenderer, MarkdownRenderer};
pub use sort::{sort_by_recency, sorted_posts};

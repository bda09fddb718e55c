//! Post filtering and ordering

use super::Article;

/// Published articles, most recent first.
///
/// Drafts are removed. Articles are compared by publication time truncated to
/// whole seconds; articles published in the same second are ordered by slug.
/// The input is left untouched.
pub fn sorted_posts(posts: &[Article]) -> Vec<Article> {
    let published = posts.iter().filter(|p| !p.draft).cloned().collect();
    sort_by_recency(published)
}

/// Order articles most recent first without filtering drafts
pub fn sort_by_recency(mut posts: Vec<Article>) -> Vec<Article> {
    posts.sort_by(|a, b| {
        b.datetime
            .timestamp()
            .cmp(&a.datetime.timestamp())
            .then_with(|| a.slug.cmp(&b.slug))
    });
    posts
}

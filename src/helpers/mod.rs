//! Helper functions shared by the loader, the feed and the templates

mod date;
mod html;
mod nav;
mod slugs;
mod url;

pub use date::*;
pub use html::*;
pub use nav::*;
pub use slugs::*;
pub use url::*;

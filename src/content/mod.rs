//! Content module - docs pages, front-matter and discovery

mod doc;
mod frontmatter;
pub mod loader;

pub use doc::Doc;
pub use frontmatter::FrontMatter;
pub use loader::DocLoader;

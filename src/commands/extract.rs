//! Filter a single page to plain text

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::content::FrontMatter;
use crate::DocsSite;

/// Strip front-matter and MDX syntax from one file
pub fn run(site: &DocsSite, path: &Path) -> Result<String> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    let (_, body) = FrontMatter::parse(&content)
        .with_context(|| format!("Failed to parse front-matter in {:?}", path))?;

    Ok(site.content_filter().filter(body))
}

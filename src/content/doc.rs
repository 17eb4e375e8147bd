//! Docs page model

use serde::Serialize;
use std::path::PathBuf;

use super::FrontMatter;

/// A markdown or MDX page from the docs tree
#[derive(Debug, Clone, Serialize)]
pub struct Doc {
    /// Full source file path
    pub source: PathBuf,

    /// Path relative to the scanned root, `/`-separated
    pub relative_path: String,

    /// File name including extension
    pub file_name: String,

    /// Parsed front-matter
    pub front_matter: FrontMatter,

    /// Body with front-matter removed
    pub body: String,
}

impl Doc {
    /// Front-matter title, falling back to the file name
    pub fn title(&self) -> &str {
        self.front_matter
            .title
            .as_deref()
            .unwrap_or(&self.file_name)
    }

    pub fn description(&self) -> Option<&str> {
        self.front_matter.description.as_deref()
    }

    /// Name of the directory that directly contains this page
    pub fn section(&self) -> Option<&str> {
        self.source
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
    }
}

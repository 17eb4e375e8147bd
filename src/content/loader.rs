//! Doc loader - discovers and parses pages under a docs directory

use anyhow::{Context, Result};
use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{Doc, FrontMatter};

/// Loads markdown pages from a directory tree
pub struct DocLoader {
    root: PathBuf,
    extensions: Vec<String>,
    exclude: Vec<Pattern>,
}

impl DocLoader {
    /// Create a new loader rooted at `root`
    pub fn new<P: AsRef<Path>>(root: P, extensions: &[String], exclude: &[String]) -> Result<Self> {
        let exclude = exclude
            .iter()
            .map(|p| Pattern::new(p).with_context(|| format!("Invalid exclude pattern {:?}", p)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            root: root.as_ref().to_path_buf(),
            extensions: extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
            exclude,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All matching files under the root, sorted by path
    pub fn markdown_files(&self) -> Vec<PathBuf> {
        if !self.root.exists() {
            tracing::warn!("Docs directory {:?} does not exist", self.root);
            return Vec::new();
        }

        let mut files: Vec<PathBuf> = WalkDir::new(&self.root)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| e.into_path())
            .filter(|path| path.is_file() && self.has_extension(path) && !self.is_excluded(path))
            .collect();

        files.sort();
        files
    }

    /// Load every page, skipping (and logging) the ones that fail
    pub fn load_all(&self) -> Vec<Doc> {
        let files = self.markdown_files();
        let mut docs = Vec::with_capacity(files.len());

        for path in files {
            match self.load(&path) {
                Ok(doc) => docs.push(doc),
                Err(e) => {
                    tracing::warn!("Failed to load {:?}: {:#}", path, e);
                }
            }
        }

        tracing::debug!("Loaded {} docs from {:?}", docs.len(), self.root);
        docs
    }

    /// Load a single page
    pub fn load(&self, path: &Path) -> Result<Doc> {
        let content = fs::read_to_string(path)?;
        let (front_matter, body) = FrontMatter::parse(&content)?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Doc {
            source: path.to_path_buf(),
            relative_path: self.relative_path(path),
            file_name,
            front_matter,
            body: body.to_string(),
        })
    }

    /// Path relative to the root with `/` separators
    pub fn relative_path(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.iter().any(|ext| ext.eq_ignore_ascii_case(e)))
            .unwrap_or(false)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let relative = self.relative_path(path);
        self.exclude.iter().any(|p| p.matches(&relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exts() -> Vec<String> {
        vec!["md".to_string(), "mdx".to_string()]
    }

    #[test]
    fn test_discovers_sorted_markdown_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("pods")).unwrap();
        fs::write(root.join("pods/b.mdx"), "B").unwrap();
        fs::write(root.join("a.md"), "A").unwrap();
        fs::write(root.join("pods/notes.txt"), "skip").unwrap();

        let loader = DocLoader::new(root, &exts(), &[]).unwrap();
        let files: Vec<_> = loader
            .markdown_files()
            .iter()
            .map(|p| loader.relative_path(p))
            .collect();

        assert_eq!(files, vec!["a.md", "pods/b.mdx"]);
    }

    #[test]
    fn test_exclude_patterns() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("drafts")).unwrap();
        fs::write(root.join("drafts/wip.md"), "WIP").unwrap();
        fs::write(root.join("index.md"), "Home").unwrap();

        let loader = DocLoader::new(root, &exts(), &["drafts/*".to_string()]).unwrap();
        let docs = loader.load_all();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].relative_path, "index.md");
    }

    #[test]
    fn test_invalid_exclude_pattern() {
        assert!(DocLoader::new(".", &exts(), &["[".to_string()]).is_err());
    }

    #[test]
    fn test_bad_frontmatter_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("bad.md"), "---\ntitle: [oops\n---\nBody").unwrap();
        fs::write(root.join("good.md"), "---\ntitle: Good\n---\nBody").unwrap();

        let loader = DocLoader::new(root, &exts(), &[]).unwrap();
        let docs = loader.load_all();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].title(), "Good");
        assert_eq!(docs[0].body, "Body");
    }

    #[test]
    fn test_missing_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let loader = DocLoader::new(dir.path().join("missing"), &exts(), &[]).unwrap();
        assert!(loader.load_all().is_empty());
    }
}

//! docs-toolkit: maintenance tooling for a GPU cloud documentation site
//!
//! Builds the combined `llms.txt` text dump and the tutorials overview page
//! from the docs tree, regenerates the GPU/CPU reference tables from the
//! platform's GraphQL API, and exposes the MDX-to-plain-text [`filter`] used
//! along the way.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod content;
pub mod filter;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Configuration file looked up in the base directory
pub const CONFIG_FILE: &str = "docs-toolkit.yml";

/// A docs site checkout and its configuration
#[derive(Debug, Clone)]
pub struct DocsSite {
    /// Toolkit configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Docs source directory
    pub docs_dir: PathBuf,
    /// Static assets directory (receives llms.txt)
    pub static_dir: PathBuf,
    /// Site build output directory
    pub build_dir: PathBuf,
    /// Generated reference pages directory
    pub references_dir: PathBuf,
}

impl DocsSite {
    /// Open a site from a directory, reading its config file if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} found, using defaults", CONFIG_FILE);
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Open a site with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();

        Self {
            docs_dir: base_dir.join(&config.docs_dir),
            static_dir: base_dir.join(&config.static_dir),
            build_dir: base_dir.join(&config.build_dir),
            references_dir: base_dir.join(&config.references_dir),
            config,
            base_dir,
        }
    }

    /// Loader over the docs directory
    pub fn loader(&self) -> Result<content::DocLoader> {
        content::DocLoader::new(
            &self.docs_dir,
            &self.config.extensions,
            &self.config.exclude,
        )
    }

    /// Content filter built from the site's filter settings
    pub fn content_filter(&self) -> filter::ContentFilter {
        filter::ContentFilter::new(self.config.filter.clone())
    }

    /// Generate the combined text dump
    pub fn generate_llms(&self) -> Result<commands::llms::LlmsReport> {
        commands::llms::run(self)
    }

    /// Generate the tutorials overview page
    pub fn generate_overview(&self) -> Result<PathBuf> {
        commands::overview::run(self)
    }

    /// Remove generated text dumps
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}

//! Toolkit configuration (docs-toolkit.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::filter::FilterConfig;

/// Main toolkit configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Product name used in generated headers
    pub project_name: String,

    // Directory
    pub docs_dir: String,
    pub static_dir: String,
    pub build_dir: String,
    pub references_dir: String,

    // Discovery
    pub extensions: Vec<String>,
    /// Glob patterns, relative to the docs directory, of files to ignore
    #[serde(default)]
    pub exclude: Vec<String>,

    #[serde(default)]
    pub llms: LlmsConfig,
    #[serde(default)]
    pub overview: OverviewConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub tooltips: TooltipsConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            project_name: "RunPod".to_string(),

            docs_dir: "docs".to_string(),
            static_dir: "static".to_string(),
            build_dir: "build".to_string(),
            references_dir: "references".to_string(),

            extensions: vec!["md".to_string(), "mdx".to_string()],
            exclude: Vec::new(),

            llms: LlmsConfig::default(),
            overview: OverviewConfig::default(),
            filter: FilterConfig::default(),
            catalog: CatalogConfig::default(),
            tooltips: TooltipsConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid configuration in {:?}", path))?;
        Ok(config)
    }
}

/// Combined text dump configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmsConfig {
    pub file_name: String,
}

impl Default for LlmsConfig {
    fn default() -> Self {
        Self {
            file_name: "llms.txt".to_string(),
        }
    }
}

/// Tutorials overview page configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverviewConfig {
    /// Directory to scan, relative to the base directory
    pub dir: String,
    /// Output file name inside `dir`
    pub output: String,
    /// URL prefix for generated links
    pub url_prefix: String,
    pub extensions: Vec<String>,
}

impl Default for OverviewConfig {
    fn default() -> Self {
        Self {
            dir: "docs/tutorials".to_string(),
            output: "overview.md".to_string(),
            url_prefix: "/tutorials".to_string(),
            extensions: vec!["md".to_string()],
        }
    }
}

/// Hardware catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// GraphQL endpoint
    pub endpoint: String,
    pub timeout_secs: u64,
    pub gpu_file: String,
    pub cpu_file: String,
    pub pricing_url: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.runpod.io/graphql".to_string(),
            timeout_secs: 30,
            gpu_file: "gpu-types.mdx".to_string(),
            cpu_file: "cpu-types.mdx".to_string(),
            pricing_url: "https://www.runpod.io/gpu-instance/pricing".to_string(),
        }
    }
}

/// Tooltip import validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipsConfig {
    /// File exporting the tooltip components, relative to the base directory
    pub definitions: String,
    /// Module path pages import tooltips from
    pub import_path: String,
    /// Directory to scan, relative to the base directory
    pub scan_dir: String,
    pub extensions: Vec<String>,
    /// Glob patterns, relative to `scan_dir`, of files to ignore
    pub exclude: Vec<String>,
}

impl Default for TooltipsConfig {
    fn default() -> Self {
        Self {
            definitions: "snippets/tooltips.jsx".to_string(),
            import_path: "/snippets/tooltips.jsx".to_string(),
            scan_dir: ".".to_string(),
            extensions: vec!["mdx".to_string()],
            exclude: vec!["**/node_modules/**".to_string(), "**/.*/**".to_string()],
        }
    }
}

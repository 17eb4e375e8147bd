//! Regenerate the GPU and CPU reference pages

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::{self, page, CpuType, GpuType, GraphQlClient};
use crate::DocsSite;

fn client(site: &DocsSite) -> Result<GraphQlClient> {
    let config = &site.config.catalog;
    let client = GraphQlClient::new(&config.endpoint, Duration::from_secs(config.timeout_secs))?;
    Ok(client)
}

/// Fetch GPU types and write the GPU reference page
pub async fn run_gpu(site: &DocsSite) -> Result<PathBuf> {
    let client = client(site)?;
    let gpus = client
        .gpu_types()
        .await
        .with_context(|| format!("Failed to fetch GPU types from {}", client.endpoint()))?;

    write_gpu_page(site, gpus, Local::now().date_naive())
}

/// Fetch CPU types and write the CPU reference page
pub async fn run_cpu(site: &DocsSite) -> Result<PathBuf> {
    let client = client(site)?;
    let cpus = client
        .cpu_types()
        .await
        .with_context(|| format!("Failed to fetch CPU types from {}", client.endpoint()))?;

    write_cpu_page(site, cpus, Local::now().date_naive())
}

/// Normalize fetched GPU records and write them as the GPU reference page
pub fn write_gpu_page(site: &DocsSite, gpus: Vec<GpuType>, generated: NaiveDate) -> Result<PathBuf> {
    let gpus = catalog::normalize_gpus(gpus);
    tracing::info!("Fetched {} GPU types", gpus.len());

    let table = catalog::gpu_table(&gpus).render();
    let content = page::gpu_page(
        &site.config.project_name,
        &site.config.catalog.pricing_url,
        generated,
        &table,
    );

    let path = site.references_dir.join(&site.config.catalog.gpu_file);
    write_page(&path, &content)?;
    Ok(path)
}

/// Normalize fetched CPU records and write them as the CPU reference page
pub fn write_cpu_page(site: &DocsSite, cpus: Vec<CpuType>, generated: NaiveDate) -> Result<PathBuf> {
    let cpus = catalog::normalize_cpus(cpus);
    tracing::info!("Fetched {} CPU types", cpus.len());

    let table = catalog::cpu_table(&cpus).render();
    let content = page::cpu_page(&site.config.project_name, generated, &table);

    let path = site.references_dir.join(&site.config.catalog.cpu_file);
    write_page(&path, &content)?;
    Ok(path)
}

fn write_page(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;
    tracing::info!("Wrote {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn gpu(id: Option<&str>, name: Option<&str>, mem: Option<u32>) -> GpuType {
        GpuType {
            id: id.map(str::to_string),
            display_name: name.map(str::to_string),
            memory_in_gb: mem,
        }
    }

    #[test]
    fn test_gpu_page_written_to_references_dir() {
        let dir = tempfile::tempdir().unwrap();
        let site = DocsSite::with_config(dir.path(), SiteConfig::default());

        let gpus = vec![
            gpu(Some("NVIDIA H100"), Some("H100 SXM"), Some(80)),
            gpu(Some("unknown"), Some("Unknown"), None),
            gpu(Some("NVIDIA A40"), Some("A40"), Some(48)),
        ];
        let path = write_gpu_page(&site, gpus, date()).unwrap();
        assert_eq!(path, dir.path().join("references/gpu-types.mdx"));

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("---\ntitle: GPU types\n---\n"));
        assert!(content.contains("Table last generated: 2024-05-01"));
        assert!(content.contains("| GPU ID      | Display Name | Memory (GB) |\n"));
        assert!(content.contains("|-------------|--------------|-------------|\n"));

        let a40 = content.find("| NVIDIA A40 ").unwrap();
        let h100 = content.find("| NVIDIA H100 ").unwrap();
        assert!(a40 < h100);
        assert!(!content.contains("unknown"));
    }

    #[test]
    fn test_cpu_page_honours_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SiteConfig::default();
        config.references_dir = "docs/references".to_string();
        config.catalog.cpu_file = "cpus.md".to_string();
        let site = DocsSite::with_config(dir.path(), config);

        let cpus = vec![
            CpuType {
                display_name: Some("AMD  EPYC 7543".to_string()),
                cores: Some(32),
                threads_per_core: Some(2),
            },
            CpuType {
                display_name: Some("Incomplete".to_string()),
                cores: None,
                threads_per_core: Some(2),
            },
        ];
        let path = write_cpu_page(&site, cpus, date()).unwrap();
        assert_eq!(path, dir.path().join("docs/references/cpus.md"));

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("---\ntitle: Serverless CPU types\n---\n"));
        assert!(content.contains("| AMD EPYC 7543 |    32 |                2 |\n"));
        assert!(!content.contains("Incomplete"));
    }
}

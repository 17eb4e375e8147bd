//! Hardware catalog - GPU and CPU types from the platform's GraphQL API
//!
//! Records are fetched, cleaned up and rendered into the markdown reference
//! pages under the docs references directory.

mod client;
pub mod page;
mod table;

pub use client::{decode_response, GraphQlClient};
pub use table::{Align, MarkdownTable};

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const GPU_TYPES_QUERY: &str = "query GpuTypes { gpuTypes { id displayName memoryInGb } }";
pub const CPU_TYPES_QUERY: &str =
    "query CpuTypes { cpuTypes { displayName cores threadsPerCore } }";

/// A missing value is never the "unknown" placeholder
fn is_unknown(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.to_lowercase() == "unknown")
}

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s{2,}").unwrap();
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("Response contained no data")]
    MissingData,

    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),
}

// ============================================================================
// Records
// ============================================================================

/// A GPU type as reported by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpuType {
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub memory_in_gb: Option<u32>,
}

/// A CPU type as reported by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuType {
    pub display_name: Option<String>,
    pub cores: Option<u32>,
    pub threads_per_core: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GpuTypesData {
    gpu_types: Vec<GpuType>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CpuTypesData {
    cpu_types: Vec<CpuType>,
}

impl GraphQlClient {
    pub async fn gpu_types(&self) -> Result<Vec<GpuType>, CatalogError> {
        let data: GpuTypesData = self.query(GPU_TYPES_QUERY).await?;
        Ok(data.gpu_types)
    }

    pub async fn cpu_types(&self) -> Result<Vec<CpuType>, CatalogError> {
        let data: CpuTypesData = self.query(CPU_TYPES_QUERY).await?;
        Ok(data.cpu_types)
    }
}

/// Drop placeholder GPUs and sort by display name
///
/// Rows with a null id or name are kept; nameless rows sort first.
pub fn normalize_gpus(mut gpus: Vec<GpuType>) -> Vec<GpuType> {
    gpus.retain(|g| !is_unknown(g.id.as_deref()));
    gpus.sort_by(|a, b| a.display_name.cmp(&b.display_name));
    gpus
}

/// Drop placeholder and incomplete CPUs, tidy names and sort by display name
pub fn normalize_cpus(cpus: Vec<CpuType>) -> Vec<CpuType> {
    let mut cpus: Vec<CpuType> = cpus
        .into_iter()
        .filter(|c| !is_unknown(c.display_name.as_deref()))
        .filter(|c| c.cores.is_some() && c.threads_per_core.is_some())
        .map(|mut c| {
            let name = c
                .display_name
                .as_deref()
                .map(|name| WHITESPACE_RUN.replace_all(name, " ").trim().to_string());
            c.display_name = name;
            c
        })
        .collect();

    cpus.sort_by(|a, b| a.display_name.cmp(&b.display_name));
    cpus
}

pub fn gpu_table(gpus: &[GpuType]) -> MarkdownTable {
    let mut table = MarkdownTable::new([
        ("GPU ID", Align::Left),
        ("Display Name", Align::Left),
        ("Memory (GB)", Align::Right),
    ]);

    for gpu in gpus {
        table.push_row(vec![
            gpu.id.clone().unwrap_or_default(),
            gpu.display_name.clone().unwrap_or_default(),
            gpu.memory_in_gb.map(|m| m.to_string()).unwrap_or_default(),
        ]);
    }

    table
}

pub fn cpu_table(cpus: &[CpuType]) -> MarkdownTable {
    let mut table = MarkdownTable::new([
        ("Display Name", Align::Left),
        ("Cores", Align::Right),
        ("Threads Per Core", Align::Right),
    ]);

    for cpu in cpus {
        table.push_row(vec![
            cpu.display_name.clone().unwrap_or_default(),
            cpu.cores.map(|c| c.to_string()).unwrap_or_default(),
            cpu.threads_per_core
                .map(|t| t.to_string())
                .unwrap_or_default(),
        ]);
    }

    table
}

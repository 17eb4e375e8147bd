//! Generate the combined llms.txt text dump

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::Doc;
use crate::filter::{ContentFilter, ScanState};
use crate::DocsSite;

/// Outcome of a dump generation run
#[derive(Debug, Clone)]
pub struct LlmsReport {
    /// Number of docs included
    pub docs: usize,
    /// Files that were written
    pub written: Vec<PathBuf>,
}

/// Build the dump and write it to the static (and, if present, build) directory
pub fn run(site: &DocsSite) -> Result<LlmsReport> {
    let start = std::time::Instant::now();

    let loader = site.loader()?;
    let docs = loader.load_all();
    tracing::info!("Loaded {} docs from {:?}", docs.len(), site.docs_dir);

    let content = render(&site.config.project_name, &docs, &site.content_filter());

    let file_name = &site.config.llms.file_name;
    let mut targets = vec![site.static_dir.join(file_name)];
    if site.build_dir.exists() {
        targets.push(site.build_dir.join(file_name));
    }

    let mut written = Vec::new();
    for target in targets {
        match write_output(&target, &content) {
            Ok(()) => {
                tracing::info!("Wrote {:?}", target);
                written.push(target);
            }
            Err(e) => {
                tracing::error!("Failed to write {:?}: {:#}", target, e);
            }
        }
    }

    if written.is_empty() {
        anyhow::bail!("{} could not be written anywhere", file_name);
    }

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(LlmsReport {
        docs: docs.len(),
        written,
    })
}

/// Render the dump: header, table of contents, then every filtered page
pub fn render(project: &str, docs: &[Doc], filter: &ContentFilter) -> String {
    let mut out = format!(
        "# {project} Complete Documentation\n\n\
         This file contains the entire {project} documentation in a single text document \
         for easy reference and LLM processing.\n\n\
         ## Table of Contents\n\n",
        project = project
    );

    for doc in docs {
        out.push_str(&format!("- {} ({})\n", doc.title(), doc.relative_path));
    }
    out.push_str("\n\n");

    for doc in docs {
        let mut state = ScanState::new();
        let lines = filter.filter_with_state(&doc.body, &mut state);
        if state.is_suppressing() {
            tracing::debug!(
                "{} ends inside an unterminated HTML or component block",
                doc.relative_path
            );
        }

        out.push_str(&format!(
            "# {}\n\nFile: {}\n\n{}\n\n---\n\n",
            doc.title(),
            doc.relative_path,
            lines.join("\n")
        ));
    }

    out
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))
}

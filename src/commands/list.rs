//! List docs content

use anyhow::Result;
use indexmap::IndexMap;

use crate::DocsSite;

/// List docs content by type
pub fn run(site: &DocsSite, content_type: &str) -> Result<()> {
    let loader = site.loader()?;

    match content_type {
        "doc" | "docs" => {
            let docs = loader.load_all();
            println!("Docs ({}):", docs.len());
            for doc in docs {
                println!("  {} [{}]", doc.title(), doc.relative_path);
            }
        }
        "section" | "sections" => {
            let docs = loader.load_all();
            let mut sections: IndexMap<String, usize> = IndexMap::new();
            for doc in &docs {
                let section = doc
                    .relative_path
                    .rsplit_once('/')
                    .map(|(dir, _)| dir)
                    .unwrap_or(".");
                *sections.entry(section.to_string()).or_insert(0) += 1;
            }
            println!("Sections ({}):", sections.len());
            for (section, count) in sections {
                println!("  {} ({})", section, count);
            }
        }
        "file" | "files" => {
            let files = loader.markdown_files();
            println!("Files ({}):", files.len());
            for file in files {
                println!("  {}", loader.relative_path(&file));
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: docs, sections, files",
                content_type
            );
        }
    }

    Ok(())
}

//! Generate the tutorials overview page

use anyhow::{Context, Result};
use indexmap::IndexMap;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::fs;
use std::path::PathBuf;

use crate::content::{Doc, DocLoader};
use crate::DocsSite;

/// Characters escaped in each link path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'(')
    .add(b')')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

const HEADER: &str = "
---
title: Overview
sidebar_position: 1
---

Below is the list of all tutorials:
";

/// Scan the tutorials directory and write its overview page
pub fn run(site: &DocsSite) -> Result<PathBuf> {
    let config = &site.config.overview;
    let dir = site.base_dir.join(&config.dir);
    let output = dir.join(&config.output);

    // The page we are about to write is not a tutorial
    let loader = DocLoader::new(&dir, &config.extensions, &[config.output.clone()])?;
    let docs = loader.load_all();
    tracing::info!("Found {} tutorials in {:?}", docs.len(), dir);

    let content = render(&docs, &config.url_prefix);
    fs::create_dir_all(&dir)?;
    fs::write(&output, content).with_context(|| format!("Failed to write {:?}", output))?;

    tracing::info!("Overview page saved to {:?}", output);
    Ok(output)
}

/// Render the overview page, one section per tutorial folder
pub fn render(docs: &[Doc], url_prefix: &str) -> String {
    let mut sections: IndexMap<&str, Vec<&Doc>> = IndexMap::new();
    for doc in docs {
        sections
            .entry(doc.section().unwrap_or_default())
            .or_default()
            .push(doc);
    }

    let prefix = url_prefix.trim_end_matches('/');
    let mut out = HEADER.to_string();

    for (section, tutorials) in sections {
        out.push_str(&format!("\n## {}\n\n", capitalize(section)));
        for doc in tutorials {
            out.push_str(&format!(
                "- [{}]({}/{}): {}\n",
                doc.front_matter.title.as_deref().unwrap_or("No Title"),
                prefix,
                link_path(&doc.relative_path),
                doc.description().unwrap_or("No Description"),
            ));
        }
    }

    out
}

/// Upper-case the first character and lower-case the rest
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn link_path(relative: &str) -> String {
    relative
        .split('/')
        .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

//! Remove generated text dumps

use anyhow::Result;
use std::fs;

use crate::DocsSite;

/// Delete llms.txt from the static and build directories
pub fn run(site: &DocsSite) -> Result<()> {
    let file_name = &site.config.llms.file_name;

    for dir in [&site.static_dir, &site.build_dir] {
        let path = dir.join(file_name);
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::info!("Deleted: {:?}", path);
        }
    }

    Ok(())
}

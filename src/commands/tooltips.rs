//! Check that tooltip components used in MDX pages are imported

use anyhow::{bail, Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;
use std::fs;

use crate::content::DocLoader;
use crate::DocsSite;

lazy_static! {
    static ref TOOLTIP_EXPORT: Regex = Regex::new(r"export\s+const\s+(\w+Tooltip)\s*=").unwrap();
}

/// What is wrong with a tooltip on a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// Used on the page but not imported
    MissingImport,
    /// Imported but not exported by the definitions file
    InvalidImport,
    /// Imported but never used
    UnusedImport,
}

impl IssueKind {
    pub fn is_error(self) -> bool {
        !matches!(self, IssueKind::UnusedImport)
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IssueKind::MissingImport => "missing-import",
            IssueKind::InvalidImport => "invalid-import",
            IssueKind::UnusedImport => "unused-import",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipIssue {
    /// Page path relative to the scan directory
    pub file: String,
    pub tooltip: String,
    pub kind: IssueKind,
}

impl fmt::Display for TooltipIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            IssueKind::MissingImport => write!(
                f,
                "{}: Tooltip \"{}\" is used but not imported",
                self.file, self.tooltip
            ),
            IssueKind::InvalidImport => write!(
                f,
                "{}: Tooltip \"{}\" is not defined",
                self.file, self.tooltip
            ),
            IssueKind::UnusedImport => write!(
                f,
                "{}: Tooltip \"{}\" is imported but not used",
                self.file, self.tooltip
            ),
        }
    }
}

/// Outcome of a validation run
#[derive(Debug, Clone, Default)]
pub struct TooltipReport {
    /// Number of tooltips the definitions file exports
    pub definitions: usize,
    pub files_scanned: usize,
    /// Pages that use or import at least one tooltip
    pub files_with_tooltips: usize,
    pub issues: Vec<TooltipIssue>,
}

impl TooltipReport {
    pub fn errors(&self) -> impl Iterator<Item = &TooltipIssue> {
        self.issues.iter().filter(|i| i.kind.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &TooltipIssue> {
        self.issues.iter().filter(|i| !i.kind.is_error())
    }
}

/// Names of the tooltips exported by a definitions file
pub fn defined_tooltips(source: &str) -> BTreeSet<String> {
    TOOLTIP_EXPORT
        .captures_iter(source)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Per-page checker for a fixed set of tooltip definitions
pub struct TooltipValidator {
    defined: BTreeSet<String>,
    import: Regex,
    usage: Vec<(String, Regex)>,
}

impl TooltipValidator {
    pub fn new(defined: BTreeSet<String>, import_path: &str) -> Result<Self> {
        let import = Regex::new(&format!(
            r#"import\s*\{{([^}}]+)\}}\s*from\s*["']{}["']"#,
            regex::escape(import_path)
        ))
        .context("Invalid tooltip import path")?;

        let usage = defined
            .iter()
            .map(|name| {
                let pattern = format!(r"<{}(?:\s*/>|[\s>])", regex::escape(name));
                Ok((name.clone(), Regex::new(&pattern)?))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            defined,
            import,
            usage,
        })
    }

    pub fn definitions(&self) -> usize {
        self.defined.len()
    }

    /// Names imported from the tooltip module
    pub fn imported(&self, content: &str) -> BTreeSet<String> {
        self.import
            .captures_iter(content)
            .flat_map(|caps| {
                caps[1]
                    .split(',')
                    .map(|name| name.trim().to_string())
                    .filter(|name| !name.is_empty())
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Defined tooltips that appear as components on the page
    pub fn used(&self, content: &str) -> BTreeSet<String> {
        self.usage
            .iter()
            .filter(|(_, re)| re.is_match(content))
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Issues for one page, or `None` when the page has nothing to do with tooltips
    pub fn check(&self, file: &str, content: &str) -> Option<Vec<TooltipIssue>> {
        let imported = self.imported(content);
        let used = self.used(content);

        if imported.is_empty() && used.is_empty() {
            return None;
        }

        let issue = |tooltip: &String, kind| TooltipIssue {
            file: file.to_string(),
            tooltip: tooltip.clone(),
            kind,
        };

        let mut issues: Vec<TooltipIssue> = used
            .difference(&imported)
            .map(|t| issue(t, IssueKind::MissingImport))
            .collect();

        for tooltip in &imported {
            if !self.defined.contains(tooltip) {
                issues.push(issue(tooltip, IssueKind::InvalidImport));
            } else if !used.contains(tooltip) {
                issues.push(issue(tooltip, IssueKind::UnusedImport));
            }
        }

        Some(issues)
    }
}

/// Scan the site's pages and collect tooltip issues
pub fn validate(site: &DocsSite) -> Result<TooltipReport> {
    let config = &site.config.tooltips;

    let definitions_path = site.base_dir.join(&config.definitions);
    if !definitions_path.exists() {
        bail!("Tooltips file not found at {:?}", definitions_path);
    }
    let source = fs::read_to_string(&definitions_path)
        .with_context(|| format!("Failed to read {:?}", definitions_path))?;

    let validator = TooltipValidator::new(defined_tooltips(&source), &config.import_path)?;

    let scan_dir = if config.scan_dir == "." {
        site.base_dir.clone()
    } else {
        site.base_dir.join(&config.scan_dir)
    };
    let loader = DocLoader::new(&scan_dir, &config.extensions, &config.exclude)?;
    let files = loader.markdown_files();

    tracing::info!(
        "Found {} tooltip definitions in {}",
        validator.definitions(),
        config.definitions
    );
    tracing::info!("Scanning {} files...", files.len());

    let mut report = TooltipReport {
        definitions: validator.definitions(),
        ..Default::default()
    };

    for path in files {
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Failed to read {:?}: {}", path, e);
                continue;
            }
        };
        report.files_scanned += 1;

        if let Some(issues) = validator.check(&loader.relative_path(&path), &content) {
            report.files_with_tooltips += 1;
            report.issues.extend(issues);
        }
    }

    Ok(report)
}

/// Validate and log the results; fails when any error was found
pub fn run(site: &DocsSite) -> Result<TooltipReport> {
    let report = validate(site)?;
    tracing::info!("Files using tooltips: {}", report.files_with_tooltips);

    for warning in report.warnings() {
        tracing::warn!("{}", warning);
    }

    let errors = report.errors().count();
    if errors > 0 {
        for error in report.errors() {
            tracing::error!("{} [{}]", error, error.kind);
        }
        bail!(
            "{} tooltip error(s) found; add missing tooltips to the import from {:?}",
            errors,
            site.config.tooltips.import_path
        );
    }

    Ok(report)
}

//! CLI entry point for docs-toolkit

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "docs-toolkit")]
#[command(version)]
#[command(about = "Maintenance tooling for the GPU cloud documentation site", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the combined llms.txt text dump from the docs tree
    Llms,

    /// Build the tutorials overview page
    Overview,

    /// Regenerate the GPU types reference page
    #[command(name = "gpu-types")]
    GpuTypes,

    /// Regenerate the serverless CPU types reference page
    #[command(name = "cpu-types")]
    CpuTypes,

    /// Print a single page as plain text
    Filter {
        /// Markdown or MDX file to filter
        file: PathBuf,
    },

    /// List docs information
    List {
        /// Type of content to list (docs, sections, files)
        #[arg(default_value = "docs")]
        r#type: String,
    },

    /// Remove generated llms.txt files
    Clean,

    /// Check that tooltip components used in MDX pages are imported
    #[command(name = "validate-tooltips")]
    ValidateTooltips,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "docs_toolkit=debug,info"
    } else {
        "docs_toolkit=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Llms => {
            let site = docs_toolkit::DocsSite::new(&base_dir)?;
            tracing::info!("Generating {}...", site.config.llms.file_name);
            let report = site.generate_llms()?;
            for path in &report.written {
                println!("Wrote {} docs to {}", report.docs, path.display());
            }
        }

        Commands::Overview => {
            let site = docs_toolkit::DocsSite::new(&base_dir)?;
            let path = site.generate_overview()?;
            println!("Overview page created and saved as {}", path.display());
        }

        Commands::GpuTypes => {
            let site = docs_toolkit::DocsSite::new(&base_dir)?;
            let path = docs_toolkit::commands::catalog::run_gpu(&site).await?;
            println!("Markdown file with GPU data created: {}", path.display());
        }

        Commands::CpuTypes => {
            let site = docs_toolkit::DocsSite::new(&base_dir)?;
            let path = docs_toolkit::commands::catalog::run_cpu(&site).await?;
            println!("Markdown file with CPU data updated: {}", path.display());
        }

        Commands::Filter { file } => {
            let site = docs_toolkit::DocsSite::new(&base_dir)?;
            let file = if file.is_absolute() {
                file
            } else {
                base_dir.join(file)
            };
            let text = docs_toolkit::commands::extract::run(&site, &file)?;
            println!("{}", text);
        }

        Commands::List { r#type } => {
            let site = docs_toolkit::DocsSite::new(&base_dir)?;
            docs_toolkit::commands::list::run(&site, &r#type)?;
        }

        Commands::Clean => {
            let site = docs_toolkit::DocsSite::new(&base_dir)?;
            tracing::info!("Cleaning generated files...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::ValidateTooltips => {
            let site = docs_toolkit::DocsSite::new(&base_dir)?;
            docs_toolkit::commands::tooltips::run(&site)?;
            println!("All tooltips are properly imported!");
        }

        Commands::Version => {
            println!("docs-toolkit version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

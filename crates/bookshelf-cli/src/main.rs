mod build;
mod query;
mod scrape;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::query::QueryCommands;

#[derive(Debug, Parser)]
#[command(name = "bookshelf")]
#[command(about = "Scrape listing sites and generate the storefront catalog")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape configured sources into intermediate JSON files
    Scrape {
        /// Scrape only the source with this name
        #[arg(long)]
        source: Option<String>,
        /// Directory for `<slug>_data.json` and `scraped_data.json`
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Enrich, curate and write the catalog module from scraped drafts
    Build {
        /// Draft files to merge, in order (defaults to `scraped_data.json`)
        #[arg(long = "input")]
        inputs: Vec<PathBuf>,
        /// Output module path (defaults to `BOOKSHELF_CATALOG_PATH`)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Enrichment seed; overrides `BOOKSHELF_ENRICH_SEED`
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Scrape every source, then build the catalog
    Run {
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Query a generated catalog module
    Query {
        /// Module to read (defaults to `BOOKSHELF_CATALOG_PATH`)
        #[arg(long)]
        catalog: Option<PathBuf>,
        #[command(subcommand)]
        command: QueryCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = bookshelf_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::Scrape { source, out_dir } => {
            let out_dir = out_dir.unwrap_or_else(|| config.output_dir.clone());
            scrape::run_scrape(&config, source.as_deref(), &out_dir).await?;
        }
        Commands::Build { inputs, out, seed } => {
            let drafts = build::load_drafts(&config, &inputs)?;
            let out = out.unwrap_or_else(|| config.catalog_path.clone());
            build::run_build(&config, drafts, &out, seed)?;
        }
        Commands::Run { out, seed } => {
            let drafts = scrape::run_scrape(&config, None, &config.output_dir).await?;
            let out = out.unwrap_or_else(|| config.catalog_path.clone());
            build::run_build(&config, drafts, &out, seed)?;
        }
        Commands::Query { catalog, command } => {
            let catalog = catalog.unwrap_or_else(|| config.catalog_path.clone());
            query::run_query(&catalog, &command)?;
        }
    }

    Ok(())
}

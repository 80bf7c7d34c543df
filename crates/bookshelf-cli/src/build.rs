//! `build` command: drafts to enriched, curated, validated `data.js`.

use std::path::{Path, PathBuf};

use bookshelf_catalog::intermediate::{read_json_array, write_json_array, CATALOG_FILE, SCRAPED_FILE};
use bookshelf_catalog::{
    curate, enrich_all, load_enrichment_tables, write_catalog, ArtifactSummary, Catalog,
    CurationOutcome, EnrichmentTables, SyntheticEnricher,
};
use bookshelf_core::{load_curation, AppConfig, CurationPolicy, ProductDraft};
use chrono::Utc;

/// Reads and concatenates draft files, defaulting to `scraped_data.json` in
/// the configured output directory.
pub(crate) fn load_drafts(
    config: &AppConfig,
    inputs: &[PathBuf],
) -> anyhow::Result<Vec<ProductDraft>> {
    let default_input = [config.output_dir.join(SCRAPED_FILE)];
    let inputs = if inputs.is_empty() {
        &default_input[..]
    } else {
        inputs
    };

    let mut drafts = Vec::new();
    for path in inputs {
        let batch: Vec<ProductDraft> = read_json_array(path)?;
        tracing::info!(path = %path.display(), count = batch.len(), "drafts loaded");
        drafts.extend(batch);
    }
    Ok(drafts)
}

fn load_tables(config: &AppConfig) -> anyhow::Result<EnrichmentTables> {
    match &config.enrichment_path {
        Some(path) => Ok(load_enrichment_tables(path)?),
        None => Ok(EnrichmentTables::default()),
    }
}

fn load_policy(config: &AppConfig) -> anyhow::Result<CurationPolicy> {
    let policy = load_curation(&config.curation_path)?;
    tracing::debug!(path = %config.curation_path.display(), "curation policy loaded");
    Ok(policy)
}

/// Seed precedence: `--seed`, then `BOOKSHELF_ENRICH_SEED`, then random.
pub(crate) fn resolve_seed(flag: Option<u64>, config: &AppConfig) -> u64 {
    flag.or(config.enrich_seed).unwrap_or_else(rand::random)
}

fn print_curation(outcome: &CurationOutcome) {
    println!(
        "curation kept {} products, excluded {}; replaced {} authors and {} publishers",
        outcome.kept.len(),
        outcome.excluded_total(),
        outcome.authors_replaced,
        outcome.publishers_replaced
    );
    for (reason, count) in &outcome.excluded {
        println!("  excluded {reason}: {count}");
    }
}

fn print_artifact(summary: &ArtifactSummary) {
    println!(
        "wrote {} products to {} ({} bytes, sha256 {})",
        summary.products,
        summary.path.display(),
        summary.bytes,
        summary.sha256
    );
}

/// Runs the `build` stage over `drafts` and writes the module to `out`.
///
/// # Errors
///
/// Fails on unreadable tables or policy, on any catalog invariant
/// violation, and on write errors. A violation leaves `out` untouched.
pub(crate) fn run_build(
    config: &AppConfig,
    drafts: Vec<ProductDraft>,
    out: &Path,
    seed: Option<u64>,
) -> anyhow::Result<ArtifactSummary> {
    let tables = load_tables(config)?;
    let policy = load_policy(config)?;
    let seed = resolve_seed(seed, config);
    let reference_date = Utc::now().date_naive();
    tracing::info!(seed, %reference_date, drafts = drafts.len(), "enriching drafts");

    let mut enricher =
        SyntheticEnricher::seeded(seed, tables, reference_date, config.discount_rounding);
    let products = enrich_all(&mut enricher, drafts);

    let outcome = curate(products, &policy);
    print_curation(&outcome);

    let catalog = Catalog::build(outcome.kept, config.discount_rounding)?;
    write_json_array(&config.output_dir.join(CATALOG_FILE), catalog.products())?;

    let summary = write_catalog(out, &catalog)?;
    print_artifact(&summary);
    println!("enrichment seed {seed}");
    Ok(summary)
}

//! `scrape` command: fetch every configured source, grouped by origin.
//!
//! Sources sharing an origin run one after another behind a single
//! [`OriginGate`]; distinct origins run concurrently up to
//! `scraper_max_concurrent_origins`. Results are merged in declaration
//! order regardless of which origin finishes first.

use std::path::Path;
use std::time::{Duration, Instant};

use bookshelf_catalog::intermediate::{source_file_name, write_json_array, SCRAPED_FILE};
use bookshelf_core::{AppConfig, ProductDraft, SourceConfig};
use bookshelf_scraper::{extract_origin, CompiledProfile, HtmlClient, OriginGate, SourceScrape};
use futures::stream::{self, StreamExt};

pub(crate) fn build_html_client(config: &AppConfig) -> anyhow::Result<HtmlClient> {
    HtmlClient::new(
        config.scraper_request_timeout_ms,
        &config.scraper_user_agent,
        &config.scraper_accept_language,
        config.scraper_max_retries,
        config.scraper_retry_backoff_base_ms,
    )
    .map_err(|e| anyhow::anyhow!("failed to build HTML client: {e}"))
}

/// Source indices grouped by listing-URL origin, groups in order of first
/// appearance.
pub(crate) fn group_by_origin(sources: &[SourceConfig]) -> Vec<(String, Vec<usize>)> {
    let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
    for (index, source) in sources.iter().enumerate() {
        let origin = extract_origin(&source.listing_url);
        match groups.iter_mut().find(|(o, _)| *o == origin) {
            Some((_, indices)) => indices.push(index),
            None => groups.push((origin, vec![index])),
        }
    }
    groups
}

/// Longest run budget honoured; larger values are clamped to it.
const MAX_RUN: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Deadline `secs` from now. Never panics, however large `secs` is.
pub(crate) fn run_deadline(secs: u64) -> Instant {
    let now = Instant::now();
    now.checked_add(Duration::from_secs(secs).min(MAX_RUN))
        .unwrap_or(now)
}

/// Keeps only the source named `name`, or all sources when `None`.
pub(crate) fn select_sources(
    sources: Vec<SourceConfig>,
    name: Option<&str>,
) -> anyhow::Result<Vec<SourceConfig>> {
    let Some(name) = name else {
        return Ok(sources);
    };
    let selected: Vec<SourceConfig> = sources.into_iter().filter(|s| s.name == name).collect();
    if selected.is_empty() {
        anyhow::bail!("source '{name}' not found; check config/sources.yaml");
    }
    Ok(selected)
}

/// Scrapes `sources` and returns one result per source, in declaration order.
///
/// # Errors
///
/// Fails before any request if a selector profile does not compile or the
/// client cannot be built. Fetch problems never fail the run.
pub(crate) async fn scrape_sources(
    config: &AppConfig,
    sources: &[SourceConfig],
) -> anyhow::Result<Vec<SourceScrape>> {
    let profiles: Vec<CompiledProfile> = sources
        .iter()
        .map(|s| {
            CompiledProfile::compile(&s.profile)
                .map(|p| p.with_max_per_page(s.max_per_page))
                .map_err(|e| anyhow::anyhow!("source '{}': {e}", s.name))
        })
        .collect::<anyhow::Result<_>>()?;

    let client = build_html_client(config)?;
    let deadline = run_deadline(config.run_timeout_secs);
    let delay = Duration::from_millis(config.scraper_inter_request_delay_ms);
    let max_concurrent = config.scraper_max_concurrent_origins.max(1);

    let groups = group_by_origin(sources);
    tracing::info!(
        sources = sources.len(),
        origins = groups.len(),
        max_concurrent,
        "starting scrape"
    );

    let client = &client;
    let profiles = &profiles;
    let mut tagged: Vec<(usize, SourceScrape)> = stream::iter(groups)
        .map(|(origin, indices)| async move {
            let mut gate = OriginGate::new(&origin, delay);
            let mut results = Vec::with_capacity(indices.len());
            for index in indices {
                let scrape = client
                    .scrape_source(&sources[index], &profiles[index], &mut gate, deadline)
                    .await;
                results.push((index, scrape));
            }
            tracing::debug!(%origin, requests = gate.request_count(), "origin finished");
            results
        })
        .buffer_unordered(max_concurrent)
        .flat_map(stream::iter)
        .collect()
        .await;

    tagged.sort_by_key(|(index, _)| *index);
    Ok(tagged.into_iter().map(|(_, scrape)| scrape).collect())
}

fn print_report(scrape: &SourceScrape) {
    let r = &scrape.report;
    println!(
        "{}: {} drafts from {} pages ({} listings, {} rejected, {} gaps, {} placeholder images, {} page errors){}",
        r.source,
        scrape.drafts.len(),
        r.pages_fetched,
        r.listings,
        r.rejected(),
        r.gaps,
        r.placeholder_images,
        r.page_errors,
        if r.deadline_hit { ", stopped at deadline" } else { "" }
    );
    for (reason, count) in &r.rejections {
        println!("  rejected {reason}: {count}");
    }
}

/// Runs the `scrape` command and returns the merged drafts.
///
/// Writes one `<slug>_data.json` per source and the merged
/// `scraped_data.json` into `out_dir`.
pub(crate) async fn run_scrape(
    config: &AppConfig,
    source_filter: Option<&str>,
    out_dir: &Path,
) -> anyhow::Result<Vec<ProductDraft>> {
    let sources = bookshelf_core::load_sources(&config.sources_path)?.sources;
    let sources = select_sources(sources, source_filter)?;
    if sources.is_empty() {
        println!("no sources configured; nothing to scrape");
        return Ok(Vec::new());
    }

    let scrapes = scrape_sources(config, &sources).await?;

    let mut merged: Vec<ProductDraft> = Vec::new();
    for (source, scrape) in sources.iter().zip(scrapes) {
        print_report(&scrape);
        write_json_array(&out_dir.join(source_file_name(&source.slug())), &scrape.drafts)?;
        merged.extend(scrape.drafts);
    }

    write_json_array(&out_dir.join(SCRAPED_FILE), &merged)?;
    println!(
        "scraped {} drafts from {} sources into {}",
        merged.len(),
        sources.len(),
        out_dir.display()
    );
    Ok(merged)
}

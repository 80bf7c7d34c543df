//! Multi-page scrape loop for one configured source.

use std::collections::BTreeMap;
use std::time::Instant;

use bookshelf_core::{ProductDraft, SourceConfig};

use crate::extract::{extract, CompiledProfile};
use crate::normalize::{normalize_listing, RejectionReason};
use crate::pagination::page_url;
use crate::politeness::OriginGate;

use super::HtmlClient;

/// Per-source counters for the run summary.
#[derive(Debug, Clone, Default)]
pub struct SourceReport {
    pub source: String,
    pub pages_fetched: u32,
    pub page_errors: u32,
    pub listings: usize,
    pub gaps: usize,
    pub rejections: BTreeMap<RejectionReason, usize>,
    pub placeholder_images: usize,
    /// The run deadline passed before every page was visited.
    pub deadline_hit: bool,
}

impl SourceReport {
    #[must_use]
    pub fn rejected(&self) -> usize {
        self.rejections.values().sum()
    }
}

#[derive(Debug)]
pub struct SourceScrape {
    pub drafts: Vec<ProductDraft>,
    pub report: SourceReport,
}

impl HtmlClient {
    /// Scrapes up to `source.max_pages` listing pages for one source.
    ///
    /// `gate` must be the gate of the source's origin; it is awaited before
    /// every request, retries included. A page that fails to fetch is counted and skipped. A
    /// page with no product containers ends pagination. Once `deadline` has
    /// passed, the drafts collected so far are returned.
    ///
    /// Never fails: every problem is recorded on the returned report.
    pub async fn scrape_source(
        &self,
        source: &SourceConfig,
        profile: &CompiledProfile,
        gate: &mut OriginGate,
        deadline: Instant,
    ) -> SourceScrape {
        let mut drafts: Vec<ProductDraft> = Vec::new();
        let mut report = SourceReport {
            source: source.name.clone(),
            ..SourceReport::default()
        };
        let product_cap = source.max_products.unwrap_or(usize::MAX);

        for page in 1..=source.max_pages {
            if drafts.len() >= product_cap {
                break;
            }

            let url = page_url(&source.listing_url, page);

            if Instant::now() >= deadline {
                tracing::warn!(source = %source.name, page, "run deadline reached, stopping source");
                report.deadline_hit = true;
                break;
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            let html = match tokio::time::timeout(remaining, self.fetch_html(&url, gate)).await {
                Err(_) => {
                    tracing::warn!(source = %source.name, page, %url, "run deadline reached mid-fetch");
                    report.deadline_hit = true;
                    break;
                }
                Ok(Err(e)) => {
                    tracing::warn!(source = %source.name, page, %url, error = %e, "page fetch failed, skipping");
                    report.page_errors += 1;
                    continue;
                }
                Ok(Ok(html)) => html,
            };
            report.pages_fetched += 1;

            let extraction = extract(&html, profile, source.category, &source.subcategory);
            if extraction.is_exhausted() {
                tracing::info!(source = %source.name, page, %url, "no products on page, pagination exhausted");
                break;
            }
            report.gaps += extraction.gaps.len();
            report.listings += extraction.listings.len();

            let mut kept = 0usize;
            for raw in extraction.listings {
                match normalize_listing(raw, &source.origin, &source.name) {
                    Ok(draft) => {
                        if draft.image.is_placeholder() {
                            report.placeholder_images += 1;
                        }
                        drafts.push(draft);
                        kept += 1;
                    }
                    Err(rejection) => {
                        tracing::debug!(
                            source = %source.name,
                            reason = %rejection.reason,
                            title = %rejection.title_raw,
                            "listing rejected"
                        );
                        *report.rejections.entry(rejection.reason).or_default() += 1;
                    }
                }
            }

            tracing::info!(
                source = %source.name,
                page,
                %url,
                count = kept,
                gaps = extraction.gaps.len(),
                "page scraped"
            );
        }

        drafts.truncate(product_cap);
        SourceScrape { drafts, report }
    }
}

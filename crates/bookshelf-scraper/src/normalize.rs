//! Normalization from [`RawListing`] to [`ProductDraft`].
//!
//! String cleanup is delegated to [`crate::parse`]; this module decides which
//! listings are usable and fills in the derived fields.

use std::fmt;

use bookshelf_core::{default_original_price, ImageRef, ProductDraft, RawListing};

use crate::parse::{absolutize_url, clean_title, collapse_whitespace, parse_price};

/// Why a listing was dropped during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RejectionReason {
    MissingTitle,
    MissingPrice,
    ZeroPrice,
}

impl RejectionReason {
    /// Stable code used in logs and run summaries.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            RejectionReason::MissingTitle => "missing_title",
            RejectionReason::MissingPrice => "missing_price",
            RejectionReason::ZeroPrice => "zero_price",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A listing the normalizer refused, with the raw title for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub reason: RejectionReason,
    pub title_raw: String,
}

/// Normalizes one scraped listing.
///
/// `origin` is the source's scheme+host, used to absolutize relative image
/// and detail URLs. `source` is the source name recorded on the draft.
///
/// # Errors
///
/// Returns a [`Rejection`] when the cleaned title is empty, the price is
/// missing or unparsable, or the price is zero.
pub fn normalize_listing(
    raw: RawListing,
    origin: &str,
    source: &str,
) -> Result<ProductDraft, Rejection> {
    let reject = |reason: RejectionReason, raw: &RawListing| Rejection {
        reason,
        title_raw: raw.title_raw.clone(),
    };

    let title = clean_title(&raw.title_raw);
    if title.is_empty() {
        return Err(reject(RejectionReason::MissingTitle, &raw));
    }

    let price = match raw.price_raw.as_deref().and_then(parse_price) {
        Some(0) => return Err(reject(RejectionReason::ZeroPrice, &raw)),
        Some(price) => price,
        None => return Err(reject(RejectionReason::MissingPrice, &raw)),
    };

    // A struck-through price below the sale price is a scrape mismatch.
    let original_price = raw
        .original_price_raw
        .as_deref()
        .and_then(parse_price)
        .filter(|original| *original >= price)
        .unwrap_or_else(|| default_original_price(price));

    let image = match raw
        .image_raw
        .as_deref()
        .and_then(|src| absolutize_url(src, origin))
    {
        Some(url) => ImageRef::Remote(url),
        None => {
            tracing::warn!(source, title = %title, "listing has no image, using placeholder");
            ImageRef::Placeholder
        }
    };

    let detail_url = raw
        .detail_url_raw
        .as_deref()
        .and_then(|href| absolutize_url(href, origin));

    Ok(ProductDraft {
        title,
        price,
        original_price,
        category: raw.category,
        subcategory: raw.subcategory,
        image,
        detail_url,
        author: non_empty(raw.author_raw.as_deref()),
        publisher: non_empty(raw.publisher_raw.as_deref()),
        source: source.to_owned(),
    })
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.map(collapse_whitespace).filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;

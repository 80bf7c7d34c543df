pub mod client;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod pagination;
pub mod parse;
pub mod politeness;
mod rate_limit;

pub use client::{extract_origin, HtmlClient, SourceReport, SourceScrape};
pub use error::ScraperError;
pub use extract::{extract, CompiledProfile, Extraction, ExtractionGap, Field};
pub use normalize::{normalize_listing, Rejection, RejectionReason};
pub use politeness::OriginGate;

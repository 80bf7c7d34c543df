use std::path::PathBuf;

use crate::products::DiscountRounding;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

pub const DEFAULT_ACCEPT_LANGUAGE: &str = "vi-VN,vi;q=0.9,en;q=0.8";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub sources_path: PathBuf,
    /// Optional YAML override for the synthetic enrichment tables.
    pub enrichment_path: Option<PathBuf>,
    /// YAML curation policy, applied on every build.
    pub curation_path: PathBuf,
    /// Directory for the intermediate `*_data.json` files.
    pub output_dir: PathBuf,
    /// Generated catalog module, `data.js`.
    pub catalog_path: PathBuf,
    pub scraper_request_timeout_ms: u64,
    pub scraper_user_agent: String,
    pub scraper_accept_language: String,
    pub scraper_inter_request_delay_ms: u64,
    pub scraper_max_retries: u32,
    pub scraper_retry_backoff_base_ms: u64,
    pub scraper_max_concurrent_origins: usize,
    pub run_timeout_secs: u64,
    /// Fixed seed for reproducible enrichment; random when unset.
    pub enrich_seed: Option<u64>,
    pub discount_rounding: DiscountRounding,
}

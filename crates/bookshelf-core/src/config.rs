use std::path::PathBuf;

use crate::app_config::{AppConfig, DEFAULT_ACCEPT_LANGUAGE, DEFAULT_USER_AGENT};
use crate::products::DiscountRounding;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let log_level = or_default("BOOKSHELF_LOG_LEVEL", "info");
    let sources_path = PathBuf::from(or_default(
        "BOOKSHELF_SOURCES_PATH",
        "./config/sources.yaml",
    ));
    let enrichment_path = optional("BOOKSHELF_ENRICHMENT_PATH").map(PathBuf::from);
    let curation_path = PathBuf::from(or_default(
        "BOOKSHELF_CURATION_PATH",
        "./config/curation.yaml",
    ));
    let output_dir = PathBuf::from(or_default("BOOKSHELF_OUTPUT_DIR", "./data"));
    let catalog_path = PathBuf::from(or_default("BOOKSHELF_CATALOG_PATH", "./data.js"));

    let scraper_request_timeout_ms = parse_u64("BOOKSHELF_SCRAPER_REQUEST_TIMEOUT_MS", "10000")?;
    if scraper_request_timeout_ms == 0 {
        return Err(invalid(
            "BOOKSHELF_SCRAPER_REQUEST_TIMEOUT_MS",
            "must be greater than zero".to_string(),
        ));
    }
    let scraper_user_agent = or_default("BOOKSHELF_SCRAPER_USER_AGENT", DEFAULT_USER_AGENT);
    let scraper_accept_language =
        or_default("BOOKSHELF_SCRAPER_ACCEPT_LANGUAGE", DEFAULT_ACCEPT_LANGUAGE);
    let scraper_inter_request_delay_ms =
        parse_u64("BOOKSHELF_SCRAPER_INTER_REQUEST_DELAY_MS", "1000")?;
    let scraper_max_retries = parse_u32("BOOKSHELF_SCRAPER_MAX_RETRIES", "2")?;
    let scraper_retry_backoff_base_ms = parse_u64("BOOKSHELF_SCRAPER_RETRY_BACKOFF_BASE_MS", "500")?;
    let scraper_max_concurrent_origins =
        parse_usize("BOOKSHELF_SCRAPER_MAX_CONCURRENT_ORIGINS", "4")?;
    let run_timeout_secs = parse_u64("BOOKSHELF_RUN_TIMEOUT_SECS", "300")?;

    let enrich_seed = optional("BOOKSHELF_ENRICH_SEED")
        .map(|raw| {
            raw.parse::<u64>()
                .map_err(|e| invalid("BOOKSHELF_ENRICH_SEED", e.to_string()))
        })
        .transpose()?;

    let discount_rounding = or_default("BOOKSHELF_DISCOUNT_ROUNDING", "round")
        .parse::<DiscountRounding>()
        .map_err(|reason| invalid("BOOKSHELF_DISCOUNT_ROUNDING", reason))?;

    Ok(AppConfig {
        log_level,
        sources_path,
        enrichment_path,
        curation_path,
        output_dir,
        catalog_path,
        scraper_request_timeout_ms,
        scraper_user_agent,
        scraper_accept_language,
        scraper_inter_request_delay_ms,
        scraper_max_retries,
        scraper_retry_backoff_base_ms,
        scraper_max_concurrent_origins,
        run_timeout_secs,
        enrich_seed,
        discount_rounding,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

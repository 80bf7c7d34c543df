pub mod app_config;
pub mod category;
pub mod config;
pub mod curation;
pub mod products;
pub mod sources;

pub use app_config::AppConfig;
pub use category::{Category, UnknownCategory};
pub use config::{load_app_config, load_app_config_from_env};
pub use curation::{load_curation, CurationPolicy};
pub use products::{
    compute_discount, default_original_price, CanonicalProduct, DiscountRounding, ImageRef,
    ProductDraft, RawListing, PLACEHOLDER_IMAGE,
};
pub use sources::{load_sources, FieldRule, SelectorProfile, SourceConfig, SourcesFile};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read {path}: {source}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    FileParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("config validation failed: {0}")]
    Validation(String),
}

/// Read a YAML config file into `T`, mapping IO and parse failures onto
/// [`ConfigError`] with the offending path attached.
///
/// # Errors
///
/// Returns [`ConfigError::FileIo`] or [`ConfigError::FileParse`].
pub fn read_yaml_file<T>(path: &std::path::Path) -> Result<T, ConfigError>
where
    T: serde::de::DeserializeOwned,
{
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    serde_yaml::from_str(&content).map_err(|e| ConfigError::FileParse {
        path: path.display().to_string(),
        source: e,
    })
}

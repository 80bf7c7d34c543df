use bookshelf_core::{Category, ConfigError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// A product breaks a whole-catalog rule. Nothing is repaired; the run
    /// must fail.
    #[error("catalog invariant violated by product {id} ({category}): {reason}")]
    InvariantViolation {
        id: u32,
        category: Category,
        reason: String,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error in {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed catalog module: {0}")]
    MalformedModule(String),

    #[error("invalid enrichment tables: {0}")]
    InvalidTables(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl CatalogError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        CatalogError::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        CatalogError::Json {
            context: context.into(),
            source,
        }
    }
}

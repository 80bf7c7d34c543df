//! Data-cleanup policy applied to enriched products before the catalog write.
//!
//! Every rule that used to be an inline string substitution lives here as
//! reviewable configuration. The rules themselves run in
//! `bookshelf_catalog::curate`.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::{read_yaml_file, ConfigError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurationPolicy {
    /// Case-insensitive title substrings; matching products are excluded.
    pub title_denylist: Vec<String>,
    /// Case-insensitive keywords marking promotional or clearance listings.
    pub skip_title_keywords: Vec<String>,
    /// Keep only the first product per case-folded title.
    pub dedupe_titles: bool,
    /// Drop products whose only image is the placeholder.
    pub exclude_placeholder_images: bool,
    /// Exact author value replacements.
    pub author_replacements: BTreeMap<String, String>,
    /// Exact publisher value replacements.
    pub publisher_replacements: BTreeMap<String, String>,
    /// Per-category caps, applied in catalog order.
    pub max_per_category: BTreeMap<Category, usize>,
}

/// Load a curation policy from YAML.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed, or if a
/// replacement maps a value to an empty string.
pub fn load_curation(path: &Path) -> Result<CurationPolicy, ConfigError> {
    let policy: CurationPolicy = read_yaml_file(path)?;

    let empty_target = policy
        .author_replacements
        .iter()
        .chain(policy.publisher_replacements.iter())
        .find(|(_, to)| to.trim().is_empty());
    if let Some((from, _)) = empty_target {
        return Err(ConfigError::Validation(format!(
            "replacement for '{from}' must not be empty"
        )));
    }

    Ok(policy)
}

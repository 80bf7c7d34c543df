//! Declarative per-site scrape configuration loaded from `config/sources.yaml`.
//!
//! Adding a site is a config change: each source names its listing URL, the
//! category it feeds, and a [`SelectorProfile`] of ordered fallback rules per
//! field. The scraper tries the rules in order and the first non-empty match
//! wins.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::{read_yaml_file, ConfigError};

/// One element-selection rule: a CSS selector, plus the attributes to read
/// from the matched element in order. With no attributes the element's text
/// is used.
///
/// In YAML a bare string is shorthand for a text rule:
///
/// ```yaml
/// title:
///   - "h3.product-name"
///   - { selector: "a.image_thumb", attrs: [title] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FieldRuleRepr")]
pub struct FieldRule {
    pub selector: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attrs: Vec<String>,
}

impl FieldRule {
    #[must_use]
    pub fn text(selector: &str) -> Self {
        Self {
            selector: selector.to_string(),
            attrs: Vec::new(),
        }
    }

    #[must_use]
    pub fn attrs(selector: &str, attrs: &[&str]) -> Self {
        Self {
            selector: selector.to_string(),
            attrs: attrs.iter().map(|a| (*a).to_string()).collect(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FieldRuleRepr {
    Selector(String),
    Full {
        selector: String,
        #[serde(default)]
        attrs: Vec<String>,
    },
}

impl From<FieldRuleRepr> for FieldRule {
    fn from(value: FieldRuleRepr) -> Self {
        match value {
            FieldRuleRepr::Selector(selector) => FieldRule {
                selector,
                attrs: Vec::new(),
            },
            FieldRuleRepr::Full { selector, attrs } => FieldRule { selector, attrs },
        }
    }
}

/// Ordered fallback rules for each field of a product container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorProfile {
    /// Container selectors; the first one matching at least one element wins.
    pub container: Vec<String>,
    pub title: Vec<FieldRule>,
    pub price: Vec<FieldRule>,
    #[serde(default)]
    pub original_price: Vec<FieldRule>,
    #[serde(default)]
    pub image: Vec<FieldRule>,
    #[serde(default)]
    pub detail_url: Vec<FieldRule>,
    #[serde(default)]
    pub author: Vec<FieldRule>,
    #[serde(default)]
    pub publisher: Vec<FieldRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    /// Scheme + host used to absolutize `/`-relative URLs, e.g. `https://readstation.vn`.
    pub origin: String,
    /// First listing page; later pages append `?page=N`.
    pub listing_url: String,
    pub category: Category,
    pub subcategory: String,
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
    #[serde(default = "default_max_per_page")]
    pub max_per_page: usize,
    /// Cap on drafts kept from this source, in page order.
    #[serde(default)]
    pub max_products: Option<usize>,
    pub profile: SelectorProfile,
}

fn default_max_pages() -> u32 {
    3
}

fn default_max_per_page() -> usize {
    24
}

impl SourceConfig {
    /// File-name-safe slug derived from the source name.
    #[must_use]
    pub fn slug(&self) -> String {
        self.name
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' {
                    c
                } else if c == ' ' || c == '_' || c == '.' {
                    '-'
                } else {
                    '\0'
                }
            })
            .filter(|&c| c != '\0')
            .collect::<String>()
            .split('-')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    }
}

#[derive(Debug, Deserialize)]
pub struct SourcesFile {
    pub sources: Vec<SourceConfig>,
}

/// Load and validate the source definitions from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_sources(path: &Path) -> Result<SourcesFile, ConfigError> {
    let sources_file: SourcesFile = read_yaml_file(path)?;
    validate_sources(&sources_file)?;
    Ok(sources_file)
}

fn is_absolute_http(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

fn validate_sources(sources_file: &SourcesFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();
    let mut seen_slugs = HashSet::new();

    for source in &sources_file.sources {
        if source.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "source name must be non-empty".to_string(),
            ));
        }

        if !seen_names.insert(source.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate source name: '{}'",
                source.name
            )));
        }

        let slug = source.slug();
        if slug.is_empty() || !seen_slugs.insert(slug.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate or empty source slug: '{}' (from source '{}')",
                slug, source.name
            )));
        }

        if !is_absolute_http(&source.origin) {
            return Err(ConfigError::Validation(format!(
                "source '{}' has non-absolute origin '{}'",
                source.name, source.origin
            )));
        }

        if !is_absolute_http(&source.listing_url) {
            return Err(ConfigError::Validation(format!(
                "source '{}' has non-absolute listing_url '{}'",
                source.name, source.listing_url
            )));
        }

        if source.category.subcategory_name(&source.subcategory).is_none() {
            return Err(ConfigError::Validation(format!(
                "source '{}' uses subcategory '{}' which is not defined for category '{}'",
                source.name, source.subcategory, source.category
            )));
        }

        if source.max_pages == 0 || source.max_per_page == 0 {
            return Err(ConfigError::Validation(format!(
                "source '{}' must allow at least one page and one product per page",
                source.name
            )));
        }

        let profile = &source.profile;
        if profile.container.is_empty() || profile.title.is_empty() || profile.price.is_empty() {
            return Err(ConfigError::Validation(format!(
                "source '{}' profile needs container, title and price rules",
                source.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "sources_test.rs"]
mod tests;

//! Reading and writing the generated `data.js` artifact.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use bookshelf_core::CanonicalProduct;
use sha2::{Digest, Sha256};

use crate::error::CatalogError;
use crate::render::{render_module, DATABASE_MARKER};
use crate::store::Catalog;

/// What [`write_catalog`] produced, for the run summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSummary {
    pub path: PathBuf,
    pub products: usize,
    pub bytes: usize,
    /// Lowercase hex SHA-256 of the module text.
    pub sha256: String,
}

/// Re-reads the product records from a generated module.
///
/// Products come back in id order.
///
/// # Errors
///
/// Returns [`CatalogError::MalformedModule`] if the `BOOK_DATABASE` object
/// is missing, cannot be parsed, or is keyed inconsistently with the ids.
pub fn parse_module(text: &str) -> Result<Vec<CanonicalProduct>, CatalogError> {
    let start = text
        .find(DATABASE_MARKER)
        .ok_or_else(|| CatalogError::MalformedModule("BOOK_DATABASE not found".to_string()))?;
    let rest = &text[start + DATABASE_MARKER.len()..];

    // The object is followed by `;` and the rest of the module, so read a
    // single value off the stream instead of the whole tail.
    let by_id: BTreeMap<u32, CanonicalProduct> = serde_json::Deserializer::from_str(rest)
        .into_iter::<BTreeMap<u32, CanonicalProduct>>()
        .next()
        .ok_or_else(|| CatalogError::MalformedModule("BOOK_DATABASE is empty".to_string()))?
        .map_err(|e| CatalogError::MalformedModule(format!("BOOK_DATABASE: {e}")))?;

    if let Some((key, product)) = by_id.iter().find(|(key, p)| **key != p.id) {
        return Err(CatalogError::MalformedModule(format!(
            "key {key} holds product with id {}",
            product.id
        )));
    }

    Ok(by_id.into_values().collect())
}

/// Reads and parses a module from disk.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] if the file cannot be read, or any error of
/// [`parse_module`].
pub fn read_catalog(path: &Path) -> Result<Vec<CanonicalProduct>, CatalogError> {
    let text = fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
    parse_module(&text)
}

/// Renders `catalog` and replaces `path` atomically: the module is written
/// to a sibling temporary file that is then renamed over the target.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] on any filesystem failure, or a render error.
pub fn write_catalog(path: &Path, catalog: &Catalog) -> Result<ArtifactSummary, CatalogError> {
    let text = render_module(catalog)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| CatalogError::io(parent, e))?;
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, text.as_bytes()).map_err(|e| CatalogError::io(&tmp_path, e))?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(CatalogError::io(path, e));
    }

    let summary = ArtifactSummary {
        path: path.to_path_buf(),
        products: catalog.len(),
        bytes: text.len(),
        sha256: format!("{:x}", Sha256::digest(text.as_bytes())),
    };
    tracing::info!(
        path = %summary.path.display(),
        products = summary.products,
        bytes = summary.bytes,
        sha256 = %summary.sha256,
        "catalog written"
    );
    Ok(summary)
}

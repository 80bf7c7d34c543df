//! Intermediate JSON files between pipeline stages.
//!
//! Each is a pretty-printed JSON array (two-space indent, UTF-8, non-ASCII
//! kept) so a scrape can be inspected or hand-corrected before a build.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::CatalogError;

/// Merged drafts from every source.
pub const SCRAPED_FILE: &str = "scraped_data.json";
/// Final enriched products, mirroring the module contents.
pub const CATALOG_FILE: &str = "catalog.json";

/// File name for one source's drafts, `<slug>_data.json`.
#[must_use]
pub fn source_file_name(slug: &str) -> String {
    format!("{slug}_data.json")
}

/// Writes `records` as a pretty JSON array, creating parent directories.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] or [`CatalogError::Json`].
pub fn write_json_array<T: Serialize>(path: &Path, records: &[T]) -> Result<(), CatalogError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| CatalogError::io(parent, e))?;
    }
    let mut text = serde_json::to_string_pretty(records)
        .map_err(|e| CatalogError::json(path.display().to_string(), e))?;
    text.push('\n');
    fs::write(path, text).map_err(|e| CatalogError::io(path, e))?;
    tracing::debug!(path = %path.display(), count = records.len(), "intermediate file written");
    Ok(())
}

/// Reads a JSON array written by [`write_json_array`].
///
/// # Errors
///
/// Returns [`CatalogError::Io`] or [`CatalogError::Json`].
pub fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, CatalogError> {
    let text = fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
    serde_json::from_str(&text).map_err(|e| CatalogError::json(path.display().to_string(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookshelf_core::{Category, ImageRef, ProductDraft};

    #[test]
    fn drafts_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(source_file_name("netabooks-comics"));
        let drafts = vec![ProductDraft {
            title: "Thám Tử Lừng Danh Conan".to_owned(),
            price: 25_000,
            original_price: 30_000,
            category: Category::Comics,
            subcategory: "manga".to_owned(),
            image: ImageRef::Placeholder,
            detail_url: Some("https://www.netabooks.vn/conan".to_owned()),
            author: None,
            publisher: None,
            source: "netabooks-comics".to_owned(),
        }];

        write_json_array(&path, &drafts).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("Thám Tử Lừng Danh Conan"));
        assert!(text.starts_with("[\n  {"));

        let back: Vec<ProductDraft> = read_json_array(&path).unwrap();
        assert_eq!(back, drafts);
    }

    #[test]
    fn read_missing_file_is_io_error() {
        let err = read_json_array::<ProductDraft>(Path::new("/nonexistent/x.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}

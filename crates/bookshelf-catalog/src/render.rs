//! Renders a [`Catalog`] as the storefront's `data.js` module.
//!
//! The module is regenerated whole on every build and never edited in
//! place. All data is emitted through `serde_json`, so strings are escaped
//! correctly and the output is byte-identical for identical input.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use bookshelf_core::{CanonicalProduct, Category};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::CatalogError;
use crate::store::Catalog;

/// Marker preceding the product object; [`crate::artifact::parse_module`]
/// reads from here.
pub const DATABASE_MARKER: &str = "const BOOK_DATABASE = ";

const HEADER: &str = "\
// ========== BOOKSHELF DATABASE ========== //
// Generated by `bookshelf build`. Do not edit by hand; regenerate instead.
";

const QUERY_CLASS: &str = r"// ========== BOOK DATABASE CLASS ========== //
class BookDatabase {
    static getAllBooks() {
        return Object.values(BOOK_DATABASE);
    }

    static getBookById(id) {
        return BOOK_DATABASE[parseInt(id)];
    }

    static getBooksByCategory(category) {
        return Object.values(BOOK_DATABASE).filter(book => book.category === category);
    }

    static getBooksBySubcategory(category, subcategory) {
        return Object.values(BOOK_DATABASE).filter(book =>
            book.category === category && book.subcategory === subcategory
        );
    }

    static getFeaturedBooks() {
        return Object.values(BOOK_DATABASE).filter(book => book.featured);
    }

    static getNewReleases() {
        return Object.values(BOOK_DATABASE).filter(book => book.newRelease);
    }

    static searchBooks(query) {
        const lowerQuery = query.toLowerCase();
        return Object.values(BOOK_DATABASE).filter(book =>
            book.title.toLowerCase().includes(lowerQuery) ||
            book.author.toLowerCase().includes(lowerQuery) ||
            book.tags.some(tag => tag.toLowerCase().includes(lowerQuery))
        );
    }

    static getRelatedBooks(bookId, limit = 4) {
        const book = BookDatabase.getBookById(bookId);
        if (!book) return [];
        return Object.values(BOOK_DATABASE)
            .filter(b => b.category === book.category && b.id !== book.id)
            .slice(0, limit);
    }

    static getCategoryName(category) {
        return CATEGORIES[category] || category;
    }

    static getSubcategoryName(category, subcategory) {
        const names = SUBCATEGORIES[category];
        return (names && names[subcategory]) || subcategory;
    }
}

// Export for Node.js
if (typeof module !== 'undefined' && module.exports) {
    module.exports = { BOOK_DATABASE, CATEGORIES, SUBCATEGORIES, BookDatabase };
}

// Make available globally
if (typeof window !== 'undefined') {
    window.BOOK_DATABASE = BOOK_DATABASE;
    window.CATEGORIES = CATEGORIES;
    window.SUBCATEGORIES = SUBCATEGORIES;
    window.BookDatabase = BookDatabase;
}
";

/// Pretty JSON with a four-space indent, non-ASCII left as is.
fn to_js_json<T: Serialize>(value: &T, context: &str) -> Result<String, CatalogError> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value
        .serialize(&mut ser)
        .map_err(|e| CatalogError::json(context, e))?;
    String::from_utf8(buf).map_err(|e| CatalogError::MalformedModule(e.to_string()))
}

/// Ordered `{code: name}` object literal body lines, indented by `indent`.
fn object_literal(entries: &[(&str, &str)], indent: &str) -> Result<String, CatalogError> {
    let mut out = String::from("{\n");
    for (i, (code, name)) in entries.iter().enumerate() {
        let key = serde_json::to_string(code).map_err(|e| CatalogError::json("table key", e))?;
        let value =
            serde_json::to_string(name).map_err(|e| CatalogError::json("table value", e))?;
        let comma = if i + 1 < entries.len() { "," } else { "" };
        let _ = writeln!(out, "{indent}    {key}: {value}{comma}");
    }
    out.push_str(indent);
    out.push('}');
    Ok(out)
}

fn categories_table() -> Result<String, CatalogError> {
    let entries: Vec<(&str, &str)> = Category::ALL
        .iter()
        .map(|c| (c.code(), c.display_name()))
        .collect();
    object_literal(&entries, "")
}

fn subcategories_table() -> Result<String, CatalogError> {
    let mut out = String::from("{\n");
    for (i, category) in Category::ALL.iter().enumerate() {
        let key = serde_json::to_string(category.code())
            .map_err(|e| CatalogError::json("category key", e))?;
        let body = object_literal(category.subcategories(), "    ")?;
        let comma = if i + 1 < Category::ALL.len() { "," } else { "" };
        let _ = writeln!(out, "    {key}: {body}{comma}");
    }
    out.push('}');
    Ok(out)
}

/// Renders the complete `data.js` module text.
///
/// # Errors
///
/// Returns [`CatalogError::Json`] if a product cannot be serialized.
pub fn render_module(catalog: &Catalog) -> Result<String, CatalogError> {
    let by_id: BTreeMap<u32, &CanonicalProduct> =
        catalog.products().iter().map(|p| (p.id, p)).collect();
    let database = to_js_json(&by_id, "BOOK_DATABASE")?;

    let mut out = String::with_capacity(database.len() + QUERY_CLASS.len() + 4096);
    out.push_str(HEADER);
    out.push('\n');
    let _ = writeln!(out, "{DATABASE_MARKER}{database};");
    out.push('\n');
    out.push_str("// ========== CATEGORIES ========== //\n");
    let _ = writeln!(out, "const CATEGORIES = {};", categories_table()?);
    out.push('\n');
    out.push_str("// ========== SUBCATEGORIES ========== //\n");
    let _ = writeln!(out, "const SUBCATEGORIES = {};", subcategories_table()?);
    out.push('\n');
    out.push_str(QUERY_CLASS);
    Ok(out)
}

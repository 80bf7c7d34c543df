use std::path::Path;

use super::*;

fn profile() -> SelectorProfile {
    SelectorProfile {
        container: vec!["div.item_product_main".to_string()],
        title: vec![FieldRule::text("h3.product-name")],
        price: vec![FieldRule::text("span.price")],
        original_price: vec![],
        image: vec![FieldRule::attrs("img", &["data-src", "src"])],
        detail_url: vec![FieldRule::attrs("a", &["href"])],
        author: vec![],
        publisher: vec![],
    }
}

fn source(name: &str) -> SourceConfig {
    SourceConfig {
        name: name.to_string(),
        origin: "https://readstation.vn".to_string(),
        listing_url: "https://readstation.vn/sach-tieng-viet".to_string(),
        category: Category::Vietnamese,
        subcategory: "literature".to_string(),
        max_pages: 3,
        max_per_page: 12,
        max_products: None,
        profile: profile(),
    }
}

#[test]
fn slug_simple_name() {
    assert_eq!(source("ReadStation Vietnamese").slug(), "readstation-vietnamese");
}

#[test]
fn slug_collapses_separators() {
    assert_eq!(source("tiNi  Store__toys").slug(), "tini-store-toys");
}

#[test]
fn slug_strips_non_ascii() {
    assert_eq!(source("Thế Giới VPP").slug(), "th-gii-vpp");
}

#[test]
fn validate_accepts_valid_sources() {
    let file = SourcesFile {
        sources: vec![source("readstation-vietnamese"), source("readstation-foreign")],
    };
    assert!(validate_sources(&file).is_ok());
}

#[test]
fn validate_rejects_empty_name() {
    let file = SourcesFile {
        sources: vec![source("  ")],
    };
    let err = validate_sources(&file).unwrap_err();
    assert!(err.to_string().contains("non-empty"));
}

#[test]
fn validate_rejects_duplicate_name() {
    let file = SourcesFile {
        sources: vec![source("NetaBooks"), source("netabooks")],
    };
    let err = validate_sources(&file).unwrap_err();
    assert!(err.to_string().contains("duplicate source name"));
}

#[test]
fn validate_rejects_relative_listing_url() {
    let mut s = source("readstation");
    s.listing_url = "/sach-tieng-viet".to_string();
    let err = validate_sources(&SourcesFile { sources: vec![s] }).unwrap_err();
    assert!(err.to_string().contains("non-absolute listing_url"));
}

#[test]
fn validate_rejects_unknown_subcategory() {
    let mut s = source("readstation");
    s.subcategory = "dolls".to_string();
    let err = validate_sources(&SourcesFile { sources: vec![s] }).unwrap_err();
    assert!(err.to_string().contains("subcategory 'dolls'"));
}

#[test]
fn validate_rejects_profile_without_price_rules() {
    let mut s = source("readstation");
    s.profile.price.clear();
    let err = validate_sources(&SourcesFile { sources: vec![s] }).unwrap_err();
    assert!(err.to_string().contains("container, title and price"));
}

#[test]
fn field_rule_accepts_string_shorthand_and_full_form() {
    let yaml = r#"
- "h3.product-name"
- { selector: "a.image_thumb", attrs: [title] }
"#;
    let rules: Vec<FieldRule> = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(rules[0], FieldRule::text("h3.product-name"));
    assert_eq!(rules[1], FieldRule::attrs("a.image_thumb", &["title"]));
}

#[test]
fn source_defaults_apply_when_omitted() {
    let yaml = r#"
name: netabooks-comics
origin: https://www.netabooks.vn
listing_url: https://www.netabooks.vn/truyen-tranh-manga-comic
category: comics
subcategory: comic-books
profile:
  container: ["div.box-product-category"]
  title: ["div.name-product"]
  price: ["div.price"]
"#;
    let s: SourceConfig = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(s.max_pages, 3);
    assert_eq!(s.max_per_page, 24);
    assert!(s.max_products.is_none());
    assert!(s.profile.image.is_empty());
}

#[test]
fn load_sources_reports_missing_file() {
    let err = load_sources(Path::new("/nonexistent/sources.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::FileIo { .. }));
}

#[test]
fn shipped_sources_file_is_valid() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/sources.yaml");
    let file = load_sources(&path).expect("config/sources.yaml should load");
    assert!(!file.sources.is_empty());
}

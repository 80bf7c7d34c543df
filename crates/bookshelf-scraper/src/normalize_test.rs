use bookshelf_core::{Category, PLACEHOLDER_IMAGE};

use super::*;

const ORIGIN: &str = "https://readstation.vn";

fn make_raw(title: &str, price: Option<&str>) -> RawListing {
    RawListing {
        title_raw: title.to_owned(),
        price_raw: price.map(str::to_owned),
        original_price_raw: None,
        image_raw: Some("/media/product/de-men.jpg".to_owned()),
        detail_url_raw: Some("/de-men-phieu-luu-ky".to_owned()),
        author_raw: None,
        publisher_raw: None,
        category: Category::Vietnamese,
        subcategory: "literature".to_owned(),
    }
}

#[test]
fn normalize_cleans_title_and_price() {
    let draft =
        normalize_listing(make_raw("Dế Mèn Phiêu Lưu Ký 60k", Some("60.000₫")), ORIGIN, "rs")
            .unwrap();
    assert_eq!(draft.title, "Dế Mèn Phiêu Lưu Ký");
    assert_eq!(draft.price, 60_000);
    assert_eq!(draft.original_price, 72_000);
    assert_eq!(draft.category, Category::Vietnamese);
    assert_eq!(draft.subcategory, "literature");
    assert_eq!(draft.source, "rs");
}

#[test]
fn normalize_absolutizes_image_and_detail_url() {
    let draft = normalize_listing(make_raw("Nhà Giả Kim", Some("79.000đ")), ORIGIN, "rs").unwrap();
    assert_eq!(
        draft.image,
        ImageRef::Remote("https://readstation.vn/media/product/de-men.jpg".to_owned())
    );
    assert_eq!(
        draft.detail_url.as_deref(),
        Some("https://readstation.vn/de-men-phieu-luu-ky")
    );
}

#[test]
fn normalize_missing_image_uses_placeholder() {
    let mut raw = make_raw("Nhà Giả Kim", Some("79.000đ"));
    raw.image_raw = None;
    let draft = normalize_listing(raw, ORIGIN, "rs").unwrap();
    assert!(draft.image.is_placeholder());
    assert_eq!(draft.image.as_str(), PLACEHOLDER_IMAGE);
}

#[test]
fn normalize_uses_scraped_original_price_when_higher() {
    let mut raw = make_raw("Sapiens", Some("199.000đ"));
    raw.original_price_raw = Some("250.000đ".to_owned());
    let draft = normalize_listing(raw, ORIGIN, "rs").unwrap();
    assert_eq!(draft.original_price, 250_000);
}

#[test]
fn normalize_ignores_scraped_original_price_below_price() {
    let mut raw = make_raw("Sapiens", Some("200.000đ"));
    raw.original_price_raw = Some("150.000đ".to_owned());
    let draft = normalize_listing(raw, ORIGIN, "rs").unwrap();
    assert_eq!(draft.original_price, 240_000);
}

#[test]
fn normalize_keeps_scraped_author_and_publisher() {
    let mut raw = make_raw("Đất Rừng Phương Nam", Some("95.000đ"));
    raw.author_raw = Some("  Đoàn   Giỏi ".to_owned());
    raw.publisher_raw = Some("   ".to_owned());
    let draft = normalize_listing(raw, ORIGIN, "rs").unwrap();
    assert_eq!(draft.author.as_deref(), Some("Đoàn Giỏi"));
    assert!(draft.publisher.is_none());
}

#[test]
fn normalize_rejects_missing_title() {
    let err = normalize_listing(make_raw("  ", Some("60.000đ")), ORIGIN, "rs").unwrap_err();
    assert_eq!(err.reason, RejectionReason::MissingTitle);
    assert_eq!(err.reason.code(), "missing_title");
}

#[test]
fn normalize_rejects_missing_price() {
    let err = normalize_listing(make_raw("Nhà Giả Kim", None), ORIGIN, "rs").unwrap_err();
    assert_eq!(err.reason, RejectionReason::MissingPrice);

    let err = normalize_listing(make_raw("Nhà Giả Kim", Some("Liên hệ")), ORIGIN, "rs")
        .unwrap_err();
    assert_eq!(err.reason.code(), "missing_price");
    assert_eq!(err.title_raw, "Nhà Giả Kim");
}

#[test]
fn normalize_rejects_zero_price() {
    let err = normalize_listing(make_raw("Quà tặng", Some("0đ")), ORIGIN, "rs").unwrap_err();
    assert_eq!(err.reason, RejectionReason::ZeroPrice);
    assert_eq!(err.reason.to_string(), "zero_price");
}

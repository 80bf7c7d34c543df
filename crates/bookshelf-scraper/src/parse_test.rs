use super::*;

// -----------------------------------------------------------------------
// parse_price
// -----------------------------------------------------------------------

#[test]
fn price_dot_thousands_separator() {
    assert_eq!(parse_price("60.000₫"), Some(60_000));
    assert_eq!(parse_price("1.250.000 đ"), Some(1_250_000));
}

#[test]
fn price_comma_thousands_separator() {
    assert_eq!(parse_price("60,000đ"), Some(60_000));
    assert_eq!(parse_price("1,250,000"), Some(1_250_000));
}

#[test]
fn price_mixed_separators_drop_fraction() {
    assert_eq!(parse_price("1,250.50"), Some(1250));
}

#[test]
fn price_with_surrounding_text() {
    assert_eq!(parse_price("Giá: 89.000 VNĐ"), Some(89_000));
}

#[test]
fn price_without_digits_is_none() {
    assert_eq!(parse_price("Liên hệ"), None);
    assert_eq!(parse_price(""), None);
    assert_eq!(parse_price(".,"), None);
}

#[test]
fn price_zero_parses_as_zero() {
    assert_eq!(parse_price("0đ"), Some(0));
}

#[test]
fn price_overflow_is_none() {
    assert_eq!(parse_price("99999999999999999999999"), None);
}

// -----------------------------------------------------------------------
// clean_title
// -----------------------------------------------------------------------

#[test]
fn title_strips_k_suffix() {
    assert_eq!(clean_title("Nexus 325k"), "Nexus");
    assert_eq!(clean_title("Dế Mèn Phiêu Lưu Ký 60k"), "Dế Mèn Phiêu Lưu Ký");
    assert_eq!(clean_title("Sapiens 199K "), "Sapiens");
}

#[test]
fn title_strips_decimal_k_suffix() {
    assert_eq!(clean_title("Atomic Habits 1.5k"), "Atomic Habits");
}

#[test]
fn title_strips_dong_suffix() {
    assert_eq!(clean_title("Bút bi Thiên Long 5.000đ"), "Bút bi Thiên Long");
    assert_eq!(clean_title("Lego City 1,299,000 ₫"), "Lego City");
}

#[test]
fn title_strips_bare_trailing_number() {
    assert_eq!(clean_title("Tuổi Trẻ Đáng Giá Bao Nhiêu 89"), "Tuổi Trẻ Đáng Giá Bao Nhiêu");
}

#[test]
fn title_keeps_inner_numbers() {
    assert_eq!(clean_title("Conan Tập 100 - Gosho"), "Conan Tập 100 - Gosho");
    assert_eq!(clean_title("1984"), "1984");
}

#[test]
fn title_collapses_whitespace() {
    assert_eq!(
        clean_title("  Nhà   Giả\u{a0}Kim \n 79k "),
        "Nhà Giả Kim"
    );
}

#[test]
fn title_of_only_price_is_empty() {
    assert_eq!(clean_title("   "), "");
}

// -----------------------------------------------------------------------
// absolutize_url
// -----------------------------------------------------------------------

#[test]
fn url_protocol_relative_gets_https() {
    assert_eq!(
        absolutize_url("//cdn.readstation.vn/img/a.jpg", "https://readstation.vn").as_deref(),
        Some("https://cdn.readstation.vn/img/a.jpg")
    );
}

#[test]
fn url_root_relative_gets_origin() {
    assert_eq!(
        absolutize_url("/images/a.jpg", "https://www.netabooks.vn/").as_deref(),
        Some("https://www.netabooks.vn/images/a.jpg")
    );
}

#[test]
fn url_absolute_is_unchanged() {
    assert_eq!(
        absolutize_url("https://cdn.tiki.vn/a.jpg", "https://readstation.vn").as_deref(),
        Some("https://cdn.tiki.vn/a.jpg")
    );
}

#[test]
fn url_empty_or_data_uri_is_none() {
    assert!(absolutize_url("  ", "https://readstation.vn").is_none());
    assert!(absolutize_url("data:image/gif;base64,R0lGOD", "https://readstation.vn").is_none());
}

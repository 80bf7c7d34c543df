//! Low-level string cleanup for scraped listing fields.
//!
//! See [`crate::normalize`] for how these compose into a [`ProductDraft`].
//!
//! [`ProductDraft`]: bookshelf_core::ProductDraft

use std::sync::LazyLock;

use regex::Regex;

/// Trailing price fragments sellers paste into titles, tried in order.
/// Each is anchored at the end of the title.
static TITLE_PRICE_SUFFIXES: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        Regex::new(r"(?i)\s+\d+[.,]\d+\s*k\s*$").expect("valid decimal-k regex"),
        Regex::new(r"(?i)\s+\d+\s*k\s*$").expect("valid k regex"),
        Regex::new(r"\s+\d+(?:[.,]\d+)*\s*[đ₫]\s*$").expect("valid dong regex"),
        Regex::new(r"\s+\d+\s*$").expect("valid bare number regex"),
    ]
});

/// Collapses runs of whitespace (including non-breaking spaces) to a single
/// space and trims both ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parses a Vietnamese-formatted price such as `"60.000₫"` or `"1,250,000 đ"`.
///
/// Keeps only digits, `.` and `,`. A value with dots and no commas uses the
/// dots as thousands separators, so they are removed; otherwise commas are
/// removed. Whatever follows a remaining `.` is a fractional part and is
/// dropped.
///
/// Returns `None` when no digits survive or the value overflows `u64`.
#[must_use]
pub fn parse_price(text: &str) -> Option<u64> {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();

    let cleaned = if kept.contains('.') && !kept.contains(',') {
        kept.replace('.', "")
    } else {
        kept.replace(',', "")
    };

    let integer_part = cleaned.split('.').next().unwrap_or_default();
    if integer_part.is_empty() {
        return None;
    }
    integer_part.parse::<u64>().ok()
}

/// Strips trailing price fragments (`"325k"`, `"3.5k"`, `"60.000đ"`, a bare
/// trailing number) from a listing title and collapses whitespace.
///
/// Returns an empty string when nothing but price text was present.
#[must_use]
pub fn clean_title(raw: &str) -> String {
    let mut title = collapse_whitespace(raw);
    for re in TITLE_PRICE_SUFFIXES.iter() {
        if let std::borrow::Cow::Owned(stripped) = re.replace(&title, "") {
            title = stripped;
        }
    }
    collapse_whitespace(&title)
}

/// Turns a scraped `src`/`href` value into an absolute URL.
///
/// - `//cdn...` becomes `https://cdn...`
/// - `/path` is joined onto `origin`
/// - anything else is returned unchanged
///
/// Empty values and inline `data:` URIs yield `None`.
#[must_use]
pub fn absolutize_url(raw: &str, origin: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || raw.starts_with("data:") {
        return None;
    }
    if let Some(rest) = raw.strip_prefix("//") {
        return Some(format!("https://{rest}"));
    }
    if raw.starts_with('/') {
        return Some(format!("{}{raw}", origin.trim_end_matches('/')));
    }
    Some(raw.to_owned())
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;

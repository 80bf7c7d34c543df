//! `?page=N` pagination for listing pages.
//!
//! The sites in `config/sources.yaml` serve page 1 at the bare listing URL
//! and later pages with a `page` query parameter:
//!
//! ```text
//! https://readstation.vn/sach-tieng-viet
//! https://readstation.vn/sach-tieng-viet?page=2
//! ```
//!
//! An existing `page` parameter is replaced, other query parameters are kept.

/// Builds the URL for `page` (1-based) of a listing.
///
/// Page 1 (and 0, treated as 1) returns `listing_url` unchanged. If
/// `listing_url` cannot be parsed the parameter is appended textually.
#[must_use]
pub fn page_url(listing_url: &str, page: u32) -> String {
    if page <= 1 {
        return listing_url.to_owned();
    }

    match reqwest::Url::parse(listing_url) {
        Ok(mut url) => {
            let kept: Vec<(String, String)> = url
                .query_pairs()
                .filter(|(k, _)| k != "page")
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();
            {
                let mut pairs = url.query_pairs_mut();
                pairs.clear();
                for (k, v) in &kept {
                    pairs.append_pair(k, v);
                }
                pairs.append_pair("page", &page.to_string());
            }
            url.to_string()
        }
        Err(_) => {
            let sep = if listing_url.contains('?') { '&' } else { '?' };
            format!("{listing_url}{sep}page={page}")
        }
    }
}

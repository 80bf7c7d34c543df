//! URL origin and domain extraction utilities for the HTML client.

/// Extracts the scheme+host origin from a listing URL.
///
/// Given `"https://readstation.vn/sach-tieng-viet?page=2"`, returns
/// `"https://readstation.vn"`. Sources that share an origin also share a
/// politeness gate, so this is the grouping key for a run.
#[must_use]
pub fn extract_origin(url: &str) -> String {
    reqwest::Url::parse(url).map_or_else(
        |e| {
            tracing::warn!(
                url,
                error = %e,
                "could not parse URL, falling back to string split for origin extraction; check config/sources.yaml"
            );
            url.trim_end_matches('/')
                .splitn(4, '/')
                .take(3)
                .collect::<Vec<_>>()
                .join("/")
        },
        |u| u.origin().ascii_serialization(),
    )
}

/// Extracts the hostname from a URL for use in error messages.
///
/// Falls back to the full URL string if parsing fails.
pub(crate) fn extract_domain(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| url.to_owned())
}

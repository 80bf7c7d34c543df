use serde::{Deserialize, Serialize};

use crate::category::Category;

/// Literal image path the front end renders when a listing had no usable image.
pub const PLACEHOLDER_IMAGE: &str = "images/placeholder.jpg";

/// One product container as found on a listing page, before any cleanup.
///
/// `category` and `subcategory` come from the source configuration that drove
/// the scrape, never from the markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawListing {
    /// Title text; may still carry a price fragment like `"Nexus 325k"`.
    pub title_raw: String,
    /// Locale-formatted price text, e.g. `"325.000₫"`.
    pub price_raw: Option<String>,
    /// Struck-through list price, when the source shows one.
    pub original_price_raw: Option<String>,
    /// Relative or absolute image URL.
    pub image_raw: Option<String>,
    pub detail_url_raw: Option<String>,
    pub author_raw: Option<String>,
    pub publisher_raw: Option<String>,
    pub category: Category,
    pub subcategory: String,
}

/// Image reference carried through the pipeline.
///
/// `Placeholder` is the explicit "no real image" marker. It serializes as
/// [`PLACEHOLDER_IMAGE`] so the generated catalog keeps rendering, but code
/// inspecting a draft can always tell it apart from a scraped URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ImageRef {
    Remote(String),
    Placeholder,
}

impl ImageRef {
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, ImageRef::Placeholder)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            ImageRef::Remote(url) => url,
            ImageRef::Placeholder => PLACEHOLDER_IMAGE,
        }
    }
}

impl From<String> for ImageRef {
    fn from(value: String) -> Self {
        if value.is_empty() || value == PLACEHOLDER_IMAGE {
            ImageRef::Placeholder
        } else {
            ImageRef::Remote(value)
        }
    }
}

impl From<ImageRef> for String {
    fn from(value: ImageRef) -> Self {
        match value {
            ImageRef::Remote(url) => url,
            ImageRef::Placeholder => PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

/// A listing that passed normalization: typed price, clean title, absolute URLs.
///
/// Drafts are what the per-source intermediate JSON files hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub title: String,
    /// Price in đồng (the smallest unit in practice).
    pub price: u64,
    pub original_price: u64,
    pub category: Category,
    pub subcategory: String,
    pub image: ImageRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    /// Name of the configured source that produced this draft.
    #[serde(default)]
    pub source: String,
}

/// The unit stored in the generated catalog.
///
/// Field names serialize in camelCase to match what the front-end scripts read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalProduct {
    /// Assigned by the catalog writer; anything set earlier is overwritten.
    pub id: u32,
    pub title: String,
    pub author: String,
    pub publisher: String,
    /// ISO `YYYY-MM-DD`.
    pub publish_date: String,
    pub category: Category,
    pub subcategory: String,
    pub price: u64,
    pub original_price: u64,
    /// Percentage off `original_price`, see [`compute_discount`].
    pub discount: u32,
    /// Synthetic `978-NNN-NNNNN-N`; no checksum.
    pub isbn: String,
    pub pages: u32,
    pub language: String,
    pub format: String,
    pub weight: String,
    pub dimensions: String,
    pub stock: u32,
    pub rating: f64,
    pub review_count: u32,
    pub images: Vec<String>,
    pub description: String,
    pub tags: Vec<String>,
    pub featured: bool,
    pub new_release: bool,
}

impl CanonicalProduct {
    /// `true` when the first image is a scraped URL rather than the placeholder.
    #[must_use]
    pub fn has_real_image(&self) -> bool {
        self.images
            .first()
            .is_some_and(|img| img != PLACEHOLDER_IMAGE)
    }
}

/// How a fractional discount percentage becomes an integer.
///
/// The old scripts disagreed (`int()` in some, `round()` in others); the
/// catalog picks one explicitly through configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountRounding {
    /// Nearest integer, halves rounded up.
    #[default]
    Round,
    /// Drop the fraction.
    Truncate,
}

impl std::str::FromStr for DiscountRounding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "round" => Ok(DiscountRounding::Round),
            "truncate" => Ok(DiscountRounding::Truncate),
            other => Err(format!(
                "unknown discount rounding \"{other}\"; expected \"round\" or \"truncate\""
            )),
        }
    }
}

/// Discount percentage `(1 - price / original_price) * 100`, in integer math.
///
/// Returns `0` when `original_price` is zero or not above `price`.
#[must_use]
pub fn compute_discount(price: u64, original_price: u64, rounding: DiscountRounding) -> u32 {
    if original_price == 0 || price >= original_price {
        return 0;
    }
    let saved = u128::from(original_price - price) * 100;
    let original = u128::from(original_price);
    let pct = match rounding {
        DiscountRounding::Round => (saved * 2 + original) / (original * 2),
        DiscountRounding::Truncate => saved / original,
    };
    u32::try_from(pct).unwrap_or(100)
}

/// Default list price when the source shows none: a fixed 20% markup,
/// `round(price * 1.2)`.
///
/// This is a modeling assumption, not scraped data.
#[must_use]
pub fn default_original_price(price: u64) -> u64 {
    price.saturating_mul(12).saturating_add(5) / 10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_original_price_adds_twenty_percent() {
        assert_eq!(default_original_price(100_000), 120_000);
        assert_eq!(default_original_price(60_000), 72_000);
    }

    #[test]
    fn default_original_price_rounds_half_up() {
        // 7 * 1.2 = 8.4, 8 * 1.2 = 9.6
        assert_eq!(default_original_price(7), 8);
        assert_eq!(default_original_price(8), 10);
    }

    #[test]
    fn discount_twenty_percent() {
        assert_eq!(compute_discount(80_000, 100_000, DiscountRounding::Round), 20);
        assert_eq!(
            compute_discount(80_000, 100_000, DiscountRounding::Truncate),
            20
        );
    }

    #[test]
    fn discount_rounding_modes_differ_on_fractions() {
        // 1 - 60000/72000 = 16.67%
        assert_eq!(compute_discount(60_000, 72_000, DiscountRounding::Round), 17);
        assert_eq!(
            compute_discount(60_000, 72_000, DiscountRounding::Truncate),
            16
        );
    }

    #[test]
    fn discount_is_zero_without_markup() {
        assert_eq!(compute_discount(50_000, 50_000, DiscountRounding::Round), 0);
        assert_eq!(compute_discount(50_000, 0, DiscountRounding::Round), 0);
    }

    #[test]
    fn image_ref_placeholder_round_trips_as_literal_path() {
        let json = serde_json::to_string(&ImageRef::Placeholder).unwrap();
        assert_eq!(json, format!("\"{PLACEHOLDER_IMAGE}\""));
        let parsed: ImageRef = serde_json::from_str(&json).unwrap();
        assert!(parsed.is_placeholder());
    }

    #[test]
    fn image_ref_remote_keeps_url() {
        let parsed: ImageRef = serde_json::from_str("\"https://cdn.example.vn/a.jpg\"").unwrap();
        assert_eq!(
            parsed,
            ImageRef::Remote("https://cdn.example.vn/a.jpg".to_string())
        );
    }

    #[test]
    fn draft_serializes_camel_case_and_skips_absent_fields() {
        let draft = ProductDraft {
            title: "Dế Mèn Phiêu Lưu Ký".to_string(),
            price: 60_000,
            original_price: 72_000,
            category: Category::Vietnamese,
            subcategory: "literature".to_string(),
            image: ImageRef::Placeholder,
            detail_url: None,
            author: None,
            publisher: None,
            source: "readstation-vietnamese".to_string(),
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["originalPrice"], 72_000);
        assert!(value.get("detailUrl").is_none());
        assert_eq!(value["image"], PLACEHOLDER_IMAGE);
    }
}

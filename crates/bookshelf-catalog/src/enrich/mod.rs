//! Enrichment from [`ProductDraft`] to [`CanonicalProduct`].
//!
//! The listing sites expose little beyond title, price and image, so the
//! remaining catalog fields are filled in by an [`Enricher`]. The only
//! implementation today is [`SyntheticEnricher`], which generates placeholder
//! values from [`EnrichmentTables`]. Its output is synthetic data, not
//! supplier metadata.

mod tables;

use bookshelf_core::{compute_discount, CanonicalProduct, DiscountRounding, ProductDraft};
use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

pub use tables::{
    load_enrichment_tables, CategoryTable, DimensionRanges, EnrichmentTables, Range, RatingRange,
    RATING_BOUNDS,
};

/// Fills in every catalog field a draft does not carry.
pub trait Enricher {
    /// `id_hint` is a provisional id; the catalog store renumbers products.
    fn enrich(&mut self, draft: ProductDraft, id_hint: u32) -> CanonicalProduct;
}

/// Generates placeholder metadata by uniform sampling from per-category
/// tables.
///
/// Deterministic for a fixed RNG seed and reference date.
pub struct SyntheticEnricher<R: Rng> {
    rng: R,
    tables: EnrichmentTables,
    reference_date: NaiveDate,
    rounding: DiscountRounding,
}

impl<R: Rng> SyntheticEnricher<R> {
    pub fn new(
        rng: R,
        tables: EnrichmentTables,
        reference_date: NaiveDate,
        rounding: DiscountRounding,
    ) -> Self {
        Self {
            rng,
            tables,
            reference_date,
            rounding,
        }
    }

    fn pick(&mut self, pool: &[String]) -> Option<String> {
        pool.choose(&mut self.rng).cloned()
    }

    fn author_for(&mut self, draft: &ProductDraft) -> String {
        if let Some(author) = &draft.author {
            return author.clone();
        }
        let category = draft.category;
        if category.requires_author() {
            if let Some(author) = author_from_title(&draft.title) {
                return author;
            }
        }
        let pool = self.tables.table(category).authors.clone();
        self.pick(&pool).unwrap_or_default()
    }
}

impl SyntheticEnricher<StdRng> {
    /// Enricher backed by a seeded [`StdRng`].
    #[must_use]
    pub fn seeded(
        seed: u64,
        tables: EnrichmentTables,
        reference_date: NaiveDate,
        rounding: DiscountRounding,
    ) -> Self {
        Self::new(
            StdRng::seed_from_u64(seed),
            tables,
            reference_date,
            rounding,
        )
    }
}

/// Author from a `"Title - Author"` listing title, if present.
fn author_from_title(title: &str) -> Option<String> {
    let (_, author) = title.rsplit_once(" - ")?;
    let author = author.trim();
    (!author.is_empty()).then(|| author.to_owned())
}

impl<R: Rng> Enricher for SyntheticEnricher<R> {
    fn enrich(&mut self, draft: ProductDraft, id_hint: u32) -> CanonicalProduct {
        let author = self.author_for(&draft);
        let table = self.tables.table(draft.category).clone();

        let publisher = match &draft.publisher {
            Some(p) => p.clone(),
            None => self.pick(&table.publishers).unwrap_or_default(),
        };

        let age = self.tables.publish_age_days.sample(&mut self.rng);
        let publish_date = self
            .reference_date
            .checked_sub_days(Days::new(u64::from(age)))
            .unwrap_or(self.reference_date)
            .format("%Y-%m-%d")
            .to_string();

        let isbn = format!(
            "978-{}-{}-{}",
            self.rng.random_range(100..=999),
            self.rng.random_range(10_000..=99_999),
            self.rng.random_range(0..=9)
        );

        let pages = table.pages.sample(&mut self.rng);
        let weight = format!("{}g", table.weight_grams.sample(&mut self.rng));
        let dimensions = format!(
            "{} x {} x {} cm",
            table.dimensions_cm.length.sample(&mut self.rng),
            table.dimensions_cm.width.sample(&mut self.rng),
            table.dimensions_cm.height.sample(&mut self.rng)
        );
        let stock = table.stock.sample(&mut self.rng);
        let rating = table.rating.sample(&mut self.rng);
        let review_count = table.review_count.sample(&mut self.rng);
        let featured = self.rng.random_bool(0.5);
        let new_release = self.rng.random_bool(0.5);

        let discount = compute_discount(draft.price, draft.original_price, self.rounding);
        let description = table.description.replace("{title}", &draft.title);

        CanonicalProduct {
            id: id_hint,
            title: draft.title,
            author,
            publisher,
            publish_date,
            category: draft.category,
            subcategory: draft.subcategory,
            price: draft.price,
            original_price: draft.original_price,
            discount,
            isbn,
            pages,
            language: table.language,
            format: table.format,
            weight,
            dimensions,
            stock,
            rating,
            review_count,
            images: vec![draft.image.as_str().to_owned()],
            description,
            tags: table.tags,
            featured,
            new_release,
        }
    }
}

/// Enriches `drafts` in order with provisional ids `1..=N`.
pub fn enrich_all<E: Enricher + ?Sized>(
    enricher: &mut E,
    drafts: Vec<ProductDraft>,
) -> Vec<CanonicalProduct> {
    drafts
        .into_iter()
        .zip(1u32..)
        .map(|(draft, id)| enricher.enrich(draft, id))
        .collect()
}

#[cfg(test)]
#[path = "../enrich_test.rs"]
mod tests;

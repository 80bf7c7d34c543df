//! The validated in-memory catalog.
//!
//! [`Catalog::build`] is the only way to obtain a [`Catalog`], so every
//! catalog that reaches the renderer has dense ids and satisfies the
//! whole-catalog invariants.

use std::collections::HashSet;

use bookshelf_core::{compute_discount, CanonicalProduct, DiscountRounding};

use crate::enrich::RATING_BOUNDS;
use crate::error::CatalogError;

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    products: Vec<CanonicalProduct>,
}

impl Catalog {
    /// Assigns ids `1..=N` in input order, ignoring incoming ids, then
    /// validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvariantViolation`] for the first product
    /// that breaks a rule. Nothing is repaired.
    pub fn build(
        mut products: Vec<CanonicalProduct>,
        rounding: DiscountRounding,
    ) -> Result<Self, CatalogError> {
        for (product, id) in products.iter_mut().zip(1u32..) {
            product.id = id;
        }
        validate(&products, rounding)?;
        Ok(Self { products })
    }

    #[must_use]
    pub fn products(&self) -> &[CanonicalProduct] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    #[must_use]
    pub fn into_products(self) -> Vec<CanonicalProduct> {
        self.products
    }
}

/// Checks every whole-catalog invariant.
///
/// - ids are unique and form the dense range `1..=N`
/// - subcategory codes belong to the product's category
/// - titles are non-empty, and book categories have an author
/// - `originalPrice >= price` and `discount` matches the formula
/// - ratings lie in [`RATING_BOUNDS`] with one decimal
/// - every product has at least one image
///
/// # Errors
///
/// Returns [`CatalogError::InvariantViolation`] naming the first offender.
pub fn validate(
    products: &[CanonicalProduct],
    rounding: DiscountRounding,
) -> Result<(), CatalogError> {
    let mut seen_ids = HashSet::with_capacity(products.len());
    let total = products.len();

    for p in products {
        let violation = |reason: String| CatalogError::InvariantViolation {
            id: p.id,
            category: p.category,
            reason,
        };

        if !seen_ids.insert(p.id) {
            return Err(violation("duplicate id".to_string()));
        }
        if p.id == 0 || usize::try_from(p.id).map_or(true, |id| id > total) {
            return Err(violation(format!("id outside dense range 1..={total}")));
        }
        if p.title.trim().is_empty() {
            return Err(violation("empty title".to_string()));
        }
        if p.category.subcategory_name(&p.subcategory).is_none() {
            return Err(violation(format!(
                "unknown subcategory \"{}\"",
                p.subcategory
            )));
        }
        if p.category.requires_author() && p.author.trim().is_empty() {
            return Err(violation("book category requires an author".to_string()));
        }
        if p.original_price < p.price {
            return Err(violation(format!(
                "originalPrice {} below price {}",
                p.original_price, p.price
            )));
        }
        let expected = compute_discount(p.price, p.original_price, rounding);
        if p.discount != expected {
            return Err(violation(format!(
                "discount {} does not match computed {expected}",
                p.discount
            )));
        }
        let (lo, hi) = RATING_BOUNDS;
        let one_decimal = ((p.rating * 10.0).round() - p.rating * 10.0).abs() < 1e-9;
        if !(lo..=hi).contains(&p.rating) || !one_decimal {
            return Err(violation(format!(
                "rating {} outside [{lo}, {hi}] or not one decimal",
                p.rating
            )));
        }
        if p.images.is_empty() {
            return Err(violation("no images".to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

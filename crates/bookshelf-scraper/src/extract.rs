//! Declarative listing extraction.
//!
//! A [`SelectorProfile`] from `config/sources.yaml` is compiled once into a
//! [`CompiledProfile`]; [`extract`] then applies it to each fetched page.
//! Extraction never fails a page: containers without a title are dropped and
//! missing fields are reported as [`ExtractionGap`]s.

use std::fmt;

use bookshelf_core::{Category, FieldRule, RawListing, SelectorProfile};
use scraper::{ElementRef, Html, Selector};

use crate::error::ScraperError;
use crate::parse::collapse_whitespace;

/// A listing field a profile can declare rules for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Container,
    Title,
    Price,
    OriginalPrice,
    Image,
    DetailUrl,
    Author,
    Publisher,
}

impl Field {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Container => "container",
            Field::Title => "title",
            Field::Price => "price",
            Field::OriginalPrice => "original_price",
            Field::Image => "image",
            Field::DetailUrl => "detail_url",
            Field::Author => "author",
            Field::Publisher => "publisher",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field the profile declares that a container did not yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionGap {
    pub container_index: usize,
    pub field: Field,
}

/// Result of applying a profile to one page.
#[derive(Debug, Default)]
pub struct Extraction {
    pub listings: Vec<RawListing>,
    pub gaps: Vec<ExtractionGap>,
    /// Containers matched on the page, before the per-page cap.
    pub container_count: usize,
}

impl Extraction {
    /// No container matched, which callers read as the end of pagination.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.container_count == 0
    }
}

#[derive(Debug)]
struct CompiledRule {
    /// `None` targets the container element itself.
    selector: Option<Selector>,
    attrs: Vec<String>,
}

#[derive(Debug)]
pub struct CompiledProfile {
    containers: Vec<Selector>,
    title: Vec<CompiledRule>,
    price: Vec<CompiledRule>,
    original_price: Vec<CompiledRule>,
    image: Vec<CompiledRule>,
    detail_url: Vec<CompiledRule>,
    author: Vec<CompiledRule>,
    publisher: Vec<CompiledRule>,
    max_per_page: Option<usize>,
}

fn parse_selector(field: Field, selector: &str) -> Result<Selector, ScraperError> {
    Selector::parse(selector).map_err(|e| ScraperError::InvalidSelector {
        field: field.as_str(),
        selector: selector.to_owned(),
        reason: e.to_string(),
    })
}

fn compile_rules(field: Field, rules: &[FieldRule]) -> Result<Vec<CompiledRule>, ScraperError> {
    rules
        .iter()
        .map(|rule| {
            let selector = if rule.selector.trim().is_empty() {
                None
            } else {
                Some(parse_selector(field, &rule.selector)?)
            };
            Ok(CompiledRule {
                selector,
                attrs: rule.attrs.clone(),
            })
        })
        .collect()
}

impl CompiledProfile {
    /// Parses every selector in `profile` up front.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] naming the first field whose
    /// selector does not parse.
    pub fn compile(profile: &SelectorProfile) -> Result<Self, ScraperError> {
        let containers = profile
            .container
            .iter()
            .map(|s| parse_selector(Field::Container, s))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            containers,
            title: compile_rules(Field::Title, &profile.title)?,
            price: compile_rules(Field::Price, &profile.price)?,
            original_price: compile_rules(Field::OriginalPrice, &profile.original_price)?,
            image: compile_rules(Field::Image, &profile.image)?,
            detail_url: compile_rules(Field::DetailUrl, &profile.detail_url)?,
            author: compile_rules(Field::Author, &profile.author)?,
            publisher: compile_rules(Field::Publisher, &profile.publisher)?,
            max_per_page: None,
        })
    }

    /// Caps the number of containers read from each page.
    #[must_use]
    pub fn with_max_per_page(mut self, max_per_page: usize) -> Self {
        self.max_per_page = Some(max_per_page);
        self
    }
}

/// Text content of `el` with whitespace collapsed.
fn element_text(el: ElementRef<'_>) -> String {
    collapse_whitespace(&el.text().collect::<String>())
}

/// Content of one element for a rule: the first non-empty listed attribute,
/// or the element text when the rule lists none.
fn rule_content(el: ElementRef<'_>, rule: &CompiledRule) -> Option<String> {
    if rule.attrs.is_empty() {
        let text = element_text(el);
        return (!text.is_empty()).then_some(text);
    }
    rule.attrs.iter().find_map(|attr| {
        el.value()
            .attr(attr)
            .map(str::trim)
            // Lazy-load placeholders are inline data URIs.
            .filter(|v| !v.is_empty() && !v.starts_with("data:"))
            .map(str::to_owned)
    })
}

/// Applies `rules` in order inside `container`; the first rule that yields
/// non-empty content wins.
fn first_match(container: ElementRef<'_>, rules: &[CompiledRule]) -> Option<String> {
    rules.iter().find_map(|rule| match &rule.selector {
        None => rule_content(container, rule),
        Some(selector) => container
            .select(selector)
            .find_map(|el| rule_content(el, rule)),
    })
}

/// Extracts raw listings from one page of HTML.
///
/// The first container selector matching at least one element is used.
/// `category` and `subcategory` come from the source configuration and are
/// stamped on every listing.
#[must_use]
pub fn extract(
    html: &str,
    profile: &CompiledProfile,
    category: Category,
    subcategory: &str,
) -> Extraction {
    let document = Html::parse_document(html);

    let containers: Vec<ElementRef<'_>> = profile
        .containers
        .iter()
        .map(|selector| document.select(selector).collect::<Vec<_>>())
        .find(|matched| !matched.is_empty())
        .unwrap_or_default();

    let mut extraction = Extraction {
        container_count: containers.len(),
        ..Extraction::default()
    };
    let limit = profile.max_per_page.unwrap_or(usize::MAX);

    for (container_index, container) in containers.into_iter().take(limit).enumerate() {
        let mut optional = |field: Field, rules: &[CompiledRule]| -> Option<String> {
            let value = first_match(container, rules);
            if value.is_none() && !rules.is_empty() {
                extraction.gaps.push(ExtractionGap {
                    container_index,
                    field,
                });
            }
            value
        };

        let Some(title_raw) = optional(Field::Title, &profile.title) else {
            continue;
        };
        let price_raw = optional(Field::Price, &profile.price);
        let original_price_raw = optional(Field::OriginalPrice, &profile.original_price);
        let image_raw = optional(Field::Image, &profile.image);
        let detail_url_raw = optional(Field::DetailUrl, &profile.detail_url);
        let author_raw = optional(Field::Author, &profile.author);
        let publisher_raw = optional(Field::Publisher, &profile.publisher);

        extraction.listings.push(RawListing {
            title_raw,
            price_raw,
            original_price_raw,
            image_raw,
            detail_url_raw,
            author_raw,
            publisher_raw,
            category,
            subcategory: subcategory.to_owned(),
        });
    }

    extraction
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;

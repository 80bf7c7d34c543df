//! Applies a [`CurationPolicy`] to enriched products.
//!
//! Rules run in a fixed order: title denylist, promotional keywords, title
//! dedupe, author/publisher replacements, placeholder-image exclusion and
//! finally per-category caps. Replacements run before the catalog is
//! validated so replaced names never reach the artifact.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use bookshelf_core::{CanonicalProduct, Category, CurationPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExclusionReason {
    Denylisted,
    PromotionalKeyword,
    DuplicateTitle,
    PlaceholderImage,
    CategoryCap,
}

impl ExclusionReason {
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            ExclusionReason::Denylisted => "denylisted",
            ExclusionReason::PromotionalKeyword => "promotional_keyword",
            ExclusionReason::DuplicateTitle => "duplicate_title",
            ExclusionReason::PlaceholderImage => "placeholder_image",
            ExclusionReason::CategoryCap => "category_cap",
        }
    }
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Default)]
pub struct CurationOutcome {
    pub kept: Vec<CanonicalProduct>,
    pub excluded: BTreeMap<ExclusionReason, usize>,
    pub authors_replaced: usize,
    pub publishers_replaced: usize,
}

impl CurationOutcome {
    #[must_use]
    pub fn excluded_total(&self) -> usize {
        self.excluded.values().sum()
    }
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles
        .iter()
        .any(|n| !n.is_empty() && haystack.contains(&n.to_lowercase()))
}

/// Runs every rule of `policy` over `products`, keeping input order.
#[must_use]
pub fn curate(products: Vec<CanonicalProduct>, policy: &CurationPolicy) -> CurationOutcome {
    let mut outcome = CurationOutcome::default();
    let mut seen_titles: HashSet<String> = HashSet::new();
    let mut per_category: BTreeMap<Category, usize> = BTreeMap::new();

    for mut product in products {
        let folded = product.title.to_lowercase();

        let reason = if contains_any(&folded, &policy.title_denylist) {
            Some(ExclusionReason::Denylisted)
        } else if contains_any(&folded, &policy.skip_title_keywords) {
            Some(ExclusionReason::PromotionalKeyword)
        } else if policy.dedupe_titles && seen_titles.contains(&folded) {
            Some(ExclusionReason::DuplicateTitle)
        } else {
            None
        };

        if let Some(reason) = reason {
            tracing::debug!(title = %product.title, %reason, "product excluded");
            *outcome.excluded.entry(reason).or_default() += 1;
            continue;
        }

        if let Some(replacement) = policy.author_replacements.get(&product.author) {
            product.author.clone_from(replacement);
            outcome.authors_replaced += 1;
        }
        if let Some(replacement) = policy.publisher_replacements.get(&product.publisher) {
            product.publisher.clone_from(replacement);
            outcome.publishers_replaced += 1;
        }

        if policy.exclude_placeholder_images && !product.has_real_image() {
            *outcome
                .excluded
                .entry(ExclusionReason::PlaceholderImage)
                .or_default() += 1;
            continue;
        }

        if let Some(cap) = policy.max_per_category.get(&product.category) {
            let count = per_category.entry(product.category).or_default();
            if *count >= *cap {
                *outcome.excluded.entry(ExclusionReason::CategoryCap).or_default() += 1;
                continue;
            }
            *count += 1;
        }

        // Only kept listings claim a title, so a later copy can stand in.
        if policy.dedupe_titles {
            seen_titles.insert(folded);
        }
        outcome.kept.push(product);
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookshelf_core::PLACEHOLDER_IMAGE;

    fn product(title: &str, category: Category) -> CanonicalProduct {
        CanonicalProduct {
            id: 0,
            title: title.to_owned(),
            author: "Tô Hoài".to_owned(),
            publisher: "NXB Kim Đồng".to_owned(),
            publish_date: "2024-01-01".to_owned(),
            category,
            subcategory: category.subcategories()[0].0.to_owned(),
            price: 60_000,
            original_price: 72_000,
            discount: 17,
            isbn: "978-123-45678-9".to_owned(),
            pages: 200,
            language: "Tiếng Việt".to_owned(),
            format: "Bìa mềm".to_owned(),
            weight: "300g".to_owned(),
            dimensions: "20 x 14 x 2 cm".to_owned(),
            stock: 10,
            rating: 4.5,
            review_count: 20,
            images: vec!["https://cdn.example.vn/a.jpg".to_owned()],
            description: String::new(),
            tags: Vec::new(),
            featured: false,
            new_release: false,
        }
    }

    fn titles(outcome: &CurationOutcome) -> Vec<&str> {
        outcome.kept.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn empty_policy_keeps_everything() {
        let products = vec![
            product("A", Category::Vietnamese),
            product("A", Category::Vietnamese),
        ];
        let outcome = curate(products, &CurationPolicy::default());
        assert_eq!(outcome.kept.len(), 2);
        assert_eq!(outcome.excluded_total(), 0);
    }

    #[test]
    fn denylist_matches_case_insensitive_substring() {
        let policy = CurationPolicy {
            title_denylist: vec!["English Collocations in news".to_owned()],
            ..CurationPolicy::default()
        };
        let outcome = curate(
            vec![
                product("ENGLISH COLLOCATIONS IN NEWS - Vol 2", Category::Foreign),
                product("Sapiens", Category::Foreign),
            ],
            &policy,
        );
        assert_eq!(titles(&outcome), vec!["Sapiens"]);
        assert_eq!(outcome.excluded.get(&ExclusionReason::Denylisted), Some(&1));
    }

    #[test]
    fn promotional_keywords_exclude_listings() {
        let policy = CurationPolicy {
            skip_title_keywords: vec!["thanh lý".to_owned(), "giá 1k".to_owned()],
            ..CurationPolicy::default()
        };
        let outcome = curate(
            vec![
                product("Bút bi THANH LÝ", Category::OfficeSupplies),
                product("Tẩy Giá 1K", Category::OfficeSupplies),
                product("Thước kẻ", Category::OfficeSupplies),
            ],
            &policy,
        );
        assert_eq!(titles(&outcome), vec!["Thước kẻ"]);
        assert_eq!(
            outcome.excluded.get(&ExclusionReason::PromotionalKeyword),
            Some(&2)
        );
    }

    #[test]
    fn dedupe_keeps_first_occurrence() {
        let policy = CurationPolicy {
            dedupe_titles: true,
            ..CurationPolicy::default()
        };
        let mut second = product("nhà giả kim", Category::Foreign);
        second.price = 1;
        let outcome = curate(
            vec![product("Nhà Giả Kim", Category::Foreign), second],
            &policy,
        );
        assert_eq!(outcome.kept.len(), 1);
        assert_eq!(outcome.kept[0].price, 60_000);
        assert_eq!(
            outcome.excluded.get(&ExclusionReason::DuplicateTitle),
            Some(&1)
        );
    }

    #[test]
    fn replacements_are_exact_matches() {
        let mut policy = CurationPolicy::default();
        policy
            .author_replacements
            .insert("Hồ Chí Minh".to_owned(), "Nguyễn Văn An".to_owned());
        policy
            .publisher_replacements
            .insert("NXB Chính Trị Quốc Gia".to_owned(), "NXB Thế Giới".to_owned());

        let mut replaced = product("Nhật ký trong tù", Category::Vietnamese);
        replaced.author = "Hồ Chí Minh".to_owned();
        replaced.publisher = "NXB Chính Trị Quocs".to_owned();
        let mut untouched = product("Tuyển tập", Category::Vietnamese);
        untouched.author = "Hồ Chí Minh và đồng đội".to_owned();
        untouched.publisher = "NXB Chính Trị Quốc Gia".to_owned();

        let outcome = curate(vec![replaced, untouched], &policy);
        assert_eq!(outcome.kept[0].author, "Nguyễn Văn An");
        assert_eq!(outcome.kept[0].publisher, "NXB Chính Trị Quocs");
        assert_eq!(outcome.kept[1].author, "Hồ Chí Minh và đồng đội");
        assert_eq!(outcome.kept[1].publisher, "NXB Thế Giới");
        assert_eq!(outcome.authors_replaced, 1);
        assert_eq!(outcome.publishers_replaced, 1);
    }

    #[test]
    fn placeholder_images_excluded_when_enabled() {
        let policy = CurationPolicy {
            exclude_placeholder_images: true,
            ..CurationPolicy::default()
        };
        let mut placeholder = product("Không ảnh", Category::Toys);
        placeholder.images = vec![PLACEHOLDER_IMAGE.to_owned()];
        let outcome = curate(vec![placeholder, product("Có ảnh", Category::Toys)], &policy);
        assert_eq!(titles(&outcome), vec!["Có ảnh"]);
        assert_eq!(
            outcome.excluded.get(&ExclusionReason::PlaceholderImage),
            Some(&1)
        );
    }

    #[test]
    fn dropped_copy_does_not_shadow_a_later_duplicate() {
        let policy = CurationPolicy {
            dedupe_titles: true,
            exclude_placeholder_images: true,
            ..CurationPolicy::default()
        };
        let mut no_image = product("Dế Mèn", Category::Vietnamese);
        no_image.images = vec![PLACEHOLDER_IMAGE.to_owned()];
        let mut with_image = product("Dế Mèn", Category::Vietnamese);
        with_image.price = 55_000;

        let outcome = curate(vec![no_image, with_image], &policy);
        assert_eq!(titles(&outcome), vec!["Dế Mèn"]);
        assert_eq!(outcome.kept[0].price, 55_000);
        assert_eq!(
            outcome.excluded.get(&ExclusionReason::PlaceholderImage),
            Some(&1)
        );
        assert!(!outcome.excluded.contains_key(&ExclusionReason::DuplicateTitle));
    }

    #[test]
    fn category_cap_keeps_source_order() {
        let mut policy = CurationPolicy::default();
        policy.max_per_category.insert(Category::OfficeSupplies, 2);
        let outcome = curate(
            vec![
                product("Bút 1", Category::OfficeSupplies),
                product("Sách", Category::Vietnamese),
                product("Bút 2", Category::OfficeSupplies),
                product("Bút 3", Category::OfficeSupplies),
            ],
            &policy,
        );
        assert_eq!(titles(&outcome), vec!["Bút 1", "Sách", "Bút 2"]);
        assert_eq!(outcome.excluded.get(&ExclusionReason::CategoryCap), Some(&1));
    }
}

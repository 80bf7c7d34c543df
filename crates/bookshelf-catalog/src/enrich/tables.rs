//! Per-category lookup tables for synthetic enrichment.
//!
//! The defaults reproduce the placeholder data the storefront has always
//! shipped with. A YAML file can override any category wholesale:
//!
//! ```yaml
//! toys:
//!   authors: []
//!   publishers: ["LEGO Group"]
//!   ...
//! ```

use std::path::Path;

use bookshelf_core::{read_yaml_file, Category};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Lowest and highest rating the catalog accepts.
pub const RATING_BOUNDS: (f64, f64) = (3.5, 5.0);

/// Inclusive integer range sampled uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub min: u32,
    pub max: u32,
}

impl Range {
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> u32 {
        rng.random_range(self.min..=self.max)
    }

    #[must_use]
    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Inclusive rating range; samples are rounded to one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingRange {
    pub min: f64,
    pub max: f64,
}

impl RatingRange {
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        let raw: f64 = rng.random_range(self.min..=self.max);
        ((raw * 10.0).round() / 10.0).clamp(self.min, self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionRanges {
    pub length: Range,
    pub width: Range,
    pub height: Range,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTable {
    pub authors: Vec<String>,
    pub publishers: Vec<String>,
    pub pages: Range,
    pub weight_grams: Range,
    pub dimensions_cm: DimensionRanges,
    pub stock: Range,
    pub review_count: Range,
    pub rating: RatingRange,
    pub language: String,
    pub format: String,
    /// Description template; `{title}` is replaced with the product title.
    pub description: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EnrichmentTables {
    /// Publish dates fall this many days before the reference date.
    pub publish_age_days: Range,
    pub vietnamese: CategoryTable,
    pub foreign: CategoryTable,
    pub office_supplies: CategoryTable,
    pub comics: CategoryTable,
    pub toys: CategoryTable,
}

impl EnrichmentTables {
    #[must_use]
    pub fn table(&self, category: Category) -> &CategoryTable {
        match category {
            Category::Vietnamese => &self.vietnamese,
            Category::Foreign => &self.foreign,
            Category::OfficeSupplies => &self.office_supplies,
            Category::Comics => &self.comics,
            Category::Toys => &self.toys,
        }
    }

    /// Checks every range is ordered, ratings stay inside
    /// [`RATING_BOUNDS`], and pools the enricher draws from are non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidTables`] describing the first problem.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let invalid = |category: Category, what: &str| {
            CatalogError::InvalidTables(format!("{category}: {what}"))
        };

        if self.publish_age_days.min > self.publish_age_days.max {
            return Err(CatalogError::InvalidTables(
                "publish-age-days: min exceeds max".to_string(),
            ));
        }

        for category in Category::ALL {
            let t = self.table(category);
            let ranges = [
                ("pages", t.pages),
                ("weight_grams", t.weight_grams),
                ("dimensions_cm.length", t.dimensions_cm.length),
                ("dimensions_cm.width", t.dimensions_cm.width),
                ("dimensions_cm.height", t.dimensions_cm.height),
                ("stock", t.stock),
                ("review_count", t.review_count),
            ];
            if let Some((name, _)) = ranges.iter().find(|(_, r)| r.min > r.max) {
                return Err(invalid(category, &format!("{name}: min exceeds max")));
            }

            let (lo, hi) = RATING_BOUNDS;
            if !(t.rating.min >= lo && t.rating.max <= hi && t.rating.min <= t.rating.max) {
                return Err(invalid(
                    category,
                    &format!("rating must lie within [{lo}, {hi}]"),
                ));
            }
            if t.publishers.is_empty() {
                return Err(invalid(category, "publisher pool is empty"));
            }
            if category.requires_author() && t.authors.is_empty() {
                return Err(invalid(category, "author pool is empty"));
            }
        }
        Ok(())
    }
}

/// Load enrichment tables from YAML; categories absent from the file keep
/// their defaults.
///
/// # Errors
///
/// Returns [`CatalogError::Config`] if the file cannot be read or parsed and
/// [`CatalogError::InvalidTables`] if it fails validation.
pub fn load_enrichment_tables(path: &Path) -> Result<EnrichmentTables, CatalogError> {
    let tables: EnrichmentTables = read_yaml_file(path)?;
    tables.validate()?;
    Ok(tables)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

const BOOK_DIMENSIONS: DimensionRanges = DimensionRanges {
    length: Range::new(20, 25),
    width: Range::new(14, 18),
    height: Range::new(2, 5),
};

const BOOK_TAGS: &[&str] = &["sách", "đọc sách", "tri thức", "giáo dục", "phát triển bản thân"];

const BOOK_DESCRIPTION: &str = "Cuốn sách {title} là một tác phẩm hay với nội dung sâu sắc và ý nghĩa. Phù hợp cho mọi lứa tuổi yêu thích đọc sách.";

const DEFAULT_RATING: RatingRange = RatingRange { min: 4.0, max: 5.0 };

impl Default for EnrichmentTables {
    fn default() -> Self {
        Self {
            publish_age_days: Range::new(30, 1095),
            vietnamese: CategoryTable {
                authors: strings(&[
                    "Nguyễn Nhật Ánh",
                    "Tô Hoài",
                    "Nam Cao",
                    "Nguyễn Tuân",
                    "Nguyễn Ngọc Tư",
                    "Nguyễn Du",
                    "Xuân Diệu",
                    "Tố Hữu",
                    "Ngô Tất Tố",
                ]),
                publishers: strings(&[
                    "NXB Trẻ",
                    "NXB Kim Đồng",
                    "NXB Văn Học",
                    "NXB Hội Nhà Văn",
                    "NXB Thế Giới",
                    "NXB Dân Trí",
                    "NXB Phụ Nữ",
                    "NXB Lao Động",
                ]),
                pages: Range::new(200, 500),
                weight_grams: Range::new(300, 800),
                dimensions_cm: BOOK_DIMENSIONS,
                stock: Range::new(5, 100),
                review_count: Range::new(10, 500),
                rating: DEFAULT_RATING,
                language: "Tiếng Việt".to_string(),
                format: "Bìa mềm".to_string(),
                description: BOOK_DESCRIPTION.to_string(),
                tags: strings(BOOK_TAGS),
            },
            foreign: CategoryTable {
                authors: strings(&[
                    "Yuval Noah Harari",
                    "Stephen King",
                    "J.K. Rowling",
                    "George R.R. Martin",
                    "Dan Brown",
                    "Agatha Christie",
                    "Ernest Hemingway",
                    "Mark Twain",
                ]),
                publishers: strings(&[
                    "Random House",
                    "Penguin Books",
                    "HarperCollins",
                    "Simon & Schuster",
                    "Macmillan",
                    "Hachette",
                    "Scholastic",
                    "Oxford University Press",
                ]),
                pages: Range::new(200, 500),
                weight_grams: Range::new(300, 800),
                dimensions_cm: BOOK_DIMENSIONS,
                stock: Range::new(5, 100),
                review_count: Range::new(10, 500),
                rating: DEFAULT_RATING,
                language: "English".to_string(),
                format: "Bìa mềm".to_string(),
                description: BOOK_DESCRIPTION.to_string(),
                tags: strings(BOOK_TAGS),
            },
            office_supplies: CategoryTable {
                authors: strings(&[
                    "Thiên Long",
                    "Bitex",
                    "Double A",
                    "Casio",
                    "Plus",
                    "Munchkin",
                    "Richell",
                    "Safety 1st",
                ]),
                publishers: strings(&[
                    "Thiên Long Corp.",
                    "Bitex Stationery",
                    "Double A Vietnam",
                    "Casio Vietnam",
                    "Plus Stationery",
                    "Munchkin Inc.",
                    "Richell Vietnam",
                    "Safety 1st Inc.",
                ]),
                pages: Range::new(200, 500),
                weight_grams: Range::new(300, 800),
                dimensions_cm: BOOK_DIMENSIONS,
                stock: Range::new(5, 100),
                review_count: Range::new(10, 500),
                rating: DEFAULT_RATING,
                language: "English".to_string(),
                format: "Hộp đựng".to_string(),
                description: "Sản phẩm văn phòng phẩm {title} chất lượng cao, phù hợp cho học tập và làm việc. Được sản xuất từ nguyên liệu an toàn.".to_string(),
                tags: strings(&["văn phòng phẩm", "học tập", "làm việc", "chất lượng cao", "an toàn"]),
            },
            comics: CategoryTable {
                authors: strings(&[
                    "Eiichiro Oda",
                    "Akira Toriyama",
                    "Masashi Kishimoto",
                    "Gosho Aoyama",
                    "Naoko Takeuchi",
                    "Rumiko Takahashi",
                    "CLAMP",
                    "Osamu Tezuka",
                ]),
                publishers: strings(&[
                    "NXB Kim Đồng",
                    "NXB Trẻ",
                    "NXB Văn Học",
                    "NXB Hội Nhà Văn",
                    "NXB Thế Giới",
                    "NXB Dân Trí",
                    "NXB Phụ Nữ",
                    "NXB Lao Động",
                ]),
                pages: Range::new(100, 300),
                weight_grams: Range::new(200, 500),
                dimensions_cm: DimensionRanges {
                    length: Range::new(15, 20),
                    width: Range::new(10, 15),
                    height: Range::new(1, 3),
                },
                stock: Range::new(5, 100),
                review_count: Range::new(10, 500),
                rating: DEFAULT_RATING,
                language: "Tiếng Việt".to_string(),
                format: "Bìa mềm".to_string(),
                description: "Truyện tranh {title} là một tác phẩm hấp dẫn với nội dung thú vị và hình ảnh đẹp mắt. Phù hợp cho mọi lứa tuổi yêu thích truyện tranh.".to_string(),
                tags: strings(&["truyện tranh", "manga", "comic", "hình ảnh đẹp", "nội dung hấp dẫn"]),
            },
            toys: CategoryTable {
                authors: strings(&[
                    "Mattel",
                    "Fisher-Price",
                    "LEGO",
                    "Hasbro",
                    "Barbie",
                    "Hot Wheels",
                    "Nerf",
                    "Play-Doh",
                ]),
                publishers: strings(&[
                    "Mattel Inc.",
                    "Fisher-Price",
                    "LEGO Group",
                    "Hasbro Inc.",
                    "Barbie Inc.",
                    "Hot Wheels Inc.",
                    "Nerf Inc.",
                    "Play-Doh Inc.",
                ]),
                pages: Range::new(50, 150),
                weight_grams: Range::new(100, 1000),
                dimensions_cm: DimensionRanges {
                    length: Range::new(20, 40),
                    width: Range::new(15, 30),
                    height: Range::new(5, 15),
                },
                stock: Range::new(5, 100),
                review_count: Range::new(10, 500),
                rating: DEFAULT_RATING,
                language: "English".to_string(),
                format: "Hộp đựng".to_string(),
                description: "Đồ chơi {title} là sản phẩm chất lượng cao, an toàn cho trẻ em. Giúp phát triển trí tuệ và kỹ năng vận động của bé.".to_string(),
                tags: strings(&["đồ chơi", "trẻ em", "giáo dục", "an toàn", "phát triển trí tuệ"]),
            },
        }
    }
}

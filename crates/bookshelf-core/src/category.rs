//! Product categories and the display-name tables shipped with the catalog.
//!
//! The category set is closed: every scraped source is assigned one of these
//! five codes in `config/sources.yaml`. Subcategory codes are open strings in
//! the config but must appear in [`Category::subcategories`] for the catalog
//! writer to accept them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Vietnamese,
    Foreign,
    OfficeSupplies,
    Comics,
    Toys,
}

#[derive(Debug, Error)]
#[error("unknown category \"{0}\"")]
pub struct UnknownCategory(pub String);

impl Category {
    /// All categories in the order the catalog lists them.
    pub const ALL: [Category; 5] = [
        Category::Vietnamese,
        Category::Foreign,
        Category::OfficeSupplies,
        Category::Toys,
        Category::Comics,
    ];

    /// Internal code, identical to the serialized form.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Category::Vietnamese => "vietnamese",
            Category::Foreign => "foreign",
            Category::OfficeSupplies => "office-supplies",
            Category::Comics => "comics",
            Category::Toys => "toys",
        }
    }

    /// Vietnamese display string used by the front end.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Category::Vietnamese => "Sách tiếng Việt",
            Category::Foreign => "Sách ngoại văn",
            Category::OfficeSupplies => "Văn phòng phẩm",
            Category::Comics => "Truyện tranh",
            Category::Toys => "Đồ chơi",
        }
    }

    /// Book-like categories carry a real author; the rest may leave it empty.
    #[must_use]
    pub fn requires_author(self) -> bool {
        matches!(
            self,
            Category::Vietnamese | Category::Foreign | Category::Comics
        )
    }

    /// `(code, display name)` pairs for this category's subcategories.
    #[must_use]
    pub fn subcategories(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Category::Vietnamese => &[
                ("literature", "Văn học"),
                ("history", "Lịch sử"),
                ("biography", "Tiểu sử"),
                ("psychology", "Tâm lý học"),
                ("economics", "Kinh tế"),
                ("lifestyle", "Lối sống"),
                ("health", "Sức khỏe"),
                ("fiction", "Tiểu thuyết"),
                ("non-fiction", "Phi hư cấu"),
            ],
            Category::Foreign => &[
                ("fiction", "Tiểu thuyết"),
                ("non-fiction", "Phi hư cấu"),
                ("biography", "Tiểu sử"),
                ("history", "Lịch sử"),
                ("science", "Khoa học"),
                ("business", "Kinh doanh"),
                ("self-help", "Tự phát triển"),
                ("travel", "Du lịch"),
            ],
            Category::OfficeSupplies => &[
                ("pens", "Bút - Viết"),
                ("pencils", "Bút chì"),
                ("notebooks", "Vở - Sổ"),
                ("calculators", "Máy tính"),
                ("rulers", "Thước kẻ"),
                ("erasers", "Tẩy"),
                ("markers", "Bút dạ"),
                ("folders", "Bìa hồ sơ"),
            ],
            Category::Toys => &[
                ("educational-toys", "Đồ chơi giáo dục"),
                ("creative-toys", "Đồ chơi sáng tạo"),
                ("action-figures", "Mô hình"),
                ("dolls", "Búp bê"),
                ("building-blocks", "Lắp ráp"),
                ("vehicles", "Xe đồ chơi"),
                ("board-games", "Board game"),
                ("electronic-toys", "Đồ chơi điện tử"),
            ],
            Category::Comics => &[
                ("comic-books", "Truyện tranh"),
                ("manga", "Manga"),
                ("graphic-novels", "Tiểu thuyết đồ họa"),
                ("manhwa", "Manhwa"),
                ("webtoons", "Webtoon"),
                ("superhero-comics", "Siêu anh hùng"),
                ("indie-comics", "Truyện tranh độc lập"),
                ("classic-comics", "Truyện tranh cổ điển"),
            ],
        }
    }

    /// Display name for a subcategory code, if the code belongs to this category.
    #[must_use]
    pub fn subcategory_name(self, code: &str) -> Option<&'static str> {
        self.subcategories()
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, name)| *name)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.code() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

//! Read-only queries over a parsed catalog, matching the `BookDatabase`
//! methods of the generated module.

use bookshelf_core::{CanonicalProduct, Category};

#[derive(Debug, Clone, Copy)]
pub struct CatalogView<'a> {
    products: &'a [CanonicalProduct],
}

impl<'a> CatalogView<'a> {
    #[must_use]
    pub fn new(products: &'a [CanonicalProduct]) -> Self {
        Self { products }
    }

    #[must_use]
    pub fn all(&self) -> Vec<&'a CanonicalProduct> {
        self.products.iter().collect()
    }

    #[must_use]
    pub fn by_id(&self, id: u32) -> Option<&'a CanonicalProduct> {
        self.products.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn by_category(&self, category: Category) -> Vec<&'a CanonicalProduct> {
        self.filter(|p| p.category == category)
    }

    #[must_use]
    pub fn by_subcategory(&self, category: Category, subcategory: &str) -> Vec<&'a CanonicalProduct> {
        self.filter(|p| p.category == category && p.subcategory == subcategory)
    }

    #[must_use]
    pub fn featured(&self) -> Vec<&'a CanonicalProduct> {
        self.filter(|p| p.featured)
    }

    #[must_use]
    pub fn new_releases(&self) -> Vec<&'a CanonicalProduct> {
        self.filter(|p| p.new_release)
    }

    /// Case-insensitive substring search over title, author and tags.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&'a CanonicalProduct> {
        let needle = query.to_lowercase();
        self.filter(|p| {
            p.title.to_lowercase().contains(&needle)
                || p.author.to_lowercase().contains(&needle)
                || p.tags.iter().any(|t| t.to_lowercase().contains(&needle))
        })
    }

    /// Up to `limit` other products sharing the category of product `id`.
    #[must_use]
    pub fn related(&self, id: u32, limit: usize) -> Vec<&'a CanonicalProduct> {
        let Some(book) = self.by_id(id) else {
            return Vec::new();
        };
        self.products
            .iter()
            .filter(|p| p.category == book.category && p.id != book.id)
            .take(limit)
            .collect()
    }

    /// Display name for a category code, or the code itself when unknown.
    #[must_use]
    pub fn category_name(code: &str) -> String {
        code.parse::<Category>()
            .map_or_else(|_| code.to_owned(), |c| c.display_name().to_owned())
    }

    /// Display name for a subcategory code, or the code itself when unknown.
    #[must_use]
    pub fn subcategory_name(category: &str, subcategory: &str) -> String {
        category
            .parse::<Category>()
            .ok()
            .and_then(|c| c.subcategory_name(subcategory))
            .map_or_else(|| subcategory.to_owned(), str::to_owned)
    }

    fn filter(&self, pred: impl Fn(&CanonicalProduct) -> bool) -> Vec<&'a CanonicalProduct> {
        self.products.iter().filter(|p| pred(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u32, title: &str, category: Category, sub: &str) -> CanonicalProduct {
        CanonicalProduct {
            id,
            title: title.to_owned(),
            author: "Eiichiro Oda".to_owned(),
            publisher: "NXB Kim Đồng".to_owned(),
            publish_date: "2024-05-01".to_owned(),
            category,
            subcategory: sub.to_owned(),
            price: 25_000,
            original_price: 30_000,
            discount: 17,
            isbn: "978-604-12345-6".to_owned(),
            pages: 200,
            language: "Tiếng Việt".to_owned(),
            format: "Bìa mềm".to_owned(),
            weight: "250g".to_owned(),
            dimensions: "18 x 13 x 2 cm".to_owned(),
            stock: 10,
            rating: 4.8,
            review_count: 300,
            images: vec!["https://www.netabooks.vn/op.jpg".to_owned()],
            description: String::new(),
            tags: vec!["truyện tranh".to_owned(), "Manga".to_owned()],
            featured: id % 2 == 1,
            new_release: id == 2,
        }
    }

    fn products() -> Vec<CanonicalProduct> {
        vec![
            product(1, "One Piece Tập 1", Category::Comics, "manga"),
            product(2, "Doraemon", Category::Comics, "comic-books"),
            product(3, "Lego City", Category::Toys, "building-blocks"),
        ]
    }

    #[test]
    fn lookups_by_id_and_category() {
        let products = products();
        let view = CatalogView::new(&products);
        assert_eq!(view.all().len(), 3);
        assert_eq!(view.by_id(3).map(|p| p.title.as_str()), Some("Lego City"));
        assert!(view.by_id(9).is_none());
        assert_eq!(view.by_category(Category::Comics).len(), 2);
        assert_eq!(view.by_subcategory(Category::Comics, "manga").len(), 1);
        assert!(view.by_subcategory(Category::Toys, "manga").is_empty());
    }

    #[test]
    fn flags_filter() {
        let products = products();
        let view = CatalogView::new(&products);
        let featured: Vec<u32> = view.featured().iter().map(|p| p.id).collect();
        assert_eq!(featured, vec![1, 3]);
        assert_eq!(view.new_releases()[0].id, 2);
    }

    #[test]
    fn search_is_case_insensitive_over_title_author_tags() {
        let products = products();
        let view = CatalogView::new(&products);
        assert_eq!(view.search("one piece").len(), 1);
        assert_eq!(view.search("ODA").len(), 3);
        assert_eq!(view.search("manga").len(), 3);
        assert!(view.search("harry").is_empty());
    }

    #[test]
    fn related_shares_category_and_excludes_itself() {
        let mut products = products();
        products.push(product(4, "Naruto", Category::Comics, "manga"));
        let view = CatalogView::new(&products);

        let related: Vec<u32> = view.related(1, 4).iter().map(|p| p.id).collect();
        assert_eq!(related, vec![2, 4]);
        assert_eq!(view.related(1, 1).len(), 1);
        assert!(view.related(3, 4).is_empty());
        assert!(view.related(9, 4).is_empty());
    }

    #[test]
    fn display_names_fall_back_to_code() {
        assert_eq!(CatalogView::category_name("toys"), "Đồ chơi");
        assert_eq!(CatalogView::category_name("novels"), "novels");
        assert_eq!(CatalogView::subcategory_name("comics", "manga"), "Manga");
        assert_eq!(CatalogView::subcategory_name("comics", "dolls"), "dolls");
    }
}

//! `query` command: read-only lookups against a generated module.

use std::path::Path;

use bookshelf_catalog::{read_catalog, CatalogView};
use bookshelf_core::{CanonicalProduct, Category};
use clap::Subcommand;

/// Sub-commands available under `query`.
#[derive(Debug, Subcommand)]
pub enum QueryCommands {
    /// List every product
    All,
    /// Show one product by id
    Id { id: u32 },
    /// Products in a category (e.g. comics)
    Category { category: Category },
    /// Products in a category's subcategory (e.g. comics manga)
    Subcategory {
        category: Category,
        subcategory: String,
    },
    /// Featured products
    Featured,
    /// New releases
    New,
    /// Case-insensitive search over title, author and tags
    Search { query: String },
    /// Other products in the same category as product `id`
    Related {
        id: u32,
        #[arg(long, default_value_t = 4)]
        limit: usize,
    },
}

fn format_product(p: &CanonicalProduct) -> String {
    let author = if p.author.is_empty() {
        "\u{2014}"
    } else {
        p.author.as_str()
    };
    format!(
        "{:>5}  {}  |  {}  |  {}đ (-{}%)  [{} / {}]",
        p.id,
        p.title,
        author,
        p.price,
        p.discount,
        CatalogView::category_name(p.category.code()),
        CatalogView::subcategory_name(p.category.code(), &p.subcategory)
    )
}

/// Products selected by `command`, in catalog order.
pub(crate) fn select<'a>(view: &CatalogView<'a>, command: &QueryCommands) -> Vec<&'a CanonicalProduct> {
    match command {
        QueryCommands::All => view.all(),
        QueryCommands::Id { id } => view.by_id(*id).into_iter().collect(),
        QueryCommands::Category { category } => view.by_category(*category),
        QueryCommands::Subcategory {
            category,
            subcategory,
        } => view.by_subcategory(*category, subcategory),
        QueryCommands::Featured => view.featured(),
        QueryCommands::New => view.new_releases(),
        QueryCommands::Search { query } => view.search(query),
        QueryCommands::Related { id, limit } => view.related(*id, *limit),
    }
}

pub(crate) fn run_query(catalog: &Path, command: &QueryCommands) -> anyhow::Result<()> {
    let products = read_catalog(catalog)?;
    let view = CatalogView::new(&products);
    let hits = select(&view, command);

    for p in &hits {
        println!("{}", format_product(p));
    }
    println!("{} of {} products", hits.len(), products.len());
    Ok(())
}

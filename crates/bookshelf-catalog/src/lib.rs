pub mod artifact;
pub mod curate;
pub mod enrich;
pub mod error;
pub mod intermediate;
pub mod query;
pub mod render;
pub mod store;

pub use artifact::{parse_module, read_catalog, write_catalog, ArtifactSummary};
pub use curate::{curate, CurationOutcome, ExclusionReason};
pub use enrich::{
    enrich_all, load_enrichment_tables, EnrichmentTables, Enricher, SyntheticEnricher,
};
pub use error::CatalogError;
pub use query::CatalogView;
pub use render::render_module;
pub use store::Catalog;

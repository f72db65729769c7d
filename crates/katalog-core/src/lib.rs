pub mod aggregate;
pub mod alias;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod normalizer;
pub mod resolver;
pub mod source;
pub mod view;

pub use aggregate::{
    CategoryCount, CategoryTile, category_tiles, count_by_category, filter_by_category,
    is_available, select_featured,
};
pub use alias::{AliasTable, Attribute};
pub use catalog::Catalog;
pub use config::AppConfig;
pub use error::{ExitCode, KatalogError, Result};
pub use models::*;
pub use normalizer::{Normalizer, normalize};
pub use resolver::resolve;
pub use source::{CatalogSource, InMemorySource, JsonFileSource};
pub use view::{BookCardView, HomeSummary};

#[cfg(feature = "async")]
pub use source::{AsyncCatalogSource, AsyncJsonFileSource};

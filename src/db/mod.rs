pub mod csv_store;
pub mod memory;

pub use csv_store::CsvCatalogStore;
pub use memory::MemoryCatalogStore;

use crate::{error::AppResult, models::Catalog};

/// Persistence backend for the product catalog
///
/// The recommendation services never touch a store; only the API layer loads
/// the catalog at startup and saves it after each mutation.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    /// Loads the full catalog; a store with nothing saved yet yields an empty catalog
    async fn load(&self) -> AppResult<Catalog>;

    /// Replaces the stored catalog with `catalog`
    async fn save(&self, catalog: &Catalog) -> AppResult<()>;
}

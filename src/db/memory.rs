use tokio::sync::Mutex;

use crate::{error::AppResult, models::Catalog};

use super::CatalogStore;

/// Keeps the saved catalog in process memory
#[derive(Debug, Default)]
pub struct MemoryCatalogStore {
    saved: Mutex<Catalog>,
}

impl MemoryCatalogStore {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            saved: Mutex::new(catalog),
        }
    }
}

#[async_trait::async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn load(&self) -> AppResult<Catalog> {
        Ok(self.saved.lock().await.clone())
    }

    async fn save(&self, catalog: &Catalog) -> AppResult<()> {
        *self.saved.lock().await = catalog.clone();
        Ok(())
    }
}

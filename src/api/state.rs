use std::sync::Arc;

use rand::rngs::StdRng;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::CatalogStore;
use crate::error::AppResult;
use crate::models::{Catalog, CategoryAdjacency, InteractionSet};
use crate::services::{generate_interactions, simulator::seeded_rng, SimulationOptions};

/// Request defaults and simulation shape taken from [`Config`]
#[derive(Debug, Clone)]
pub struct RecommenderSettings {
    pub default_top_n: usize,
    pub default_neighbors: usize,
    pub simulation: SimulationOptions,
    pub rng_seed: Option<u64>,
}

impl Default for RecommenderSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for RecommenderSettings {
    fn from(config: &Config) -> Self {
        Self {
            default_top_n: config.default_top_n,
            default_neighbors: config.default_neighbors,
            simulation: SimulationOptions {
                num_users: config.num_users,
                min_purchases: config.min_purchases,
                max_purchases: config.max_purchases,
            },
            rng_seed: config.rng_seed,
        }
    }
}

/// Shared application state
///
/// Reads (recommendations, listings) take the read lock and see one consistent
/// catalog snapshot; catalog mutations take the write lock for the whole
/// mutate, persist, resample sequence.
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<RwLock<AppStateInner>>,
    pub store: Arc<dyn CatalogStore>,
    pub settings: Arc<RecommenderSettings>,
}

/// Inner state that can be modified
pub struct AppStateInner {
    pub catalog: Catalog,
    pub interactions: InteractionSet,
    pub adjacency: CategoryAdjacency,
    rng: StdRng,
}

impl AppStateInner {
    /// Replaces the interaction table with a fresh sample over the current catalog
    pub fn resample_interactions(&mut self, options: &SimulationOptions) {
        let interactions = generate_interactions(&self.catalog, options, &mut self.rng);
        self.interactions = InteractionSet::new(interactions);
    }
}

impl AppState {
    /// Creates the state and samples the first interaction table
    pub fn new(
        catalog: Catalog,
        store: Arc<dyn CatalogStore>,
        settings: RecommenderSettings,
    ) -> Self {
        let mut inner = AppStateInner {
            catalog,
            interactions: InteractionSet::empty(),
            adjacency: CategoryAdjacency::default(),
            rng: seeded_rng(settings.rng_seed),
        };
        inner.resample_interactions(&settings.simulation);

        Self {
            inner: Arc::new(RwLock::new(inner)),
            store,
            settings: Arc::new(settings),
        }
    }

    /// Applies `mutate` to a copy of the catalog, persists it, and only then
    /// publishes it; interactions are resampled so they never reference a
    /// deleted product
    pub async fn mutate_catalog<T, F>(&self, mutate: F) -> AppResult<T>
    where
        F: FnOnce(&mut Catalog) -> AppResult<T>,
    {
        let mut inner = self.inner.write().await;

        let mut next = inner.catalog.clone();
        let output = mutate(&mut next)?;
        self.store.save(&next).await?;

        inner.catalog = next;
        inner.resample_interactions(&self.settings.simulation);
        Ok(output)
    }
}

pub mod complementary;
pub mod dataset;
pub mod features;
pub mod popularity;
pub mod similarity;
pub mod simulator;

pub use complementary::{complementary, MAX_COMPLEMENTARY};
pub use dataset::{generate_catalog, DatasetOptions};
pub use features::FeatureMatrix;
pub use popularity::rank_by_category;
pub use similarity::find_similar;
pub use simulator::{generate_interactions, SimulationOptions};

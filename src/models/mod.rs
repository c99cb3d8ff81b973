pub mod catalog;
pub mod category;
pub mod interaction;
pub mod product;

pub use catalog::Catalog;
pub use category::{CategoryAdjacency, DEFAULT_CATEGORIES};
pub use interaction::{Interaction, InteractionSet, InteractionSummary};
pub use product::{NewProduct, Product, ProductUpdate, RankedProduct};

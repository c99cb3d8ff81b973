use crate::models::{Catalog, CategoryAdjacency, Product};

/// Upper bound on cross-sell suggestions for a single product
pub const MAX_COMPLEMENTARY: usize = 10;

/// Suggests products from the categories related to `product_id`'s category
///
/// Results are ordered by rating, then by purchase count, both descending.
/// Unknown products and categories without a related entry yield nothing.
pub fn complementary(
    catalog: &Catalog,
    adjacency: &CategoryAdjacency,
    product_id: &str,
) -> Vec<Product> {
    let Some(product) = catalog.get(product_id) else {
        tracing::debug!(product_id = %product_id, "Complementary query for unknown product");
        return Vec::new();
    };

    let related = adjacency.related(&product.category);
    if related.is_empty() {
        tracing::debug!(category = %product.category, "No related categories");
        return Vec::new();
    }

    let mut candidates: Vec<&Product> = catalog
        .products()
        .iter()
        .filter(|p| related.contains(&p.category))
        .collect();

    candidates.sort_by(|a, b| {
        b.rating
            .total_cmp(&a.rating)
            .then_with(|| b.users_purchased.cmp(&a.users_purchased))
    });

    candidates
        .into_iter()
        .take(MAX_COMPLEMENTARY)
        .cloned()
        .collect()
}

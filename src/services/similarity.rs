use crate::models::{Catalog, Product};

use super::features::{euclidean_distance, FeatureMatrix};

/// Finds the `k` products nearest to `product_id` in the standardized feature space
///
/// Only products sharing the query's category are returned, nearest first;
/// the query product itself never is. Standardization is recomputed over the
/// given snapshot on every call.
///
/// Returns an empty list when the product is unknown, has no price, or the
/// feature space has fewer than two rows.
pub fn find_similar(catalog: &Catalog, product_id: &str, k: usize) -> Vec<Product> {
    let Some(query_index) = catalog.position(product_id) else {
        tracing::debug!(product_id = %product_id, "Similarity query for unknown product");
        return Vec::new();
    };
    if k == 0 {
        return Vec::new();
    }

    let matrix = FeatureMatrix::from_catalog(catalog);
    if matrix.len() < 2 {
        tracing::debug!(usable_rows = matrix.len(), "Feature space too small");
        return Vec::new();
    }

    let Some(query_row) = matrix.row_for(query_index) else {
        tracing::debug!(product_id = %product_id, "Query product has no complete feature triple");
        return Vec::new();
    };

    let mut by_distance: Vec<(usize, f64)> = matrix
        .rows()
        .iter()
        .map(|row| {
            (
                row.catalog_index,
                euclidean_distance(&query_row.values, &row.values),
            )
        })
        .collect();
    // Stable: equal distances keep catalog order
    by_distance.sort_by(|a, b| a.1.total_cmp(&b.1));

    let products = catalog.products();
    let category = &products[query_index].category;

    let neighbors: Vec<Product> = by_distance
        .into_iter()
        .filter(|(index, _)| *index != query_index && products[*index].category == *category)
        .take(k)
        .map(|(index, _)| products[index].clone())
        .collect();

    tracing::debug!(
        product_id = %product_id,
        category = %category,
        k,
        found = neighbors.len(),
        "Similarity search complete"
    );

    neighbors
}

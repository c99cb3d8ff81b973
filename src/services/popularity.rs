use std::collections::HashMap;

use crate::models::{Catalog, Interaction, Product, RankedProduct};

/// Ranks the products of one category that appear in the interaction table
///
/// Purchase counts select which products are eligible; the returned order is by
/// rating, highest first, with ties kept in catalog order. Empty inputs and
/// categories absent from the catalog produce an empty ranking.
pub fn rank_by_category(
    catalog: &Catalog,
    interactions: &[Interaction],
    category: &str,
    top_n: usize,
) -> Vec<RankedProduct> {
    let category_products: Vec<_> = catalog
        .products()
        .iter()
        .filter(|p| p.category == category)
        .collect();

    if category_products.is_empty() || interactions.is_empty() {
        tracing::debug!(
            category = %category,
            catalog_rows = category_products.len(),
            interactions = interactions.len(),
            "Nothing to rank"
        );
        return Vec::new();
    }

    let purchase_counts = count_purchases(&category_products, interactions);

    let mut ranked: Vec<_> = category_products
        .into_iter()
        .filter(|p| purchase_counts.contains_key(p.id.as_str()))
        .collect();

    // Stable sort keeps catalog order among equal ratings
    ranked.sort_by(|a, b| b.rating.total_cmp(&a.rating));

    tracing::debug!(
        category = %category,
        purchased_products = purchase_counts.len(),
        top_n,
        "Ranked category by rating"
    );

    ranked
        .into_iter()
        .take(top_n)
        .map(RankedProduct::from)
        .collect()
}

/// Counts purchases per product, restricted to the given rows
fn count_purchases<'a>(
    products: &[&'a Product],
    interactions: &[Interaction],
) -> HashMap<&'a str, usize> {
    let mut counts: HashMap<&str, usize> =
        products.iter().map(|p| (p.id.as_str(), 0)).collect();

    for interaction in interactions {
        if let Some(count) = counts.get_mut(interaction.product_id.as_str()) {
            *count += 1;
        }
    }

    counts.retain(|_, count| *count > 0);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Catalog {
        Catalog::from_products(vec![
            Product::new("P0001", "Shoes", 4.5, 100, 50.0),
            Product::new("P0002", "Bags", 3.0, 10, 80.0),
            Product::new("P0003", "Shoes", 4.8, 5000, 60.0),
        ])
        .unwrap()
    }

    fn sample_interactions() -> Vec<Interaction> {
        vec![
            Interaction::purchase("U1", "P0001"),
            Interaction::purchase("U1", "P0003"),
            Interaction::purchase("U2", "P0003"),
        ]
    }

    #[test]
    fn test_rank_shoes_by_rating() {
        let ranked = rank_by_category(&sample_catalog(), &sample_interactions(), "Shoes", 2);
        let ids: Vec<_> = ranked.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["P0003", "P0001"]);
        assert_eq!(ranked[0].rating, 4.8);
        assert_eq!(ranked[1].rating, 4.5);
    }

    #[test]
    fn test_truncates_to_top_n() {
        let ranked = rank_by_category(&sample_catalog(), &sample_interactions(), "Shoes", 1);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].id, "P0003");
    }

    #[test]
    fn test_empty_interactions_yield_empty_ranking() {
        let ranked = rank_by_category(&sample_catalog(), &[], "Shoes", 5);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_unknown_category_yields_empty_ranking() {
        let ranked = rank_by_category(&sample_catalog(), &sample_interactions(), "Laptops", 5);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_empty_catalog_yields_empty_ranking() {
        let ranked = rank_by_category(&Catalog::new(), &sample_interactions(), "Shoes", 5);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_products_without_purchases_are_excluded() {
        // P0002 is the only bag and nobody bought it
        let ranked = rank_by_category(&sample_catalog(), &sample_interactions(), "Bags", 5);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_order_ignores_purchase_count() {
        let catalog = Catalog::from_products(vec![
            Product::new("P0001", "Watches", 2.0, 1, 10.0),
            Product::new("P0002", "Watches", 4.0, 1, 10.0),
        ])
        .unwrap();
        let interactions = vec![
            Interaction::purchase("U1", "P0001"),
            Interaction::purchase("U2", "P0001"),
            Interaction::purchase("U3", "P0001"),
            Interaction::purchase("U1", "P0002"),
        ];

        let ranked = rank_by_category(&catalog, &interactions, "Watches", 5);
        let ids: Vec<_> = ranked.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["P0002", "P0001"]);
    }

    #[test]
    fn test_equal_ratings_keep_catalog_order() {
        let catalog = Catalog::from_products(vec![
            Product::new("P0001", "Bags", 4.0, 1, 10.0),
            Product::new("P0002", "Bags", 4.0, 1, 10.0),
            Product::new("P0003", "Bags", 4.0, 1, 10.0),
        ])
        .unwrap();
        let interactions = vec![
            Interaction::purchase("U1", "P0003"),
            Interaction::purchase("U1", "P0001"),
            Interaction::purchase("U2", "P0002"),
        ];

        let ranked = rank_by_category(&catalog, &interactions, "Bags", 5);
        let ids: Vec<_> = ranked.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["P0001", "P0002", "P0003"]);
    }

    #[test]
    fn test_results_match_category_and_are_sorted() {
        let catalog = Catalog::from_products(
            (1..=30)
                .map(|i| {
                    let category = if i % 2 == 0 { "Shoes" } else { "Bags" };
                    let rating = 1.0 + (i % 9) as f64 * 0.5;
                    Product::new(format!("P{:04}", i), category, rating, i, 10.0)
                })
                .collect(),
        )
        .unwrap();
        let interactions: Vec<_> = (1..=30)
            .map(|i| Interaction::purchase(format!("U{}", i), format!("P{:04}", i)))
            .collect();

        let ranked = rank_by_category(&catalog, &interactions, "Shoes", 7);
        assert_eq!(ranked.len(), 7);
        assert!(ranked.iter().all(|r| r.category == "Shoes"));
        assert!(ranked.windows(2).all(|w| w[0].rating >= w[1].rating));
    }
}

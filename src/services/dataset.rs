use rand::{seq::SliceRandom, Rng};

use crate::error::{AppError, AppResult};
use crate::models::{Catalog, Product, DEFAULT_CATEGORIES};

/// Parameters for synthesizing a catalog
#[derive(Debug, Clone)]
pub struct DatasetOptions {
    pub count: usize,
    pub categories: Vec<String>,
}

impl Default for DatasetOptions {
    fn default() -> Self {
        Self {
            count: 1000,
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Synthesizes `options.count` products with ids `P0001..`
pub fn generate_catalog<R: Rng + ?Sized>(
    options: &DatasetOptions,
    rng: &mut R,
) -> AppResult<Catalog> {
    if options.categories.is_empty() {
        return Err(AppError::InvalidInput(
            "At least one category is required to generate a catalog".to_string(),
        ));
    }

    let mut products = Vec::with_capacity(options.count);
    for i in 1..=options.count {
        let category = options
            .categories
            .choose(rng)
            .cloned()
            .unwrap_or_default();
        products.push(Product {
            id: format!("P{:04}", i),
            category,
            rating: round_to(rng.gen_range(1.0..=5.0), 1),
            users_purchased: rng.gen_range(1..=10_000),
            price: Some(round_to(rng.gen_range(5.0..=500.0), 2)),
        });
    }

    tracing::info!(products = products.len(), "Generated synthetic catalog");
    Catalog::from_products(products)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn test_generates_requested_count() {
        let options = DatasetOptions {
            count: 120,
            ..DatasetOptions::default()
        };
        let catalog = generate_catalog(&options, &mut StdRng::seed_from_u64(9)).unwrap();

        assert_eq!(catalog.len(), 120);
        assert_eq!(catalog.products()[0].id, "P0001");
        assert_eq!(catalog.products()[119].id, "P0120");
    }

    #[test]
    fn test_fields_within_ranges() {
        let catalog =
            generate_catalog(&DatasetOptions::default(), &mut StdRng::seed_from_u64(1)).unwrap();

        for product in catalog.products() {
            assert!(DEFAULT_CATEGORIES.contains(&product.category.as_str()));
            assert!((1.0..=5.0).contains(&product.rating));
            assert!((1..=10_000).contains(&product.users_purchased));
            let price = product.price.unwrap();
            assert!((5.0..=500.0).contains(&price));
        }
    }

    #[test]
    fn test_rating_has_one_decimal() {
        let catalog =
            generate_catalog(&DatasetOptions::default(), &mut StdRng::seed_from_u64(5)).unwrap();
        for product in catalog.products() {
            let scaled = product.rating * 10.0;
            assert!((scaled - scaled.round()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_no_categories_rejected() {
        let options = DatasetOptions {
            count: 10,
            categories: Vec::new(),
        };
        assert!(generate_catalog(&options, &mut StdRng::seed_from_u64(5)).is_err());
    }
}

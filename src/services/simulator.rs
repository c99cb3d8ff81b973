use rand::{rngs::StdRng, seq::index, Rng, SeedableRng};

use crate::models::{Catalog, Interaction};

/// Shape of a simulated purchase table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationOptions {
    pub num_users: usize,
    pub min_purchases: usize,
    pub max_purchases: usize,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            num_users: 500,
            min_purchases: 5,
            max_purchases: 20,
        }
    }
}

/// Generator for simulation runs; a fixed seed makes runs reproducible
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Simulates purchases for users `U001..`; each user buys a random sample of
/// distinct products drawn from the current catalog
pub fn generate_interactions<R: Rng + ?Sized>(
    catalog: &Catalog,
    options: &SimulationOptions,
    rng: &mut R,
) -> Vec<Interaction> {
    let products = catalog.products();
    if products.is_empty() || options.num_users == 0 {
        return Vec::new();
    }

    let max = options.max_purchases.max(options.min_purchases);
    let mut interactions = Vec::with_capacity(options.num_users * max);

    for user in 1..=options.num_users {
        let user_id = format!("U{:03}", user);
        let wanted = rng.gen_range(options.min_purchases..=max);
        let amount = wanted.min(products.len());

        for i in index::sample(rng, products.len(), amount) {
            interactions.push(Interaction::purchase(user_id.clone(), products[i].id.clone()));
        }
    }

    tracing::info!(
        users = options.num_users,
        interactions = interactions.len(),
        "Simulated user interactions"
    );

    interactions
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::models::Product;

    fn catalog(size: u64) -> Catalog {
        Catalog::from_products(
            (1..=size)
                .map(|i| Product::new(format!("P{:04}", i), "Shoes", 3.0, i, 10.0))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_interactions_reference_catalog_ids() {
        let catalog = catalog(50);
        let mut rng = StdRng::seed_from_u64(7);
        let interactions = generate_interactions(&catalog, &SimulationOptions::default(), &mut rng);

        assert!(!interactions.is_empty());
        assert!(interactions
            .iter()
            .all(|i| catalog.get(&i.product_id).is_some() && i.purchased == 1));
    }

    #[test]
    fn test_per_user_counts_within_range() {
        let catalog = catalog(50);
        let options = SimulationOptions {
            num_users: 40,
            min_purchases: 1,
            max_purchases: 5,
        };
        let mut rng = StdRng::seed_from_u64(11);
        let interactions = generate_interactions(&catalog, &options, &mut rng);

        for user in 1..=40 {
            let user_id = format!("U{:03}", user);
            let bought: Vec<_> = interactions
                .iter()
                .filter(|i| i.user_id == user_id)
                .map(|i| i.product_id.as_str())
                .collect();
            let distinct: HashSet<_> = bought.iter().collect();
            assert!((1..=5).contains(&bought.len()), "{user_id}");
            assert_eq!(distinct.len(), bought.len());
        }
    }

    #[test]
    fn test_sample_clamped_to_catalog_size() {
        let catalog = catalog(3);
        let options = SimulationOptions {
            num_users: 10,
            min_purchases: 5,
            max_purchases: 20,
        };
        let mut rng = StdRng::seed_from_u64(3);
        let interactions = generate_interactions(&catalog, &options, &mut rng);
        assert_eq!(interactions.len(), 30);
    }

    #[test]
    fn test_empty_catalog_yields_no_interactions() {
        let mut rng = StdRng::seed_from_u64(1);
        let interactions =
            generate_interactions(&Catalog::new(), &SimulationOptions::default(), &mut rng);
        assert!(interactions.is_empty());
    }

    #[test]
    fn test_same_seed_same_table() {
        let catalog = catalog(20);
        let options = SimulationOptions::default();
        let first = generate_interactions(&catalog, &options, &mut StdRng::seed_from_u64(42));
        let second = generate_interactions(&catalog, &options, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }
}

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One simulated purchase linking a user to a product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Interaction {
    pub user_id: String,
    pub product_id: String,
    /// Always 1; kept so the table matches the user x product purchase layout
    pub purchased: u8,
}

impl Interaction {
    pub fn purchase(user_id: impl Into<String>, product_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            product_id: product_id.into(),
            purchased: 1,
        }
    }
}

/// Interaction table sampled for the current session
#[derive(Debug, Clone)]
pub struct InteractionSet {
    pub interactions: Vec<Interaction>,
    pub generated_at: DateTime<Utc>,
}

impl InteractionSet {
    pub fn new(interactions: Vec<Interaction>) -> Self {
        Self {
            interactions,
            generated_at: Utc::now(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

/// Aggregate view of the current interaction table
#[derive(Debug, Clone, Serialize)]
pub struct InteractionSummary {
    pub interactions: usize,
    pub users: usize,
    pub distinct_products: usize,
    pub generated_at: DateTime<Utc>,
}

impl From<&InteractionSet> for InteractionSummary {
    fn from(set: &InteractionSet) -> Self {
        let users: HashSet<&str> =
            set.interactions.iter().map(|i| i.user_id.as_str()).collect();
        let products: HashSet<&str> = set
            .interactions
            .iter()
            .map(|i| i.product_id.as_str())
            .collect();

        Self {
            interactions: set.interactions.len(),
            users: users.len(),
            distinct_products: products.len(),
            generated_at: set.generated_at,
        }
    }
}

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Categories the dataset generator draws from
pub const DEFAULT_CATEGORIES: [&str; 7] = [
    "Shoes",
    "Watches",
    "Bags",
    "Sunglasses",
    "Smartphones",
    "Men Wallet",
    "Earbuds",
];

/// Fixed category -> related categories table used for cross-sell suggestions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryAdjacency {
    related: HashMap<String, Vec<String>>,
}

impl Default for CategoryAdjacency {
    fn default() -> Self {
        Self::from_pairs([
            ("Watches", &["Sunglasses", "Men Wallet"][..]),
            ("Bags", &["Shoes"][..]),
            ("Smartphones", &["Earbuds"][..]),
            ("Shoes", &["Bags"][..]),
            ("Sunglasses", &["Watches"][..]),
            ("Men Wallet", &["Watches"][..]),
            ("Earbuds", &["Smartphones"][..]),
        ])
    }
}

impl CategoryAdjacency {
    /// Builds a table from (category, related categories) pairs
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [&'a str])>,
    {
        let related = pairs
            .into_iter()
            .map(|(category, related)| {
                (
                    category.to_string(),
                    related.iter().map(|r| r.to_string()).collect(),
                )
            })
            .collect();
        Self { related }
    }

    /// Related categories in table order; empty for categories with no entry
    pub fn related(&self, category: &str) -> &[String] {
        self.related
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let adjacency = CategoryAdjacency::default();
        assert_eq!(adjacency.related("Watches"), ["Sunglasses", "Men Wallet"]);
        assert_eq!(adjacency.related("Shoes"), ["Bags"]);
        assert_eq!(adjacency.related("Earbuds"), ["Smartphones"]);
    }

    #[test]
    fn test_unknown_category_has_no_related() {
        let adjacency = CategoryAdjacency::default();
        assert!(adjacency.related("Laptops").is_empty());
    }

    #[test]
    fn test_every_default_category_has_an_entry() {
        let adjacency = CategoryAdjacency::default();
        for category in DEFAULT_CATEGORIES {
            assert!(!adjacency.related(category).is_empty(), "{category}");
        }
    }
}

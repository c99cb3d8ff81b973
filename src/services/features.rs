//! Standardized feature space over a catalog snapshot
//!
//! Each product with a complete `(users_purchased, rating, price)` triple
//! becomes one row. Columns are shifted to zero mean and scaled to unit
//! population variance. A column with zero variance is mapped to all zeros so
//! distances stay finite.

use crate::models::Catalog;

pub const FEATURE_COUNT: usize = 3;

/// Standardized feature rows, each tagged with its catalog row index
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    rows: Vec<FeatureRow>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRow {
    /// Index of the product in the catalog
    pub catalog_index: usize,
    /// Standardized `[users_purchased, rating, price]`
    pub values: [f64; FEATURE_COUNT],
}

impl FeatureMatrix {
    /// Builds and standardizes the matrix; rows without a price are left out
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut rows: Vec<FeatureRow> = catalog
            .products()
            .iter()
            .enumerate()
            .filter_map(|(catalog_index, product)| {
                product.features().map(|values| FeatureRow {
                    catalog_index,
                    values,
                })
            })
            .collect();

        standardize(&mut rows);
        Self { rows }
    }

    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Feature row of the product at `catalog_index`, if it is in the feature space
    pub fn row_for(&self, catalog_index: usize) -> Option<&FeatureRow> {
        self.rows.iter().find(|r| r.catalog_index == catalog_index)
    }
}

fn standardize(rows: &mut [FeatureRow]) {
    if rows.is_empty() {
        return;
    }
    let n = rows.len() as f64;

    for column in 0..FEATURE_COUNT {
        let mean = rows.iter().map(|r| r.values[column]).sum::<f64>() / n;
        let variance = rows
            .iter()
            .map(|r| (r.values[column] - mean).powi(2))
            .sum::<f64>()
            / n;
        let std_dev = variance.sqrt();

        for row in rows.iter_mut() {
            row.values[column] = if std_dev > 0.0 {
                (row.values[column] - mean) / std_dev
            } else {
                0.0
            };
        }
    }
}

/// Euclidean distance between two feature vectors
pub fn euclidean_distance(a: &[f64; FEATURE_COUNT], b: &[f64; FEATURE_COUNT]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

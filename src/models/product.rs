use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 5.0;

/// A single catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique identifier (e.g., "P0001")
    pub id: String,
    /// Category name (e.g., "Shoes")
    pub category: String,
    /// Average rating in [1.0, 5.0]
    pub rating: f64,
    /// Number of users who purchased the product
    pub users_purchased: u64,
    /// Unit price; absent in catalogs written by the older four-column format
    pub price: Option<f64>,
}

impl Product {
    /// Creates a product with a price
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        rating: f64,
        users_purchased: u64,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            rating,
            users_purchased,
            price: Some(price),
        }
    }

    /// Checks the field ranges a catalog row must satisfy
    pub fn validate(&self) -> AppResult<()> {
        if self.id.trim().is_empty() {
            return Err(AppError::InvalidInput("Product ID must not be blank".to_string()));
        }
        if self.category.trim().is_empty() {
            return Err(AppError::InvalidInput(format!(
                "Product {} has a blank category",
                self.id
            )));
        }
        if !self.rating.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(AppError::InvalidInput(format!(
                "Product {} rating {} is outside [{}, {}]",
                self.id, self.rating, MIN_RATING, MAX_RATING
            )));
        }
        if let Some(price) = self.price {
            if !price.is_finite() || price < 0.0 {
                return Err(AppError::InvalidInput(format!(
                    "Product {} price {} must be a non-negative number",
                    self.id, price
                )));
            }
        }
        Ok(())
    }

    /// Feature triple used by the similarity search, if the row is complete
    pub fn features(&self) -> Option<[f64; 3]> {
        self.price
            .map(|price| [self.users_purchased as f64, self.rating, price])
    }
}

/// Fields supplied when adding a product; the id is assigned by the catalog
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub category: String,
    pub rating: f64,
    #[serde(default)]
    pub users_purchased: u64,
    #[serde(default)]
    pub price: Option<f64>,
}

/// Partial edit of an existing product
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductUpdate {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub users_purchased: Option<u64>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl ProductUpdate {
    /// Returns a copy of `product` with the supplied fields replaced
    pub fn apply_to(&self, product: &Product) -> Product {
        Product {
            id: product.id.clone(),
            category: self
                .category
                .clone()
                .unwrap_or_else(|| product.category.clone()),
            rating: self.rating.unwrap_or(product.rating),
            users_purchased: self.users_purchased.unwrap_or(product.users_purchased),
            price: self.price.or(product.price),
        }
    }
}

/// Row returned by the popularity ranking
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankedProduct {
    pub id: String,
    pub category: String,
    pub rating: f64,
}

impl From<&Product> for RankedProduct {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            category: product.category.clone(),
            rating: product.rating,
        }
    }
}

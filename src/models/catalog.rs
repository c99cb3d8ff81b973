use std::collections::HashSet;

use crate::error::{AppError, AppResult};

use super::{NewProduct, Product, ProductUpdate};

/// Ordered, in-memory product table
///
/// Row order is the insertion order of the underlying file and is the order
/// every recommendation walks when breaking ties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from rows, rejecting malformed rows and duplicate ids
    pub fn from_products(products: Vec<Product>) -> AppResult<Self> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            product.validate()?;
            if !seen.insert(product.id.as_str()) {
                return Err(AppError::InvalidInput(format!(
                    "Duplicate product ID {}",
                    product.id
                )));
            }
        }
        Ok(Self { products })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Row index of a product, used to exclude the query row from neighbor searches
    pub fn position(&self, id: &str) -> Option<usize> {
        self.products.iter().position(|p| p.id == id)
    }

    /// Distinct categories in first-seen order
    pub fn categories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .filter(|p| seen.insert(p.category.as_str()))
            .map(|p| p.category.clone())
            .collect()
    }

    /// Next free identifier: one past the largest numeric suffix, zero-padded to four digits
    pub fn next_product_id(&self) -> AppResult<String> {
        let last = self
            .products
            .iter()
            .filter_map(|p| p.id.get(1..).and_then(|n| n.parse::<u64>().ok()))
            .max()
            .unwrap_or(0);
        let next = last.checked_add(1).ok_or_else(|| {
            AppError::InvalidInput(format!("No product ID left after P{}", last))
        })?;
        Ok(format!("P{:04}", next))
    }

    /// Appends a new product under a freshly assigned id
    pub fn add_product(&mut self, new_product: NewProduct) -> AppResult<Product> {
        let product = Product {
            id: self.next_product_id()?,
            category: new_product.category.trim().to_string(),
            rating: new_product.rating,
            users_purchased: new_product.users_purchased,
            price: new_product.price,
        };
        product.validate()?;

        tracing::debug!(product_id = %product.id, category = %product.category, "Product added");
        self.products.push(product.clone());
        Ok(product)
    }

    /// Replaces the supplied fields of an existing product
    pub fn update_product(&mut self, id: &str, update: ProductUpdate) -> AppResult<Product> {
        let index = self
            .position(id)
            .ok_or_else(|| AppError::NotFound(format!("Product {}", id)))?;

        let mut updated = update.apply_to(&self.products[index]);
        updated.category = updated.category.trim().to_string();
        updated.validate()?;

        self.products[index] = updated.clone();
        tracing::debug!(product_id = %id, "Product updated");
        Ok(updated)
    }

    /// Removes a product, returning the deleted row
    pub fn delete_product(&mut self, id: &str) -> AppResult<Product> {
        let index = self
            .position(id)
            .ok_or_else(|| AppError::NotFound(format!("Product {}", id)))?;

        tracing::debug!(product_id = %id, "Product deleted");
        Ok(self.products.remove(index))
    }
}

//! Product recommendations over an in-memory catalog
//!
//! The recommendation core in [`services`] is a set of pure functions over a
//! [`models::Catalog`] snapshot: category popularity ranking, category-bound
//! nearest neighbors in a standardized feature space, and complementary
//! category cross-sell. [`api`] serves them over HTTP with the catalog kept
//! behind a single-writer lock and persisted through a [`db::CatalogStore`].

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;

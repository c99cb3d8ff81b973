use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::RequestId;
use crate::models::{InteractionSummary, NewProduct, Product, ProductUpdate, RankedProduct};
use crate::services::{complementary, find_similar, rank_by_category};

use super::AppState;

/// Largest `top_n` accepted by the popularity ranking
pub const MAX_TOP_N: usize = 20;
/// Largest `k` accepted by the similarity search
pub const MAX_NEIGHBORS: usize = 10;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct PopularQuery {
    pub category: String,
    pub top_n: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct SimilarQuery {
    pub k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct PopularResponse {
    pub category: String,
    pub top_n: usize,
    pub products: Vec<RankedProduct>,
}

#[derive(Debug, Serialize)]
pub struct SimilarResponse {
    pub product_id: String,
    pub k: usize,
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize)]
pub struct ComplementaryResponse {
    pub product_id: String,
    pub related_categories: Vec<String>,
    pub products: Vec<Product>,
}

fn limit_or_default(
    value: Option<usize>,
    default: usize,
    max: usize,
    name: &str,
) -> AppResult<usize> {
    let value = value.unwrap_or(default);
    if value == 0 || value > max {
        return Err(AppError::InvalidInput(format!(
            "{} must be between 1 and {}",
            name, max
        )));
    }
    Ok(value)
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Distinct catalog categories in first-seen order
pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<String>> {
    let inner = state.inner.read().await;
    Json(inner.catalog.categories())
}

/// Full catalog
pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    let inner = state.inner.read().await;
    Json(inner.catalog.products().to_vec())
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> AppResult<Json<Product>> {
    let inner = state.inner.read().await;
    inner
        .catalog
        .get(&product_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Product {}", product_id)))
}

/// Adds a product under the next free id
pub async fn create_product(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<NewProduct>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let product = state
        .mutate_catalog(|catalog| catalog.add_product(request))
        .await?;

    tracing::info!(request_id = %request_id, product_id = %product.id, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(product_id): Path<String>,
    Json(request): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    let product = state
        .mutate_catalog(|catalog| catalog.update_product(&product_id, request))
        .await?;

    tracing::info!(request_id = %request_id, product_id = %product.id, "Product updated");
    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(product_id): Path<String>,
) -> AppResult<Json<Product>> {
    let product = state
        .mutate_catalog(|catalog| catalog.delete_product(&product_id))
        .await?;

    tracing::info!(request_id = %request_id, product_id = %product.id, "Product deleted");
    Ok(Json(product))
}

/// Top-rated products of a category among those purchased in the current interaction table
pub async fn popular_products(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<PopularQuery>,
) -> AppResult<Json<PopularResponse>> {
    let top_n = limit_or_default(
        params.top_n,
        state.settings.default_top_n,
        MAX_TOP_N,
        "top_n",
    )?;
    let inner = state.inner.read().await;

    let products = rank_by_category(
        &inner.catalog,
        &inner.interactions.interactions,
        &params.category,
        top_n,
    );

    tracing::info!(
        request_id = %request_id,
        category = %params.category,
        top_n,
        returned = products.len(),
        "Popularity ranking served"
    );

    Ok(Json(PopularResponse {
        category: params.category,
        top_n,
        products,
    }))
}

/// Nearest neighbors of a product within its category
pub async fn similar_products(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(product_id): Path<String>,
    Query(params): Query<SimilarQuery>,
) -> AppResult<Json<SimilarResponse>> {
    let k = limit_or_default(
        params.k,
        state.settings.default_neighbors,
        MAX_NEIGHBORS,
        "k",
    )?;
    let inner = state.inner.read().await;

    let products = find_similar(&inner.catalog, &product_id, k);

    tracing::info!(
        request_id = %request_id,
        product_id = %product_id,
        k,
        returned = products.len(),
        "Similar products served"
    );

    Ok(Json(SimilarResponse {
        product_id,
        k,
        products,
    }))
}

/// Cross-sell suggestions from the categories related to the product's category
pub async fn complementary_products(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(product_id): Path<String>,
) -> Json<ComplementaryResponse> {
    let inner = state.inner.read().await;

    let related_categories = inner
        .catalog
        .get(&product_id)
        .map(|p| inner.adjacency.related(&p.category).to_vec())
        .unwrap_or_default();
    let products = complementary(&inner.catalog, &inner.adjacency, &product_id);

    tracing::info!(
        request_id = %request_id,
        product_id = %product_id,
        returned = products.len(),
        "Complementary products served"
    );

    Json(ComplementaryResponse {
        product_id,
        related_categories,
        products,
    })
}

pub async fn interaction_summary(State(state): State<AppState>) -> Json<InteractionSummary> {
    let inner = state.inner.read().await;
    Json(InteractionSummary::from(&inner.interactions))
}

/// Discards the current interaction table and simulates a new one
pub async fn regenerate_interactions(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Json<InteractionSummary> {
    let mut inner = state.inner.write().await;
    inner.resample_interactions(&state.settings.simulation);

    let summary = InteractionSummary::from(&inner.interactions);
    tracing::info!(
        request_id = %request_id,
        interactions = summary.interactions,
        "Interactions regenerated"
    );
    Json(summary)
}

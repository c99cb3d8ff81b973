use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Catalog
        .route("/categories", get(handlers::list_categories))
        .route(
            "/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/products/:id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        // Recommendations
        .route("/products/:id/similar", get(handlers::similar_products))
        .route(
            "/products/:id/complementary",
            get(handlers::complementary_products),
        )
        .route("/recommendations/popular", get(handlers::popular_products))
        // Simulated interactions
        .route("/interactions/summary", get(handlers::interaction_summary))
        .route(
            "/interactions/regenerate",
            post(handlers::regenerate_interactions),
        )
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

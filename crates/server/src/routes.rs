pub mod auth;
pub mod categories;
pub mod products;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use configs::MediaConfig;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::state::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: auth, catalog, stored media and docs.
pub fn build_router(state: ServerState, cors: CorsLayer, media: &MediaConfig) -> Router {
    let auth_routes = Router::new()
        .route("/auth/", post(auth::register))
        .route("/auth/token", post(auth::token));

    // reads are public, writes require a bearer token via `CurrentUser`
    let catalog_routes = Router::new()
        .route("/products/", post(products::create))
        .route(
            "/products/:product_id",
            get(products::get).put(products::update).delete(products::delete),
        )
        .route("/categories/", post(categories::create))
        .route(
            "/categories/:category_id",
            get(categories::get).put(categories::update).delete(categories::delete),
        )
        .layer(DefaultBodyLimit::max(media.max_upload_bytes));

    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(auth_routes)
        .merge(catalog_routes)
        .nest_service("/uploads", ServeDir::new(&media.upload_dir))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx responses
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}

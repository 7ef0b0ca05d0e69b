pub mod response;

use crate::config::Config;
use crate::{db, features, middleware};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use sqlx::SqlitePool;
use tower_http::compression::CompressionLayer;

/// Build the application router with all routes and middleware
pub fn create_router(pool: SqlitePool, config: &Config) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(features::router())
        .with_state(pool)
        // Layers apply from innermost to outermost
        .layer(middleware::timeout_layer(config.server.request_timeout_secs))
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors))
        .layer(middleware::catch_panic_layer())
}

async fn root() -> &'static str {
    "Welcome to the home page!"
}

async fn health_check(State(pool): State<SqlitePool>) -> Result<Response, StatusCode> {
    match db::health_check(&pool).await {
        Ok(()) => Ok((
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "database": "connected"
            })),
        )
            .into_response()),
        Err(e) => {
            tracing::error!("Database health check failed: {:?}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        },
    }
}

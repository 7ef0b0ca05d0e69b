//! Middleware for the FIDE server
//!
//! - CORS
//! - request logging with tracing
//! - per-request timeout
//! - panic recovery

use axum::http::{header, HeaderValue, Method};
use std::time::Duration;
use tower_http::{
    catch_panic::CatchPanicLayer,
    classify::{ServerErrorsAsFailures, SharedClassifier},
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::Level;

use crate::config::CorsConfig;

pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    let wildcard =
        config.allowed_origins.is_empty() || config.allowed_origins.iter().any(|o| o == "*");

    // Credentials cannot be combined with a wildcard origin
    if wildcard {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    cors.allow_origin(origins)
        .allow_credentials(config.allow_credentials)
}

pub fn tracing_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Micros),
        )
}

/// Requests running longer than `secs` get `408 Request Timeout`
pub fn timeout_layer(secs: u64) -> TimeoutLayer {
    TimeoutLayer::new(Duration::from_secs(secs))
}

/// A panicking handler yields `500` instead of dropping the connection
pub fn catch_panic_layer() -> CatchPanicLayer<tower_http::catch_panic::DefaultResponseForPanic> {
    CatchPanicLayer::new()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{HeaderMap, Request},
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    async fn preflight(config: &CorsConfig, origin: &str) -> HeaderMap {
        let app = Router::new()
            .route("/players/:player_id", get(|| async { "ok" }))
            .layer(cors_layer(config));

        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/players/1503014")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .body(Body::empty())
            .unwrap();

        app.oneshot(request).await.unwrap().headers().clone()
    }

    fn specific_origins() -> CorsConfig {
        CorsConfig {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "https://ratings.example.org".to_string(),
            ],
            allow_credentials: true,
        }
    }

    #[tokio::test]
    async fn test_listed_origin_is_echoed_with_credentials() {
        let headers = preflight(&specific_origins(), "https://ratings.example.org").await;

        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://ratings.example.org"
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
        let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
        assert!(methods.contains("GET"));
    }

    #[tokio::test]
    async fn test_unlisted_origin_gets_no_allow_origin() {
        let headers = preflight(&specific_origins(), "https://elsewhere.example.com").await;

        assert!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[tokio::test]
    async fn test_wildcard_drops_credentials() {
        let config = CorsConfig {
            allowed_origins: vec!["*".to_string()],
            allow_credentials: true,
        };

        let headers = preflight(&config, "https://ratings.example.org").await;

        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert!(headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).is_none());
    }

    #[tokio::test]
    async fn test_empty_origins_allow_any() {
        let config = CorsConfig {
            allowed_origins: vec![],
            allow_credentials: false,
        };

        let headers = preflight(&config, "http://localhost:8080").await;

        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "3600");
    }
}

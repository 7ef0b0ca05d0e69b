//! HTTP tests for the full router, middleware included

use axum::http::StatusCode;
use serde_json::json;
use sqlx::SqlitePool;

mod common;

use common::{get, get_json, insert_player, test_app};

#[sqlx::test(migrations = "../../migrations")]
async fn test_root_welcome_text(pool: SqlitePool) {
    let (status, body) = get(test_app(pool), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"Welcome to the home page!");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_health_check(pool: SqlitePool) {
    let (status, body) = get_json(test_app(pool), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy", "database": "connected"}));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_health_check_unavailable_when_pool_closed(pool: SqlitePool) {
    let app = test_app(pool.clone());
    pool.close().await;

    let (status, _) = get(app, "/health").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_get_player(pool: SqlitePool) {
    insert_player(&pool, 1503014, "Carlsen, Magnus", "NOR", 2830).await;

    let (status, body) = get_json(test_app(pool), "/players/1503014").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["fideid"], 1503014);
    assert_eq!(body["data"]["name"], "Carlsen, Magnus");
    assert_eq!(body["data"]["country"], "NOR");
    assert_eq!(body["data"]["rating"], 2830);
    assert_eq!(body["data"]["title"], "");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_unknown_and_malformed_ids_share_not_found(pool: SqlitePool) {
    insert_player(&pool, 1503014, "Carlsen, Magnus", "NOR", 2830).await;

    let expected = json!({
        "success": false,
        "error": {"code": "NOT_FOUND", "message": "Resource not found."}
    });

    for uri in ["/players/1", "/players/carlsen", "/players/1503014x"] {
        let (status, body) = get_json(test_app(pool.clone()), uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body, expected, "{}", uri);
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_unknown_route(pool: SqlitePool) {
    let (status, _) = get(test_app(pool), "/players").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

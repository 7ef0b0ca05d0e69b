//! Shared helpers for server integration tests

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use fide_server::{api::create_router, Config};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

pub fn test_app(pool: SqlitePool) -> Router {
    create_router(pool, &Config::default())
}

/// Issue a GET request and return the status with the raw body
pub async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

pub async fn insert_player(pool: &SqlitePool, fide_id: i64, name: &str, country: &str, rating: i64) {
    sqlx::query("INSERT INTO player (fideid, name, country, rating, games) VALUES (?, ?, ?, ?, 1)")
        .bind(fide_id)
        .bind(name)
        .bind(country)
        .bind(rating)
        .execute(pool)
        .await
        .unwrap();
}

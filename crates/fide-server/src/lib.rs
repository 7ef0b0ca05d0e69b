//! FIDE Server Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Read-only HTTP lookup of players loaded by `fide-ingest`.
//!
//! # Routes
//!
//! - `GET /` - welcome text
//! - `GET /health` - database connectivity
//! - `GET /players/:player_id` - one player by FIDE id
//!
//! Feature slices live under [`features`]; each owns its queries and routes.
//! The router is built by [`api::create_router`] over a shared `SqlitePool`.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod features;
pub mod middleware;

pub use config::Config;
pub use error::{AppError, AppResult};

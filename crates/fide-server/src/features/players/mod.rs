//! Player lookup feature
//!
//! - `queries/` - read operations against the `player` table
//! - `routes.rs` - HTTP handlers and the [`routes::LoadedPlayer`] extractor

pub mod queries;
pub mod routes;

pub use routes::players_routes;

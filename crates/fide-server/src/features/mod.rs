//! Feature slices of the FIDE API
//!
//! Each feature owns its queries and routes:
//!
//! - **players**: lookup of a single player by FIDE id

pub mod players;

use axum::Router;
use sqlx::SqlitePool;

/// Mount every feature router under its path prefix
pub fn router() -> Router<SqlitePool> {
    Router::new().nest("/players", players::players_routes())
}

//! Player API routes
//!
//! - `GET /players/:player_id` - Get a single player by FIDE id
//!
//! The player is loaded by the [`LoadedPlayer`] extractor before the handler
//! runs, so handlers receive a typed record. Unknown and unparsable ids are
//! both answered with `404 NOT_FOUND`.

use crate::api::response::{ApiResponse, ErrorResponse};
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Path},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use fide_common::PlayerRecord;
use sqlx::SqlitePool;

use super::queries::{get_player, GetPlayerError, GetPlayerQuery};

pub fn players_routes() -> Router<SqlitePool> {
    Router::new().route("/:player_id", get(get_player_handler))
}

/// A player resolved from the `:player_id` path segment
#[derive(Debug, Clone)]
pub struct LoadedPlayer(pub PlayerRecord);

#[async_trait]
impl<S> FromRequestParts<S> for LoadedPlayer
where
    SqlitePool: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = PlayerApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw_id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| PlayerApiError::MalformedId(rejection.body_text()))?;

        let fide_id = raw_id
            .parse::<u64>()
            .map_err(|_| PlayerApiError::MalformedId(raw_id.clone()))?;

        let pool = SqlitePool::from_ref(state);
        let player = get_player(&pool, GetPlayerQuery { fide_id }).await?;

        Ok(Self(player))
    }
}

/// Get a player
///
/// - `200 OK` - `{"success": true, "data": {<player>}}`
/// - `404 Not Found` - unknown or malformed id
/// - `500 Internal Server Error` - database error
async fn get_player_handler(LoadedPlayer(player): LoadedPlayer) -> Response {
    tracing::debug!(fide_id = player.fide_id, "Player retrieved via API");
    ApiResponse::success(player).into_response()
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum PlayerApiError {
    MalformedId(String),
    Get(GetPlayerError),
}

impl From<GetPlayerError> for PlayerApiError {
    fn from(err: GetPlayerError) -> Self {
        Self::Get(err)
    }
}

impl std::fmt::Display for PlayerApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerApiError::MalformedId(raw) => write!(f, "Malformed player id '{}'", raw),
            PlayerApiError::Get(e) => write!(f, "{}", e),
        }
    }
}

impl IntoResponse for PlayerApiError {
    fn into_response(self) -> Response {
        match self {
            PlayerApiError::MalformedId(_) | PlayerApiError::Get(GetPlayerError::NotFound(_)) => {
                tracing::debug!("{}", self);
                ErrorResponse::new("NOT_FOUND", "Resource not found.")
                    .with_status(StatusCode::NOT_FOUND)
            },
            PlayerApiError::Get(GetPlayerError::Database(_)) => {
                tracing::error!("Database error during player lookup: {}", self);
                ErrorResponse::new("INTERNAL_ERROR", "A database error occurred")
                    .with_status(StatusCode::INTERNAL_SERVER_ERROR)
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn call(pool: SqlitePool, uri: &str) -> (StatusCode, Value) {
        let app = Router::new()
            .nest("/players", players_routes())
            .with_state(pool);

        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn not_found_body() -> Value {
        json!({
            "success": false,
            "error": {"code": "NOT_FOUND", "message": "Resource not found."}
        })
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_found_player(pool: SqlitePool) -> sqlx::Result<()> {
        sqlx::query("INSERT INTO player (fideid, name, country, games) VALUES (7, 'Seven', 'ITA', 3)")
            .execute(&pool)
            .await?;

        let (status, body) = call(pool, "/players/7").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["fideid"], 7);
        assert_eq!(body["data"]["name"], "Seven");
        assert_eq!(body["data"]["country"], "ITA");
        assert_eq!(body["data"]["games"], 3);
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_unknown_player(pool: SqlitePool) -> sqlx::Result<()> {
        let (status, body) = call(pool, "/players/999").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, not_found_body());
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_malformed_ids_are_not_found(pool: SqlitePool) -> sqlx::Result<()> {
        for uri in ["/players/abc", "/players/-1", "/players/99999999999999999999999"] {
            let (status, body) = call(pool.clone(), uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
            assert_eq!(body, not_found_body(), "{}", uri);
        }
        Ok(())
    }

    #[sqlx::test(migrations = false)]
    async fn test_database_failure_is_internal_error(pool: SqlitePool) -> sqlx::Result<()> {
        let (status, body) = call(pool, "/players/7").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
        Ok(())
    }
}

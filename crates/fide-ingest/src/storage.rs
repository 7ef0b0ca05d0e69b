//! Player store operations used by the ingestion run
//!
//! Every function takes an explicit connection so a run owns exactly one
//! connection from reset to final count.

use crate::error::{IngestError, Result};
use fide_common::PlayerRecord;
use serde::Serialize;
use sqlx::{
    migrate::Migrator,
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    SqliteConnection,
};
use std::collections::VecDeque;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Schema migrations shared with the lookup server
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

pub const DELETE_SQL: &str = "DELETE FROM player";

pub const VACUUM_SQL: &str = "VACUUM";

pub const INSERT_SQL: &str = r#"
    INSERT INTO player (
        fideid, name, country, sex,
        title, w_title, o_title, foa_title,
        rating, games, k,
        rapid_rating, rapid_games, rapid_k,
        blitz_rating, blitz_games, blitz_k,
        birthday, flag
    )
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
"#;

pub const COUNT_SQL: &str = "SELECT COUNT(*) FROM player";

const BEGIN_SQL: &str = "BEGIN";
const COMMIT_SQL: &str = "COMMIT";
const ROLLBACK_SQL: &str = "ROLLBACK";
const SAVEPOINT_SQL: &str = "SAVEPOINT player_row";
const RELEASE_SQL: &str = "RELEASE player_row";
const ROLLBACK_TO_SQL: &str = "ROLLBACK TO player_row";

/// A record that was admissible but could not be inserted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowFailure {
    pub fide_id: u64,
    pub reason: String,
}

/// Result of the bulk load step
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    pub inserted: u64,
    pub failed: Vec<RowFailure>,
}

/// Build a pool for the ingestion run without opening a connection yet
///
/// The database file is created on first use. A run only ever needs one
/// connection.
pub fn connect_lazy(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    Ok(SqlitePoolOptions::new()
        .max_connections(1)
        .connect_lazy_with(options))
}

/// Apply pending schema migrations on the run's connection
pub async fn migrate(conn: &mut SqliteConnection) -> Result<()> {
    MIGRATOR.run(&mut *conn).await?;
    Ok(())
}

/// Store refresher: remove every row, then reclaim the freed space
///
/// Either statement failing is a [`IngestError::StoreReset`]; callers must not
/// insert after it.
#[tracing::instrument(skip_all)]
pub async fn refresh(conn: &mut SqliteConnection) -> Result<()> {
    let deleted = sqlx::query(DELETE_SQL)
        .execute(&mut *conn)
        .await
        .map_err(IngestError::StoreReset)?
        .rows_affected();

    sqlx::query(VACUUM_SQL)
        .execute(&mut *conn)
        .await
        .map_err(IngestError::StoreReset)?;

    info!(deleted, "Player table reset");
    Ok(())
}

/// Bulk loader: insert each record with the same prepared statement
///
/// Inserts share one transaction and each runs under its own savepoint, so a
/// failing insert only undoes itself, gets logged with the offending id and
/// the load continues. When SQLite discards the whole transaction instead
/// (`RAISE(ROLLBACK)`, full disk), the rows it held are replayed in a fresh
/// one. A failure to begin or commit is fatal and leaves no transaction open.
#[tracing::instrument(skip_all)]
pub async fn load_players<'r, I>(conn: &mut SqliteConnection, records: I) -> Result<LoadOutcome>
where
    I: IntoIterator<Item = &'r PlayerRecord>,
{
    let mut pending: VecDeque<&'r PlayerRecord> = records.into_iter().collect();

    let result = load_pending(conn, &mut pending).await;
    if result.is_err() {
        // Nothing to undo when SQLite already closed the transaction
        let _ = execute(conn, ROLLBACK_SQL).await;
    }

    let outcome = result?;
    debug!(
        inserted = outcome.inserted,
        failed = outcome.failed.len(),
        "Bulk load committed"
    );
    Ok(outcome)
}

async fn load_pending<'r>(
    conn: &mut SqliteConnection,
    pending: &mut VecDeque<&'r PlayerRecord>,
) -> Result<LoadOutcome> {
    let mut failed = Vec::new();
    // Rows held by the open transaction, replayed if SQLite drops it
    let mut uncommitted: Vec<&'r PlayerRecord> = Vec::with_capacity(pending.len());

    execute(conn, BEGIN_SQL).await?;

    while let Some(record) = pending.pop_front() {
        execute(conn, SAVEPOINT_SQL).await?;

        match insert_player(conn, record).await {
            Ok(()) => {
                execute(conn, RELEASE_SQL).await?;
                uncommitted.push(record);
            },
            Err(source) => {
                let err = IngestError::RowInsert {
                    fide_id: record.fide_id,
                    source,
                };
                warn!(fide_id = record.fide_id, error = %err, "Player insert failed, continuing");
                failed.push(RowFailure {
                    fide_id: record.fide_id,
                    reason: err.to_string(),
                });

                if execute(conn, ROLLBACK_TO_SQL).await.is_ok() {
                    execute(conn, RELEASE_SQL).await?;
                } else {
                    warn!(
                        replayed = uncommitted.len(),
                        "Load transaction was rolled back, replaying its rows"
                    );
                    for replay in uncommitted.drain(..).rev() {
                        pending.push_front(replay);
                    }
                    execute(conn, BEGIN_SQL).await?;
                }
            },
        }
    }

    execute(conn, COMMIT_SQL).await?;

    Ok(LoadOutcome {
        inserted: uncommitted.len() as u64,
        failed,
    })
}

async fn execute(conn: &mut SqliteConnection, sql: &str) -> std::result::Result<(), sqlx::Error> {
    sqlx::query(sql).execute(&mut *conn).await?;
    Ok(())
}

async fn insert_player(
    conn: &mut SqliteConnection,
    p: &PlayerRecord,
) -> std::result::Result<(), sqlx::Error> {
    let fide_id = i64::try_from(p.fide_id).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

    sqlx::query(INSERT_SQL)
        // FIDE id
        .bind(fide_id)
        // Basic info
        .bind(&p.name)
        .bind(&p.country)
        .bind(&p.sex)
        // Titles
        .bind(&p.title)
        .bind(&p.w_title)
        .bind(&p.o_title)
        .bind(&p.foa_title)
        // Standard
        .bind(i64::from(p.rating))
        .bind(i64::from(p.games))
        .bind(i64::from(p.k))
        // Rapid
        .bind(i64::from(p.rapid_rating))
        .bind(i64::from(p.rapid_games))
        .bind(i64::from(p.rapid_k))
        // Blitz
        .bind(i64::from(p.blitz_rating))
        .bind(i64::from(p.blitz_games))
        .bind(i64::from(p.blitz_k))
        // Extra info
        .bind(i64::from(p.birthday))
        .bind(&p.flag)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

/// Load reporter: number of rows actually in the player table
pub async fn count_players(conn: &mut SqliteConnection) -> Result<u64> {
    let count: i64 = sqlx::query_scalar(COUNT_SQL).fetch_one(&mut *conn).await?;
    Ok(u64::try_from(count).unwrap_or_default())
}

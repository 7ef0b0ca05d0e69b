//! Ingestion run orchestration
//!
//! load -> decode -> filter -> (connection) migrate -> refresh -> insert -> count
//!
//! The store connection is acquired only once the feed has decoded, so an
//! unreadable or malformed feed never touches the store. The connection is
//! returned to the pool when the run ends, on success or error.

use crate::config::IngestConfig;
use crate::error::Result;
use crate::filter::{self, Rejection};
use crate::loader::load_feed;
use crate::parser::FeedParser;
use crate::storage::{self, RowFailure};
use fide_common::{PlayerFeedDocument, PlayerRecord};
use serde::Serialize;
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A record dropped by the validation filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skipped {
    pub fide_id: u64,
    pub reason: Rejection,
}

/// What one ingestion run did
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadSummary {
    /// Records in the decoded feed
    pub decoded: usize,
    /// Records that passed the validation filter
    pub admissible: usize,
    /// Rows in the player table after the run, counted by the store
    pub persisted: u64,
    pub skipped: Vec<Skipped>,
    pub failed: Vec<RowFailure>,
}

impl LoadSummary {
    pub fn skipped_ids(&self) -> Vec<u64> {
        self.skipped.iter().map(|s| s.fide_id).collect()
    }

    pub fn failed_ids(&self) -> Vec<u64> {
        self.failed.iter().map(|f| f.fide_id).collect()
    }
}

/// One full-refresh ingestion of a feed file into the player store
pub struct FeedPipeline {
    db: SqlitePool,
    feed_path: PathBuf,
}

impl FeedPipeline {
    pub fn new(db: SqlitePool, feed_path: impl AsRef<Path>) -> Self {
        Self {
            db,
            feed_path: feed_path.as_ref().to_path_buf(),
        }
    }

    pub fn from_config(db: SqlitePool, config: &IngestConfig) -> Self {
        Self::new(db, &config.feed_path)
    }

    pub fn feed_path(&self) -> &Path {
        &self.feed_path
    }

    /// Run the whole pipeline once
    ///
    /// Fatal errors (unreadable feed, malformed feed, failed reset, lost
    /// connection) are returned. Skipped records and failed inserts are
    /// reported in the summary.
    #[tracing::instrument(skip(self), fields(feed = %self.feed_path.display()))]
    pub async fn run(&self) -> Result<LoadSummary> {
        let content = load_feed(&self.feed_path).await?;
        let document = FeedParser::parse(&content)?;
        drop(content);

        info!(players = document.len(), "Feed decoded");

        let decoded = document.len();
        let (admissible, skipped) = partition(document);

        let mut conn = self.db.acquire().await?;

        storage::migrate(&mut conn).await?;
        storage::refresh(&mut conn).await?;
        let outcome = storage::load_players(&mut conn, &admissible).await?;
        let persisted = storage::count_players(&mut conn).await?;

        info!("Total n. player(s) loaded : {}", persisted);

        Ok(LoadSummary {
            decoded,
            admissible: admissible.len(),
            persisted,
            skipped,
            failed: outcome.failed,
        })
    }
}

/// Split a document into admissible records and skip notices, in feed order
fn partition(document: PlayerFeedDocument) -> (Vec<PlayerRecord>, Vec<Skipped>) {
    let mut admissible = Vec::with_capacity(document.len());
    let mut skipped = Vec::new();

    for record in document {
        match filter::check(&record) {
            Ok(()) => admissible.push(record),
            Err(reason) => {
                warn!(
                    fide_id = record.fide_id,
                    %reason,
                    "Skip player FIDE ID {} by having either Name or Games field empty",
                    record.fide_id
                );
                skipped.push(Skipped {
                    fide_id: record.fide_id,
                    reason,
                });
            },
        }
    }

    (admissible, skipped)
}

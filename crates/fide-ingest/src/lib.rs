//! FIDE Ingest Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Loads the federation's XML player list into the `player` table.
//!
//! # Pipeline
//!
//! One run is a single sequential pass:
//!
//! 1. [`loader`] reads the feed file (unwrapping `.zip` / `.gz` archives)
//! 2. [`parser`] decodes it into a [`PlayerFeedDocument`](fide_common::PlayerFeedDocument)
//! 3. [`filter`] drops records without a name or without rated games
//! 4. [`storage`] resets the table, inserts every admissible record and
//!    counts what actually persisted
//!
//! A failure in steps 1-2 leaves the store untouched. Row-level insert
//! failures are collected and the run continues.
//!
//! # Example
//!
//! ```no_run
//! use fide_ingest::{config::IngestConfig, pipeline::FeedPipeline, storage};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = IngestConfig::default();
//!     let pool = storage::connect_lazy(&config.database_url)?;
//!     let summary = FeedPipeline::new(pool, &config.feed_path).run().await?;
//!     println!("{} players loaded", summary.persisted);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod parser;
pub mod pipeline;
pub mod storage;

pub use error::{IngestError, Result};
pub use pipeline::{FeedPipeline, LoadSummary};

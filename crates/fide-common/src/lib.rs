//! FIDE Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, logging and error handling for the FIDE ratings workspace.
//!
//! # Overview
//!
//! - **Types**: the player record and the feed document that wraps it
//! - **Error Handling**: shared error and result types
//! - **Logging**: tracing subscriber setup used by every binary
//!
//! # Example
//!
//! ```
//! use fide_common::types::PlayerRecord;
//!
//! let player = PlayerRecord {
//!     fide_id: 1503014,
//!     name: "Carlsen, Magnus".to_string(),
//!     games: 9,
//!     ..Default::default()
//! };
//! assert!(player.is_admissible());
//! ```

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{FideError, Result};
pub use types::{PlayerFeedDocument, PlayerRecord};

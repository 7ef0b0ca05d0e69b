//! Validation filter
//!
//! The feed carries placeholder and long-inactive entries with a blank name
//! or no rated games. Those are skipped, never persisted, and never abort a
//! run.

use fide_common::PlayerRecord;
use serde::Serialize;

/// Why a record was not admitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    #[error("name is empty")]
    EmptyName,
    #[error("no rated games")]
    NoGames,
}

/// Check a single record; the name is tested first
pub fn check(record: &PlayerRecord) -> Result<(), Rejection> {
    if record.name.is_empty() {
        return Err(Rejection::EmptyName);
    }
    if record.games == 0 {
        return Err(Rejection::NoGames);
    }
    Ok(())
}

pub fn is_admissible(record: &PlayerRecord) -> bool {
    check(record).is_ok()
}

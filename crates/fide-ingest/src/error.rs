//! Error types for feed ingestion

use std::path::PathBuf;

/// Result type for ingestion operations
pub type Result<T> = std::result::Result<T, IngestError>;

/// Everything that can go wrong during an ingestion run
///
/// All variants except `RowInsert` are fatal for the run. `RowInsert` is
/// logged and collected into the run summary instead of being returned.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Failed to read feed {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Failed to reset player table: {0}")]
    StoreReset(#[source] sqlx::Error),

    #[error("Failed to insert player {fide_id}: {source}")]
    RowInsert {
        fide_id: u64,
        #[source]
        source: sqlx::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<quick_xml::de::DeError> for IngestError {
    fn from(err: quick_xml::de::DeError) -> Self {
        IngestError::Parse(err.to_string())
    }
}

impl From<quick_xml::Error> for IngestError {
    fn from(err: quick_xml::Error) -> Self {
        IngestError::Parse(err.to_string())
    }
}

impl From<std::str::Utf8Error> for IngestError {
    fn from(err: std::str::Utf8Error) -> Self {
        IngestError::Parse(format!("feed is not valid UTF-8: {}", err))
    }
}

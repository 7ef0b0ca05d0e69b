//! Ingestion configuration

use crate::error::{IngestError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Feed file name as published by the federation.
pub const DEFAULT_FEED_PATH: &str = "players_list_xml_foa.xml";

/// Default store location for local runs.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://fide.db";

/// Settings for one ingestion run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Feed file (plain XML, `.zip` or `.gz`)
    pub feed_path: PathBuf,
    /// SQLite connection string of the player store
    pub database_url: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            feed_path: PathBuf::from(DEFAULT_FEED_PATH),
            database_url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

impl IngestConfig {
    pub fn new(feed_path: impl Into<PathBuf>, database_url: impl Into<String>) -> Self {
        Self {
            feed_path: feed_path.into(),
            database_url: database_url.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.feed_path.as_os_str().is_empty() {
            return Err(IngestError::Config("Feed path cannot be empty".to_string()));
        }

        if self.database_url.trim().is_empty() {
            return Err(IngestError::Config("Database URL cannot be empty".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IngestConfig::default();
        assert_eq!(config.feed_path, PathBuf::from("players_list_xml_foa.xml"));
        assert_eq!(config.database_url, "sqlite://fide.db");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_values() {
        let config = IngestConfig::new("", "sqlite://fide.db");
        assert!(matches!(config.validate(), Err(IngestError::Config(_))));

        let config = IngestConfig::new("feed.xml", "  ");
        assert!(matches!(config.validate(), Err(IngestError::Config(_))));
    }
}

//! Feed loader
//!
//! Reads the whole feed into memory. The federation publishes the player list
//! as a zip archive and some mirrors re-publish it gzipped, so the loader
//! unwraps those by file extension before handing the XML bytes on.

use crate::error::{IngestError, Result};
use flate2::read::GzDecoder;
use std::io::{self, Cursor, Read};
use std::path::Path;
use tracing::{debug, info};

/// How the feed file is packaged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedEncoding {
    Plain,
    Gzip,
    Zip,
}

impl FeedEncoding {
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("gz") => FeedEncoding::Gzip,
            Some("zip") => FeedEncoding::Zip,
            _ => FeedEncoding::Plain,
        }
    }
}

/// Read the complete feed content from `path`
///
/// Either the full XML document is returned or an [`IngestError::Io`]; a
/// corrupt archive counts as an unreadable feed.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub async fn load_feed(path: &Path) -> Result<Vec<u8>> {
    let io_error = |source: io::Error| IngestError::Io {
        path: path.to_path_buf(),
        source,
    };

    let raw = tokio::fs::read(path).await.map_err(io_error)?;
    let encoding = FeedEncoding::from_path(path);
    debug!(bytes = raw.len(), ?encoding, "Read feed file");

    let content = unwrap_archive(encoding, raw).map_err(io_error)?;
    info!(bytes = content.len(), "Feed loaded");

    Ok(content)
}

fn unwrap_archive(encoding: FeedEncoding, raw: Vec<u8>) -> io::Result<Vec<u8>> {
    match encoding {
        FeedEncoding::Plain => Ok(raw),
        FeedEncoding::Gzip => decompress_gzip(&raw),
        FeedEncoding::Zip => extract_xml_from_zip(&raw),
    }
}

fn decompress_gzip(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(data);
    let mut decompressed = Vec::new();
    decoder.read_to_end(&mut decompressed)?;
    debug!("Decompressed {} -> {} bytes", data.len(), decompressed.len());
    Ok(decompressed)
}

/// Return the first `.xml` entry of a zip archive
fn extract_xml_from_zip(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        if entry.is_dir() || !entry.name().to_ascii_lowercase().ends_with(".xml") {
            continue;
        }

        let mut contents = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or(0));
        entry.read_to_end(&mut contents)?;
        debug!(entry = entry.name(), bytes = contents.len(), "Extracted feed from zip");
        return Ok(contents);
    }

    Err(io::Error::new(
        io::ErrorKind::NotFound,
        "zip archive contains no .xml entry",
    ))
}

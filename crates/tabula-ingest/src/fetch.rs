//! Download-once caching of remote sources.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tracing::{debug, info};

use crate::error::{IngestError, Result};

/// Ensures `dest` holds the content of `url`, fetching at most once.
///
/// If `dest` already exists it is returned untouched, so repeated pipeline
/// runs never re-download. URLs ending in `.gz` are decompressed before
/// writing, so the cache always holds the plain delimited file.
pub fn ensure_cached(url: &str, dest: &Path) -> Result<PathBuf> {
    if dest.exists() {
        debug!(dest = %dest.display(), "cache hit, skipping fetch");
        return Ok(dest.to_path_buf());
    }
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|source| IngestError::FileAccess {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    info!(url, dest = %dest.display(), "fetching source");
    let fetch_error = |message: String| IngestError::Fetch {
        url: url.to_string(),
        message,
    };
    let response = reqwest::blocking::get(url)
        .map_err(|e| fetch_error(e.to_string()))?
        .error_for_status()
        .map_err(|e| fetch_error(e.to_string()))?;
    let body = response.bytes().map_err(|e| fetch_error(e.to_string()))?;

    let data = if url.ends_with(".gz") {
        let mut decoded = Vec::new();
        GzDecoder::new(body.as_ref())
            .read_to_end(&mut decoded)
            .map_err(|e| fetch_error(format!("gzip decode: {e}")))?;
        decoded
    } else {
        body.to_vec()
    };
    fs::write(dest, data).map_err(|source| IngestError::FileAccess {
        path: dest.to_path_buf(),
        source,
    })?;
    Ok(dest.to_path_buf())
}

//! Loading the URL list

use std::path::Path;
use tokio::fs;
use tracing::debug;

use crate::submitter::core::{Result, SubmitError};

/// Read a JSON array of URL strings from `path`
///
/// `limit` keeps only the first N URLs. `Some(0)` is treated like `None`
/// and keeps the whole list.
pub async fn load_urls<P: AsRef<Path>>(path: P, limit: Option<usize>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let bytes = fs::read(path).await.map_err(|e| SubmitError::InputFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut urls: Vec<String> = serde_json::from_slice(&bytes).map_err(|e| SubmitError::InputFormat {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!("Loaded {} URLs from {}", urls.len(), path.display());

    if let Some(limit) = limit.filter(|&n| n > 0) {
        urls.truncate(limit);
    }

    Ok(urls)
}

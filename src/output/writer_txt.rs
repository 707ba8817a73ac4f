use std::path::{Path, PathBuf};

use crate::error::{FinderError, Result};
use crate::findings::Bucket;

/// Write a bucket as a newline-separated list into `dir/<bucket.file>`.
pub async fn write_bucket(dir: &Path, bucket: &Bucket) -> Result<PathBuf> {
    let path = dir.join(bucket.file);
    tokio::fs::write(&path, bucket.values.join("\n"))
        .await
        .map_err(|source| FinderError::Write { path: path.clone(), source })?;
    Ok(path)
}

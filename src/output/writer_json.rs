use std::path::Path;

use serde::Serialize;

use crate::error::{FinderError, Result};

/// Write `items` as a pretty-printed JSON list.
pub async fn write_json<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
    let data = serde_json::to_vec_pretty(items)?;
    tokio::fs::write(path, data)
        .await
        .map_err(|source| FinderError::Write { path: path.to_path_buf(), source })
}

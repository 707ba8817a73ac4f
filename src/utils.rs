use std::fs;
use std::path::Path;

use crate::error::{FinderError, Result};

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|source| FinderError::Write { path: path.to_path_buf(), source })?;
    }
    Ok(())
}

/// Read a recon feed. Invalid UTF-8 is replaced rather than rejected.
pub fn read_input(path: &Path) -> Result<String> {
    let data = fs::read(path).map_err(|source| FinderError::Read { path: path.to_path_buf(), source })?;
    Ok(String::from_utf8_lossy(&data).into_owned())
}

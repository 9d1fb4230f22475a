use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Pretty JSON with 2-space indent. Non-ASCII is emitted literally, keys keep insertion order.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

pub fn write_json_to_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let write_err = |source: io::Error| Error::Write {
        path: path.to_path_buf(),
        source,
    };
    let s = to_pretty_json(value).map_err(|e| write_err(io::Error::other(e)))?;
    fs::write(path, &s).map_err(write_err)?;
    debug!(path = %path.display(), bytes = s.len(), "wrote json");
    Ok(())
}

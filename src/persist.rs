//! Disk I/O helpers: tolerant load and atomic write of a collection document.
//!
//! The rename-over approach is close to atomic on most platforms. On FAT32 or
//! network shares there are no hard guarantees.

use crate::error::{Error, Result};
use crate::serializer::Serializer;
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, warn};

/// Reads and decodes the document at `path`.
///
/// Never fails: a missing or empty file is the normal "no data yet" state and
/// yields `[]`. Anything else that goes wrong (unreadable file, malformed
/// JSON, directory can't be created) also yields `[]`, with a warning naming
/// the path and the underlying error.
pub fn load<T, S>(path: &Path, serializer: &S) -> Vec<T>
where
    T: DeserializeOwned,
    S: Serializer,
{
    if let Some(dir) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(dir) {
            warn!(path = %path.display(), error = %e, "could not create data directory, treating collection as empty");
            return Vec::new();
        }
    }
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "collection file not found, starting empty");
            return Vec::new();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read collection file, treating as empty");
            return Vec::new();
        }
    };
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Vec::new();
    }
    match serializer.deserialize(&bytes) {
        Ok(records) => records,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "malformed collection file, treating as empty");
            Vec::new()
        }
    }
}

/// Write `bytes` to `<path>.tmp` and then rename over `path`, creating the
/// parent directory first. A crash mid-write leaves the old document intact.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| Error::Io(e.to_string()))?;
    }
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
    let tmp = path.with_extension(format!("{ext}.tmp"));
    std::fs::write(&tmp, bytes).map_err(|e| Error::Io(e.to_string()))?;
    std::fs::rename(&tmp, path).map_err(|e| Error::Io(e.to_string()))?;
    Ok(())
}

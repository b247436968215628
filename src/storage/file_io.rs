//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{TrackerError, TrackerResult};

/// Read JSON from a file, returning a default value if the file doesn't exist
///
/// A file that exists but cannot be opened or parsed is reported as
/// `StorageCorrupt`; it is never replaced by the default.
pub fn read_json<T, P>(path: P) -> TrackerResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| TrackerError::storage_corrupt(path, format!("failed to open: {}", e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| TrackerError::storage_corrupt(path, e))
}

/// Write JSON to a file atomically (write to temp, then rename)
///
/// Readers see either the previous file or the complete new one, never a
/// partial write.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> TrackerResult<()>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            TrackerError::storage_write(
                path,
                format!("failed to create directory {}: {}", parent.display(), e),
            )
        })?;
    }

    // Temp file must live in the same directory for the rename to be atomic
    let temp_path = temp_path_for(path);

    let result = write_temp_file(&temp_path, data).and_then(|()| {
        fs::rename(&temp_path, path).map_err(|e| format!("failed to rename temp file: {}", e))
    });

    result.map_err(|reason| {
        let _ = fs::remove_file(&temp_path);
        TrackerError::storage_write(path, reason)
    })
}

fn write_temp_file<T: Serialize + ?Sized>(temp_path: &Path, data: &T) -> Result<(), String> {
    let file =
        File::create(temp_path).map_err(|e| format!("failed to create temp file: {}", e))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| format!("failed to serialize data: {}", e))?;

    writer
        .flush()
        .map_err(|e| format!("failed to flush data: {}", e))?;

    // Sync to disk before rename
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| format!("failed to sync data: {}", e))?;

    Ok(())
}

/// `expenses.json` -> `expenses.json.tmp`
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("ledger"));
    name.push(".tmp");
    path.with_file_name(name)
}

//! Append-only audit log
//!
//! One JSON object per line. A batch of entries goes out in a single write.
//! Reading is forgiving: a line that does not parse is skipped with a
//! warning, so one damaged line never hides the rest of the history.

use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{TrackerError, TrackerResult};

use super::entry::AuditEntry;

/// Writes and reads the audit log next to the ledger file
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
        }
    }

    /// Append one entry
    pub fn log(&self, entry: &AuditEntry) -> TrackerResult<()> {
        self.log_batch(std::slice::from_ref(entry))
    }

    /// Append `entries` with a single write
    pub fn log_batch(&self, entries: &[AuditEntry]) -> TrackerResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut buffer = Vec::new();
        for entry in entries {
            serde_json::to_writer(&mut buffer, entry)?;
            buffer.push(b'\n');
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| self.io_error("open", e))?;
        file.write_all(&buffer)
            .map_err(|e| self.io_error("append to", e))?;

        Ok(())
    }

    /// Every readable entry, oldest first
    pub fn read_all(&self) -> TrackerResult<Vec<AuditEntry>> {
        let mut entries = Vec::new();
        self.scan(|entry| entries.push(entry))?;
        Ok(entries)
    }

    /// The last `count` readable entries, oldest first
    ///
    /// Streams the log and keeps no more than `count` entries in memory.
    pub fn read_recent(&self, count: usize) -> TrackerResult<Vec<AuditEntry>> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let mut recent = VecDeque::with_capacity(count.min(64));
        self.scan(|entry| {
            if recent.len() == count {
                recent.pop_front();
            }
            recent.push_back(entry);
        })?;

        Ok(recent.into())
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    fn scan(&self, mut visit: impl FnMut(AuditEntry)) -> TrackerResult<()> {
        let file = match File::open(&self.log_path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(self.io_error("open", e)),
        };

        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| self.io_error("read", e))?;
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(entry) => visit(entry),
                Err(e) => tracing::warn!(
                    path = %self.log_path.display(),
                    line = idx + 1,
                    error = %e,
                    "skipping malformed audit entry"
                ),
            }
        }

        Ok(())
    }

    fn io_error(&self, action: &str, err: io::Error) -> TrackerError {
        TrackerError::Io(format!(
            "Failed to {} audit log {}: {}",
            action,
            self.log_path.display(),
            err
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_logger() -> (TempDir, AuditLogger) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("expenses.audit.log"));
        (temp_dir, logger)
    }

    fn create(position: usize) -> AuditEntry {
        AuditEntry::new(Operation::Create, position, &json!({}))
    }

    #[test]
    fn test_missing_log_reads_empty() {
        let (_temp_dir, logger) = create_test_logger();
        assert!(logger.read_all().unwrap().is_empty());
        assert!(logger.read_recent(5).unwrap().is_empty());
    }

    #[test]
    fn test_log_and_read() {
        let (_temp_dir, logger) = create_test_logger();

        logger
            .log(&AuditEntry::new(Operation::Create, 1, &json!({"amount": 1.5})))
            .unwrap();
        logger
            .log_batch(&[
                AuditEntry::new(Operation::Import, 2, &json!({})),
                AuditEntry::new(Operation::Import, 3, &json!({})),
            ])
            .unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[2].position, 3);

        let contents = std::fs::read_to_string(logger.path()).unwrap();
        assert_eq!(contents.lines().count(), 3);
        assert!(contents.ends_with('\n'));
    }

    #[test]
    fn test_read_recent() {
        let (_temp_dir, logger) = create_test_logger();
        for i in 1..=5 {
            logger.log(&create(i)).unwrap();
        }

        let positions = |entries: Vec<AuditEntry>| -> Vec<usize> {
            entries.iter().map(|e| e.position).collect()
        };
        assert_eq!(positions(logger.read_recent(2).unwrap()), vec![4, 5]);
        assert_eq!(positions(logger.read_recent(50).unwrap()), vec![1, 2, 3, 4, 5]);
        assert!(logger.read_recent(0).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let (_temp_dir, logger) = create_test_logger();
        logger.log(&create(1)).unwrap();
        {
            let mut file = OpenOptions::new().append(true).open(logger.path()).unwrap();
            writeln!(file, "{{ truncated").unwrap();
            writeln!(file).unwrap();
        }
        logger.log(&create(2)).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].position, 2);
        assert_eq!(logger.read_recent(1).unwrap()[0].position, 2);
    }

    #[test]
    fn test_unwritable_log_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path());

        let err = logger.log(&create(1)).unwrap_err();
        assert!(matches!(err, TrackerError::Io(_)));
    }
}

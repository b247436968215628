//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a record entered the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Added one at a time
    Create,
    /// Added by a CSV import
    Import,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Import => write!(f, "IMPORT"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// 1-based ledger position of the new record
    pub position: usize,

    /// JSON representation of the record as stored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,
}

impl AuditEntry {
    /// Create a new audit entry for a record at `position`
    pub fn new<T: Serialize>(operation: Operation, position: usize, record: &T) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            position,
            after: serde_json::to_value(record).ok(),
        }
    }

    /// One-line human-readable form
    pub fn format_human_readable(&self) -> String {
        let detail = self
            .after
            .as_ref()
            .map(|v| format!(" {}", v))
            .unwrap_or_default();
        format!(
            "[{}] {} #{}{}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.position,
            detail
        )
    }
}

//! Audit logging for the expense tracker
//!
//! Every record added to the ledger is also appended to a line-delimited
//! JSON audit log next to the ledger file. The `history` command reads it
//! back for display; the ledger never rebuilds state from it.

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;

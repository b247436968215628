//! Configuration module for the expense tracker
//!
//! This module provides configuration management including:
//! - Ledger, settings and audit log path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::TrackerPaths;
pub use settings::{CategoryCase, Settings};

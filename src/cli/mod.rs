//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod expense;
pub mod export;
pub mod history;
pub mod import;
pub mod menu;

pub use expense::{handle_add, handle_filter, handle_list, handle_summary, FilterArgs};
pub use export::{handle_export_command, ExportFormat};
pub use history::handle_history_command;
pub use import::handle_import_command;
pub use menu::Menu;

//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod export;
pub mod plan;

pub use export::{handle_export, read_export, ExportFormat};
pub use plan::{handle_plan_command, PlanCommands};

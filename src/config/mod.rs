//! Configuration module for the bucket planner
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence
//! - Planning preferences

pub mod paths;
pub mod settings;

pub use paths::PlannerPaths;
pub use settings::Settings;

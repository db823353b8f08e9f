//! Display formatting for terminal output
//!
//! Renders plans as tables with a one-line allocation summary.

pub mod plan;

pub use plan::{
    format_bucket_table, format_plan_list, format_report_line, format_savings_target,
    format_snapshot,
};

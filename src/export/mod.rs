//! Export module for the bucket planner
//!
//! Saved plans can be exported in three formats:
//! - CSV: bucket rows for spreadsheets
//! - JSON: machine-readable export with schema version
//! - YAML: human-readable export

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::export_plan_csv;
pub use json::{export_plan_json, import_from_json, PlanExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_plan_yaml, import_from_yaml};

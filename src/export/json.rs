//! JSON Export functionality
//!
//! Exports a saved plan to JSON with schema versioning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::engine::ValidationReport;
use crate::error::{PlannerError, PlannerResult};
use crate::storage::SavedPlan;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Export structure for a single plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// The exported plan
    pub plan: SavedPlan,

    /// Totals at export time
    pub report: ValidationReport,
}

impl PlanExport {
    /// Create an export of `plan`
    pub fn from_plan(plan: &SavedPlan, tolerance_percent: f64) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            report: ValidationReport::from_set(&plan.buckets, tolerance_percent),
            plan: plan.clone(),
        }
    }

    /// Check that the export can be read back by this version
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }
        Ok(())
    }
}

/// Export a plan as pretty-printed JSON
pub fn export_plan_json<W: Write>(
    plan: &SavedPlan,
    tolerance_percent: f64,
    writer: &mut W,
) -> PlannerResult<()> {
    let export = PlanExport::from_plan(plan, tolerance_percent);

    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| PlannerError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| PlannerError::Export(e.to_string()))?;

    Ok(())
}

/// Read a plan back from a JSON export
pub fn import_from_json(json_str: &str) -> PlannerResult<PlanExport> {
    let export: PlanExport =
        serde_json::from_str(json_str).map_err(|e| PlannerError::Export(e.to_string()))?;

    export.validate().map_err(PlannerError::Export)?;

    Ok(export)
}

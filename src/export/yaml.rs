//! YAML Export functionality
//!
//! Exports a saved plan to YAML for human-readable backup.

use std::io::Write;

use crate::error::{PlannerError, PlannerResult};
use crate::export::json::PlanExport;
use crate::storage::SavedPlan;

/// Export a plan to YAML format
pub fn export_plan_yaml<W: Write>(
    plan: &SavedPlan,
    tolerance_percent: f64,
    writer: &mut W,
) -> PlannerResult<()> {
    let export = PlanExport::from_plan(plan, tolerance_percent);

    writeln!(writer, "# Bucket Planner Export: {}", export.plan.name)
        .map_err(|e| PlannerError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| PlannerError::Export(e.to_string()))?;
    writeln!(writer, "# App Version: {}", export.app_version)
        .map_err(|e| PlannerError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| PlannerError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| PlannerError::Export(e.to_string()))?;

    Ok(())
}

/// Read a plan back from a YAML export
pub fn import_from_yaml(yaml_str: &str) -> PlannerResult<PlanExport> {
    let export: PlanExport =
        serde_yaml::from_str(yaml_str).map_err(|e| PlannerError::Export(e.to_string()))?;

    export.validate().map_err(PlannerError::Export)?;

    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::DEFAULT_TOLERANCE_PERCENT;
    use crate::export::json::tests::sample_plan;

    #[test]
    fn test_export_yaml_has_header_and_reads_back() {
        let plan = sample_plan();
        let mut output = Vec::new();
        export_plan_yaml(&plan, DEFAULT_TOLERANCE_PERCENT, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("# Bucket Planner Export: March, revised"));
        assert!(text.contains("schema_version:"));

        let export = import_from_yaml(&text).unwrap();
        assert_eq!(export.plan.buckets, plan.buckets);
    }
}

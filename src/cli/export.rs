//! CLI support for plan export and import
//!
//! Writes a saved plan to a file or stdout in the chosen format, and reads
//! JSON or YAML exports back.

use clap::ValueEnum;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::Settings;
use crate::error::{PlannerError, PlannerResult};
use crate::export::{
    export_plan_csv, export_plan_json, export_plan_yaml, import_from_json, import_from_yaml,
    PlanExport,
};
use crate::storage::SavedPlan;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// JSON with schema version
    Json,
    /// YAML, human-readable
    Yaml,
    /// CSV, one row per bucket
    Csv,
}

/// Export `plan` to `output`, or stdout when no path is given
pub fn handle_export(
    plan: &SavedPlan,
    settings: &Settings,
    format: ExportFormat,
    output: Option<&Path>,
) -> PlannerResult<()> {
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                PlannerError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_plan(plan, settings, format, &mut writer)?;
            writer
                .flush()
                .map_err(|e| PlannerError::Export(e.to_string()))?;
            println!("Plan '{}' exported to: {}", plan.name, path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            write_plan(plan, settings, format, &mut writer)?;
        }
    }

    Ok(())
}

fn write_plan<W: Write>(
    plan: &SavedPlan,
    settings: &Settings,
    format: ExportFormat,
    writer: &mut W,
) -> PlannerResult<()> {
    match format {
        ExportFormat::Json => export_plan_json(plan, settings.tolerance_percent, writer),
        ExportFormat::Yaml => export_plan_yaml(plan, settings.tolerance_percent, writer),
        ExportFormat::Csv => export_plan_csv(plan, writer),
    }
}

/// Read an export file, picking the format from `format` or the file extension
///
/// Files without a `yaml`/`yml` extension are read as JSON.
pub fn read_export(path: &Path, format: Option<ExportFormat>) -> PlannerResult<PlanExport> {
    let format = format.unwrap_or_else(|| match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
            ExportFormat::Yaml
        }
        _ => ExportFormat::Json,
    });

    let text = std::fs::read_to_string(path).map_err(|e| {
        PlannerError::Export(format!("Failed to read {}: {}", path.display(), e))
    })?;

    match format {
        ExportFormat::Json => import_from_json(&text),
        ExportFormat::Yaml => import_from_yaml(&text),
        ExportFormat::Csv => Err(PlannerError::Export(
            "CSV exports cannot be imported; use JSON or YAML".into(),
        )),
    }
}

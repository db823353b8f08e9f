//! CSV Export functionality
//!
//! Exports a plan's buckets to CSV for spreadsheet use.

use std::io::Write;

use crate::error::{PlannerError, PlannerResult};
use crate::storage::SavedPlan;

/// Export a plan's buckets to CSV, one row per bucket plus a total row
pub fn export_plan_csv<W: Write>(plan: &SavedPlan, writer: &mut W) -> PlannerResult<()> {
    writeln!(writer, "Bucket,Type,Locked,Amount,Percent")
        .map_err(|e| PlannerError::Export(e.to_string()))?;

    let income = plan.buckets.income();
    for bucket in &plan.buckets {
        writeln!(
            writer,
            "{},{},{},{:.2},{:.2}",
            escape_csv(bucket.id.as_str()),
            escape_csv(&bucket.kind.to_string()),
            bucket.is_locked(),
            bucket.amount.to_major(),
            bucket.amount.percent_of(income)
        )
        .map_err(|e| PlannerError::Export(e.to_string()))?;
    }

    let total = plan.buckets.total();
    writeln!(
        writer,
        "Total,,,{:.2},{:.2}",
        total.to_major(),
        total.percent_of(income)
    )
    .map_err(|e| PlannerError::Export(e.to_string()))?;

    Ok(())
}

/// Escape a string for CSV format
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::json::tests::sample_plan;

    #[test]
    fn test_export_plan_csv() {
        let mut output = Vec::new();
        export_plan_csv(&sample_plan(), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Bucket,Type,Locked,Amount,Percent");
        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("essential,"));
        assert!(lines[1].contains(",true,1500.00,30.00"));
        assert_eq!(lines[4], "Total,,,5000.00,100.00");
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}

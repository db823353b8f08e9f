//! Plan display formatting
//!
//! Formats plan snapshots, validation reports and saved-plan listings for
//! terminal output.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::engine::{SavingsTarget, ValidationReport};
use crate::models::{BucketSet, Money};
use crate::services::PlanSnapshot;
use crate::storage::SavedPlan;

#[derive(Tabled)]
struct BucketRow {
    #[tabled(rename = "Bucket")]
    id: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "")]
    badge: &'static str,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Share")]
    share: String,
}

#[derive(Tabled)]
struct PlanRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Buckets")]
    buckets: usize,
    #[tabled(rename = "Saved")]
    saved_at: String,
}

/// Format the buckets of a plan as a table
pub fn format_bucket_table(buckets: &BucketSet, symbol: &str) -> String {
    let income = buckets.income();
    let rows: Vec<BucketRow> = buckets
        .iter()
        .map(|b| BucketRow {
            id: b.id.to_string(),
            kind: b.kind.to_string(),
            badge: b.kind.badge(),
            amount: b.amount.format_with_symbol(symbol),
            share: format!("{:.1}%", b.amount.percent_of(income)),
        })
        .collect();

    Table::new(rows)
        .with(Style::psql())
        .with(Modify::new(Columns::new(3..)).with(Alignment::right()))
        .to_string()
}

/// One-line summary of a validation report
pub fn format_report_line(report: &ValidationReport, income: Money, symbol: &str) -> String {
    let status = if report.is_valid { "OK" } else { "NOT VALID" };
    let unallocated = report.unallocated(income);

    let mut line = format!(
        "Allocated {} of {} ({:.2}%) [{}]",
        report.total_allocated.format_with_symbol(symbol),
        income.format_with_symbol(symbol),
        report.percentage,
        status
    );
    if !unallocated.is_zero() {
        line.push_str(&format!(
            "  unallocated: {}",
            unallocated.format_with_symbol(symbol)
        ));
    }
    line
}

/// Describe the sized savings goal
pub fn format_savings_target(target: &SavingsTarget, symbol: &str) -> String {
    format!(
        "Savings goal: {} over {} ({} per month)",
        target.target.format_with_symbol(symbol),
        target.duration,
        target.monthly_contribution.format_with_symbol(symbol)
    )
}

/// Full view of a snapshot: table, report and goal sizing
pub fn format_snapshot(snapshot: &PlanSnapshot, symbol: &str) -> String {
    let mut output = format_bucket_table(&snapshot.buckets, symbol);
    output.push('\n');
    output.push_str(&format_report_line(
        &snapshot.report,
        snapshot.buckets.income(),
        symbol,
    ));
    if let Some(target) = &snapshot.savings_target {
        output.push('\n');
        output.push_str(&format_savings_target(target, symbol));
    }
    output
}

/// Format saved plans as a table
pub fn format_plan_list(plans: &[SavedPlan], symbol: &str) -> String {
    if plans.is_empty() {
        return "No saved plans.".to_string();
    }

    let rows: Vec<PlanRow> = plans
        .iter()
        .map(|p| PlanRow {
            name: p.name.clone(),
            id: p.id.to_string(),
            income: p.buckets.income().format_with_symbol(symbol),
            buckets: p.buckets.len(),
            saved_at: p.saved_at.format("%Y-%m-%d %H:%M").to_string(),
        })
        .collect();

    Table::new(rows).with(Style::psql()).to_string()
}

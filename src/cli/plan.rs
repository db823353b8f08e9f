//! Plan CLI commands
//!
//! Implements the commands that build and edit the draft plan and manage
//! saved plans.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_plan_list, format_report_line, format_snapshot};
use crate::error::{PlannerError, PlannerResult};
use crate::models::{Bucket, BucketKind, Money};
use crate::services::{
    default_baseline, EditEvent, EditSource, PlanService, PlanSnapshot, Planner,
};
use crate::storage::Storage;

use super::export::{handle_export, read_export, ExportFormat};

/// Plan subcommands
#[derive(Subcommand)]
pub enum PlanCommands {
    /// Start a new draft plan, replacing the current one
    New {
        /// Monthly income (e.g., "5000" or "5,000.00")
        #[arg(short, long)]
        income: String,
        /// Essential spending derived from your history (locked)
        #[arg(short, long)]
        essential: String,
        /// Extra bucket as id=kind:amount, repeatable (default: even
        /// discretionary/goal/investments split)
        #[arg(short, long = "bucket", value_parser = parse_bucket_arg)]
        buckets: Vec<Bucket>,
    },

    /// Show the draft plan
    Show,

    /// Throw the draft plan away
    Discard,

    /// Show the allocation report for the draft plan
    Report {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Type an amount into a bucket (negative values become 0)
    Set {
        /// Bucket id
        bucket: String,
        /// New amount
        #[arg(allow_negative_numbers = true)]
        amount: f64,
    },

    /// Drag a bucket slider to an amount
    Slide {
        /// Bucket id
        bucket: String,
        /// New amount
        #[arg(allow_negative_numbers = true)]
        amount: f64,
    },

    /// Size a savings goal bucket from a duration in months (3, 6 or 12)
    Duration {
        /// Savings goal bucket id
        bucket: String,
        /// Months of essential spending to save
        months: f64,
    },

    /// Refresh the locked essential amount and rebuild the plan around it
    Refresh {
        /// New essential amount
        essential: String,
    },

    /// Save the draft plan under a name
    Save {
        /// Plan name
        name: String,
    },

    /// List saved plans
    Plans,

    /// Delete a saved plan
    Delete {
        /// Plan name or ID
        name: String,
    },

    /// Export a saved plan
    Export {
        /// Plan name or ID
        name: String,
        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },

    /// Import a plan from a JSON or YAML export, replacing one with the same name
    Import {
        /// Export file
        file: std::path::PathBuf,
        /// Export format (default: from the file extension)
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,
    },

    /// Show recent changes from the audit log
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,
    },
}

/// Handle a plan command
pub fn handle_plan_command(
    storage: &Storage,
    settings: &Settings,
    cmd: PlanCommands,
) -> PlannerResult<()> {
    let planner = Planner::from_settings(settings)?;
    let service = PlanService::new(storage, planner);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        PlanCommands::New {
            income,
            essential,
            buckets,
        } => {
            let income = parse_amount(&income)?;
            let essential = parse_amount(&essential)?;
            let baseline = default_baseline(income, essential, buckets)?;

            let snapshot = service.start_draft(baseline)?;
            println!("Started a new plan.");
            println!();
            print_snapshot(&snapshot, symbol);
        }

        PlanCommands::Show => {
            print_snapshot(&service.draft()?, symbol);
        }

        PlanCommands::Discard => {
            let draft = service.discard_draft()?;
            println!(
                "Discarded the draft plan for {}.",
                draft.buckets.income().format_with_symbol(symbol)
            );
        }

        PlanCommands::Report { json } => {
            let draft = service.draft()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&draft.report)?);
            } else {
                println!(
                    "{}",
                    format_report_line(&draft.report, draft.buckets.income(), symbol)
                );
            }
        }

        PlanCommands::Set { bucket, amount } => {
            let snapshot = service.edit(&EditEvent::text(bucket.as_str(), amount))?;
            print_snapshot(&snapshot, symbol);
        }

        PlanCommands::Slide { bucket, amount } => {
            let snapshot = service.edit(&EditEvent::slider(bucket.as_str(), amount))?;
            print_snapshot(&snapshot, symbol);
        }

        PlanCommands::Duration { bucket, months } => {
            let event = EditEvent {
                bucket_id: bucket.as_str().into(),
                raw_value: months,
                source: EditSource::DurationPicker,
            };
            let snapshot = service.edit(&event)?;
            print_snapshot(&snapshot, symbol);
        }

        PlanCommands::Refresh { essential } => {
            let essential = parse_amount(&essential)?;
            let snapshot = service.refresh_baseline(essential)?;
            println!("Essential spending refreshed.");
            println!();
            print_snapshot(&snapshot, symbol);
        }

        PlanCommands::Save { name } => {
            let plan = service.save_draft(&name)?;
            println!("Saved plan '{}' ({})", plan.name, plan.id);
        }

        PlanCommands::Plans => {
            let plans = service.list()?;
            println!("{}", format_plan_list(&plans, symbol));
            if plans.is_empty() {
                println!();
                println!("Use 'buckets save <name>' to save the draft plan.");
            }
        }

        PlanCommands::Delete { name } => {
            let plan = service.delete(&name)?;
            println!("Deleted plan '{}'", plan.name);
        }

        PlanCommands::Export {
            name,
            format,
            output,
        } => {
            let plan = service.find(&name)?;
            handle_export(&plan, settings, format, output.as_deref())?;
        }

        PlanCommands::Import { file, format } => {
            let export = read_export(&file, format)?;
            let (plan, replaced) = service.import(export)?;
            if replaced {
                println!("Replaced plan '{}' ({})", plan.name, plan.id);
            } else {
                println!("Imported plan '{}' ({})", plan.name, plan.id);
            }
        }

        PlanCommands::Audit { limit } => {
            let entries = service.history(limit)?;
            if entries.is_empty() {
                println!("No audit entries.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
    }

    Ok(())
}

fn print_snapshot(snapshot: &PlanSnapshot, symbol: &str) {
    println!("{}", format_snapshot(snapshot, symbol));
}

fn parse_amount(s: &str) -> PlannerResult<Money> {
    Money::parse(s).map_err(|e| PlannerError::Validation(format!("Invalid amount: {}", e)))
}

/// Parse `id=kind:amount`, e.g. `car=goal:250`
fn parse_bucket_arg(s: &str) -> Result<Bucket, String> {
    let (id, rest) = s
        .split_once('=')
        .ok_or_else(|| format!("expected id=kind:amount, got '{}'", s))?;
    let (kind, amount) = rest
        .split_once(':')
        .ok_or_else(|| format!("expected id=kind:amount, got '{}'", s))?;

    let id = id.trim();
    if id.is_empty() {
        return Err("bucket id cannot be empty".into());
    }
    let kind = BucketKind::parse(kind).ok_or_else(|| format!("unknown bucket type '{}'", kind))?;
    let amount = Money::parse(amount).map_err(|e| e.to_string())?;

    Ok(Bucket::new(id, kind, amount))
}

use anyhow::Result;
use clap::{Parser, Subcommand};

use bucket_planner::cli::{handle_plan_command, PlanCommands};
use bucket_planner::config::{PlannerPaths, Settings};
use bucket_planner::engine::AbsorptionRule;
use bucket_planner::logging::init_tracing;
use bucket_planner::storage::Storage;

#[derive(Parser)]
#[command(
    name = "buckets",
    author = "Kaylee Beyene",
    version,
    about = "Split your monthly income into buckets that always add up",
    long_about = "Bucket Planner splits a monthly income into essential, discretionary, \
                  savings and investment buckets. Editing one bucket rebalances the \
                  others so the plan always allocates exactly what you earn."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Plan(PlanCommands),

    /// Show current configuration and paths, optionally changing settings
    Config {
        /// How other buckets absorb an edit: proportional (default) or equal
        ///
        /// proportional shares a change by bucket size. equal splits it evenly,
        /// so raising one bucket by 200 takes 100 from each of two others.
        #[arg(long, value_parser = parse_rule)]
        rule: Option<AbsorptionRule>,
        /// Months over which a savings goal is reached
        #[arg(long)]
        horizon: Option<u32>,
        /// Allowed deviation from 100% allocated, in percentage points
        #[arg(long)]
        tolerance: Option<f64>,
        /// Write the settings to the config file even if nothing changed
        #[arg(long)]
        save: bool,
    },
}

fn parse_rule(s: &str) -> Result<AbsorptionRule, String> {
    AbsorptionRule::parse(s).ok_or_else(|| format!("unknown absorption rule '{}'", s))
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = PlannerPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Plan(cmd)) => {
            handle_plan_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Config {
            rule,
            horizon,
            tolerance,
            save,
        }) => {
            let changed = rule.is_some() || horizon.is_some() || tolerance.is_some();
            if let Some(rule) = rule {
                settings.absorption_rule = rule;
            }
            if let Some(horizon) = horizon {
                settings.savings_horizon_months = horizon;
            }
            if let Some(tolerance) = tolerance {
                settings.tolerance_percent = tolerance;
            }
            if save || changed {
                settings.save(&paths)?;
                println!("Settings written to {}", paths.settings_file().display());
                println!();
            }
            println!("Bucket Planner Configuration");
            println!("============================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Savings horizon:  {} months", settings.savings_horizon_months);
            println!("  Tolerance:        {}%", settings.tolerance_percent);
            println!("  Absorption rule:  {}", settings.absorption_rule);
            println!("  Currency symbol:  {}", settings.currency_symbol);
        }
        None => {
            println!("Bucket Planner - split your income into buckets");
            println!();
            println!("Run 'buckets --help' for usage information.");
            println!("Run 'buckets new --income <amount> --essential <amount>' to start a plan.");
        }
    }

    Ok(())
}

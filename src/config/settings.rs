//! User settings for the bucket planner
//!
//! Manages planning preferences: savings horizon, validity tolerance, how the
//! other buckets absorb a change, and display currency.

use serde::{Deserialize, Serialize};

use super::paths::PlannerPaths;
use crate::engine::{AbsorptionRule, DEFAULT_TOLERANCE_PERCENT};
use crate::error::PlannerError;

/// User settings for the planner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Months over which a savings goal is expected to be reached
    #[serde(default = "default_savings_horizon")]
    pub savings_horizon_months: u32,

    /// Allowed deviation from 100% allocated, in percentage points
    #[serde(default = "default_tolerance")]
    pub tolerance_percent: f64,

    /// How the other buckets absorb an edit
    #[serde(default)]
    pub absorption_rule: AbsorptionRule,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_savings_horizon() -> u32 {
    24
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE_PERCENT
}

fn default_currency() -> String {
    "$".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            savings_horizon_months: default_savings_horizon(),
            tolerance_percent: default_tolerance(),
            absorption_rule: AbsorptionRule::default(),
            currency_symbol: default_currency(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &PlannerPaths) -> Result<Self, PlannerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                PlannerError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                PlannerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PlannerPaths) -> Result<(), PlannerError> {
        self.validate()?;
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            PlannerError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            PlannerError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Check values that the engine cannot work with
    pub fn validate(&self) -> Result<(), PlannerError> {
        if self.savings_horizon_months == 0 {
            return Err(PlannerError::Config(
                "savings_horizon_months must be at least 1".into(),
            ));
        }
        if !self.tolerance_percent.is_finite() || self.tolerance_percent < 0.0 {
            return Err(PlannerError::Config(
                "tolerance_percent must be a non-negative number".into(),
            ));
        }
        Ok(())
    }
}

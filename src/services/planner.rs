//! Planner service
//!
//! Turns raw edit events from the UI (slider, text field, duration picker)
//! into rebalanced plan snapshots. A snapshot pairs a bucket set with its
//! validation report so consumers never see one without the other.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::config::Settings;
use crate::engine::{
    AbsorptionRule, BucketEdit, RebalanceEngine, SavingsDuration, SavingsTarget,
    TargetCalculator, ValidationReport,
};
use crate::error::{PlannerError, PlannerResult};
use crate::models::{BucketId, BucketSet, Money};

/// Where an edit came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditSource {
    Slider,
    Text,
    DurationPicker,
}

impl fmt::Display for EditSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slider => write!(f, "slider"),
            Self::Text => write!(f, "text"),
            Self::DurationPicker => write!(f, "duration picker"),
        }
    }
}

/// A raw edit as delivered by the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditEvent {
    pub bucket_id: BucketId,
    /// Currency amount for slider/text, number of months for the duration picker
    pub raw_value: f64,
    pub source: EditSource,
}

impl EditEvent {
    pub fn slider(bucket_id: impl Into<BucketId>, amount: f64) -> Self {
        Self {
            bucket_id: bucket_id.into(),
            raw_value: amount,
            source: EditSource::Slider,
        }
    }

    pub fn text(bucket_id: impl Into<BucketId>, amount: f64) -> Self {
        Self {
            bucket_id: bucket_id.into(),
            raw_value: amount,
            source: EditSource::Text,
        }
    }

    pub fn duration(bucket_id: impl Into<BucketId>, months: u32) -> Self {
        Self {
            bucket_id: bucket_id.into(),
            raw_value: months as f64,
            source: EditSource::DurationPicker,
        }
    }
}

/// One consistent state of a plan: buckets, totals and the current goal sizing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSnapshot {
    pub buckets: BucketSet,
    pub report: ValidationReport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings_target: Option<SavingsTarget>,
}

/// Stateless coordinator of the target calculator, engine and reporter
#[derive(Debug, Clone, Copy)]
pub struct Planner {
    engine: RebalanceEngine,
    calculator: TargetCalculator,
    tolerance_percent: f64,
}

impl Planner {
    /// Create a planner from explicit parts
    pub fn new(
        rule: AbsorptionRule,
        savings_horizon_months: u32,
        tolerance_percent: f64,
    ) -> PlannerResult<Self> {
        Ok(Self {
            engine: RebalanceEngine::new(rule),
            calculator: TargetCalculator::new(savings_horizon_months)?,
            tolerance_percent,
        })
    }

    /// Create a planner configured from user settings
    pub fn from_settings(settings: &Settings) -> PlannerResult<Self> {
        settings.validate()?;
        Self::new(
            settings.absorption_rule,
            settings.savings_horizon_months,
            settings.tolerance_percent,
        )
    }

    pub fn engine(&self) -> &RebalanceEngine {
        &self.engine
    }

    pub fn calculator(&self) -> &TargetCalculator {
        &self.calculator
    }

    /// Wrap a bucket set in a snapshot with a fresh report
    pub fn snapshot(&self, buckets: BucketSet) -> PlanSnapshot {
        let report = ValidationReport::from_set(&buckets, self.tolerance_percent);
        PlanSnapshot {
            buckets,
            report,
            savings_target: None,
        }
    }

    /// Start a plan from a baseline suggestion
    pub fn start(&self, buckets: BucketSet) -> PlanSnapshot {
        tracing::info!(
            income = %buckets.income(),
            locked = %buckets.locked().amount,
            buckets = buckets.len(),
            "starting plan"
        );
        self.snapshot(buckets)
    }

    /// Apply one edit event to `current`, producing the next snapshot
    ///
    /// `current` is never modified. On error the caller keeps using it.
    pub fn handle(&self, current: &PlanSnapshot, event: &EditEvent) -> PlannerResult<PlanSnapshot> {
        let bucket = current
            .buckets
            .get(&event.bucket_id)
            .ok_or_else(|| PlannerError::unknown_bucket(event.bucket_id.as_str()))?;

        // a manual edit of the goal bucket detaches it from the picked duration
        let kept_target = if bucket.kind.is_duration_based() {
            None
        } else {
            current.savings_target
        };

        let income = current.buckets.income();
        let (proposed, savings_target) = match event.source {
            EditSource::Slider | EditSource::Text => {
                (amount_from_raw(event.raw_value, income)?, kept_target)
            }
            EditSource::DurationPicker => {
                if !bucket.kind.is_duration_based() {
                    return Err(PlannerError::Validation(format!(
                        "Duration picker only applies to savings goal buckets, not '{}'",
                        bucket.id
                    )));
                }
                let duration = SavingsDuration::from_raw(event.raw_value)?;
                let target = self
                    .calculator
                    .compute(duration, current.buckets.locked().amount);
                (target.monthly_contribution, Some(target))
            }
        };

        let edit = BucketEdit::new(event.bucket_id.clone(), proposed);
        let buckets = self.engine.apply(&current.buckets, &edit)?;

        tracing::debug!(
            bucket = %event.bucket_id,
            source = %event.source,
            %proposed,
            "applied edit"
        );

        Ok(PlanSnapshot {
            savings_target,
            ..self.snapshot(buckets)
        })
    }

    /// Rebuild the report of a stored snapshot with this planner's tolerance
    ///
    /// The savings target is kept; only the report is recomputed.
    pub fn refresh_report(&self, stored: PlanSnapshot) -> PlanSnapshot {
        PlanSnapshot {
            savings_target: stored.savings_target,
            ..self.snapshot(stored.buckets)
        }
    }

    /// Build a new snapshot around a refreshed locked baseline
    pub fn refresh_baseline(
        &self,
        current: &PlanSnapshot,
        locked_amount: Money,
    ) -> PlannerResult<PlanSnapshot> {
        let buckets = current.buckets.rebased(locked_amount)?;
        tracing::info!(
            before = %current.buckets.locked().amount,
            after = %locked_amount,
            "refreshed locked baseline"
        );
        // the goal was sized from the old essential amount
        Ok(self.snapshot(buckets))
    }
}

/// Convert a slider or text value to an amount within `[0, income]`
///
/// Out-of-range values, infinities included, are clamped. Only NaN is an error.
fn amount_from_raw(raw_value: f64, income: Money) -> PlannerResult<Money> {
    if raw_value.is_nan() {
        return Err(PlannerError::Validation(format!(
            "Invalid amount: {}",
            raw_value
        )));
    }
    let clamped = raw_value.max(0.0).min(income.to_major());
    Money::from_major(clamped)
        .map(|amount| amount.clamp(Money::zero(), income))
        .ok_or_else(|| PlannerError::Validation(format!("Invalid amount: {}", raw_value)))
}

/// Holder of the current snapshot for one planning session
///
/// Every successful change swaps in a new `Arc`; observers detect updates by
/// comparing references (or the revision), never by inspecting fields.
#[derive(Debug, Clone)]
pub struct PlanSession {
    planner: Planner,
    current: Arc<PlanSnapshot>,
    revision: u64,
}

impl PlanSession {
    /// Start a session from a baseline bucket set
    pub fn new(planner: Planner, baseline: BucketSet) -> Self {
        let current = Arc::new(planner.start(baseline));
        Self {
            planner,
            current,
            revision: 0,
        }
    }

    /// The current snapshot
    pub fn current(&self) -> Arc<PlanSnapshot> {
        Arc::clone(&self.current)
    }

    /// Number of snapshots swapped in since the session started
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn planner(&self) -> &Planner {
        &self.planner
    }

    /// Apply an edit; the current snapshot is replaced only on success
    pub fn submit(&mut self, event: &EditEvent) -> PlannerResult<Arc<PlanSnapshot>> {
        let next = self.planner.handle(&self.current, event)?;
        Ok(self.replace(next))
    }

    /// Rebuild the plan around a new locked amount
    pub fn refresh_baseline(&mut self, locked_amount: Money) -> PlannerResult<Arc<PlanSnapshot>> {
        let next = self.planner.refresh_baseline(&self.current, locked_amount)?;
        Ok(self.replace(next))
    }

    fn replace(&mut self, next: PlanSnapshot) -> Arc<PlanSnapshot> {
        self.current = Arc::new(next);
        self.revision += 1;
        Arc::clone(&self.current)
    }
}

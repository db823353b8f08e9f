//! Plan service
//!
//! Drives the draft plan kept on disk: starting it from a baseline, applying
//! edit events, refreshing the locked amount and saving finished plans. Every
//! change is written to the audit log.

use crate::audit::{generate_bucket_diff, AuditEntry, EntityType};
use crate::error::{PlannerError, PlannerResult};
use crate::export::PlanExport;
use crate::models::{Bucket, BucketKind, BucketSet, Money};
use crate::storage::{SavedPlan, Storage};

use super::planner::{EditEvent, PlanSnapshot, Planner};

/// Audit id of the draft plan
const DRAFT_ID: &str = "draft";

/// Id of the locked bucket created by [`default_baseline`]
pub const ESSENTIAL_BUCKET_ID: &str = "essential";

/// Build the suggested starting buckets for an income and essential amount
///
/// The essential bucket is locked. When `extra` is empty the remainder is
/// split evenly across discretionary, goal and investments buckets.
pub fn default_baseline(
    income: Money,
    essential: Money,
    extra: Vec<Bucket>,
) -> PlannerResult<BucketSet> {
    let mut buckets = vec![Bucket::new(ESSENTIAL_BUCKET_ID, BucketKind::Essential, essential)];

    if extra.is_empty() {
        let share = (income - essential).max(Money::zero()).div_round(3);
        buckets.push(Bucket::new("discretionary", BucketKind::Discretionary, share));
        buckets.push(Bucket::new("goal", BucketKind::SavingsGoal, share));
        buckets.push(Bucket::new("investments", BucketKind::Investments, share));
    } else {
        buckets.extend(extra);
    }

    BucketSet::from_baseline(income, buckets)
}

/// Service for the draft plan and saved plans
pub struct PlanService<'a> {
    storage: &'a Storage,
    planner: Planner,
}

impl<'a> PlanService<'a> {
    /// Create a new plan service
    pub fn new(storage: &'a Storage, planner: Planner) -> Self {
        Self { storage, planner }
    }

    /// Replace the draft with a fresh plan built from `baseline`
    pub fn start_draft(&self, baseline: BucketSet) -> PlannerResult<PlanSnapshot> {
        let snapshot = self.planner.start(baseline);

        self.storage.draft.save(&snapshot)?;
        self.storage
            .log_create(EntityType::Draft, DRAFT_ID, None, &snapshot.buckets)?;

        Ok(snapshot)
    }

    /// The current draft, with its report rebuilt from the stored buckets
    pub fn draft(&self) -> PlannerResult<PlanSnapshot> {
        let stored = self.storage.draft.load_required()?;
        Ok(self.planner.refresh_report(stored))
    }

    /// Throw the draft away
    pub fn discard_draft(&self) -> PlannerResult<PlanSnapshot> {
        let draft = self.draft()?;
        self.storage.draft.clear()?;
        self.storage
            .log_delete(EntityType::Draft, DRAFT_ID, None, &draft.buckets)?;

        tracing::info!("discarded draft");
        Ok(draft)
    }

    /// Apply an edit event to the draft
    ///
    /// A rejected edit leaves the stored draft untouched.
    pub fn edit(&self, event: &EditEvent) -> PlannerResult<PlanSnapshot> {
        let current = self.draft()?;
        let next = self.planner.handle(&current, event)?;
        self.replace_draft(&current, next)
    }

    /// Rebuild the draft around a new essential amount
    pub fn refresh_baseline(&self, essential: Money) -> PlannerResult<PlanSnapshot> {
        let current = self.draft()?;
        let next = self.planner.refresh_baseline(&current, essential)?;
        self.replace_draft(&current, next)
    }

    fn replace_draft(
        &self,
        current: &PlanSnapshot,
        next: PlanSnapshot,
    ) -> PlannerResult<PlanSnapshot> {
        self.storage.draft.save(&next)?;

        let diff = generate_bucket_diff(&current.buckets, &next.buckets);
        self.storage.log_update(
            EntityType::Draft,
            DRAFT_ID,
            None,
            &current.buckets,
            &next.buckets,
            diff,
        )?;

        Ok(next)
    }

    /// Save the draft under `name`, replacing a plan with the same name
    pub fn save_draft(&self, name: &str) -> PlannerResult<SavedPlan> {
        let draft = self.draft()?;
        let (plan, replaced) = self.storage.plans.upsert_snapshot(name, &draft)?;
        self.storage.plans.save()?;
        self.log_stored(&plan, replaced.as_ref())?;

        tracing::info!(plan = %plan.id, name = %plan.name, "saved plan");
        Ok(plan)
    }

    fn log_stored(&self, plan: &SavedPlan, replaced: Option<&SavedPlan>) -> PlannerResult<()> {
        match replaced {
            Some(old) => {
                let diff = generate_bucket_diff(&old.buckets, &plan.buckets);
                self.storage.log_update(
                    EntityType::SavedPlan,
                    plan.id.to_string(),
                    Some(plan.name.clone()),
                    old,
                    plan,
                    diff,
                )
            }
            None => self.storage.log_create(
                EntityType::SavedPlan,
                plan.id.to_string(),
                Some(plan.name.clone()),
                plan,
            ),
        }
    }

    /// Store a plan read from an export, replacing a plan with the same name
    ///
    /// Returns the stored plan and whether it replaced an existing one.
    pub fn import(&self, export: PlanExport) -> PlannerResult<(SavedPlan, bool)> {
        let report = self.planner.snapshot(export.plan.buckets.clone()).report;
        if !report.is_valid {
            return Err(PlannerError::InvalidPlan {
                percentage: report.percentage,
            });
        }

        let (plan, replaced) = self.storage.plans.upsert_plan(export.plan)?;
        self.storage.plans.save()?;
        self.log_stored(&plan, replaced.as_ref())?;

        tracing::info!(
            plan = %plan.id,
            name = %plan.name,
            replaced = replaced.is_some(),
            "imported plan"
        );
        Ok((plan, replaced.is_some()))
    }

    /// The most recent audit entries, oldest first
    pub fn history(&self, limit: usize) -> PlannerResult<Vec<AuditEntry>> {
        self.storage.audit().read_recent(limit)
    }

    /// All saved plans, oldest first
    pub fn list(&self) -> PlannerResult<Vec<SavedPlan>> {
        self.storage.plans.get_all()
    }

    /// Find a saved plan by name or id
    pub fn find(&self, identifier: &str) -> PlannerResult<SavedPlan> {
        self.storage
            .plans
            .get(identifier)?
            .ok_or_else(|| PlannerError::plan_not_found(identifier))
    }

    /// Delete a saved plan by name or id
    pub fn delete(&self, identifier: &str) -> PlannerResult<SavedPlan> {
        let plan = self
            .storage
            .plans
            .delete(identifier)?
            .ok_or_else(|| PlannerError::plan_not_found(identifier))?;
        self.storage.plans.save()?;

        self.storage.log_delete(
            EntityType::SavedPlan,
            plan.id.to_string(),
            Some(plan.name.clone()),
            &plan,
        )?;

        tracing::info!(plan = %plan.id, name = %plan.name, "deleted plan");
        Ok(plan)
    }
}

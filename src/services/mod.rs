//! Service layer for the bucket planner
//!
//! The planner turns edit events into new plan snapshots; the plan service
//! persists those snapshots and records them in the audit log.

pub mod plan;
pub mod planner;

pub use plan::{default_baseline, PlanService, ESSENTIAL_BUCKET_ID};
pub use planner::{EditEvent, EditSource, PlanSession, PlanSnapshot, Planner};

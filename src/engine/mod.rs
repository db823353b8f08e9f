//! Allocation engine
//!
//! Pure, synchronous computations over plans:
//!
//! - `rebalance`: applies one bucket edit and keeps the total equal to income
//! - `target`: sizes the savings goal from a duration picker
//! - `report`: totals and validity of a plan

pub mod rebalance;
pub mod report;
pub mod target;

pub use rebalance::{AbsorptionRule, BucketEdit, RebalanceEngine};
pub use report::{ValidationReport, DEFAULT_TOLERANCE_PERCENT};
pub use target::{SavingsDuration, SavingsTarget, TargetCalculator};

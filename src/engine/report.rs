//! Validation reporter
//!
//! Summarises how much of the income a plan allocates and whether that is
//! close enough to 100% to be saved.

use serde::{Deserialize, Serialize};

use crate::models::{BucketSet, Money};

/// Default tolerance, in percentage points
pub const DEFAULT_TOLERANCE_PERCENT: f64 = 0.5;

/// Aggregate totals for a plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub total_allocated: Money,
    /// Allocated share of income, 0 when income is 0
    pub percentage: f64,
    pub is_valid: bool,
}

impl ValidationReport {
    /// Build a report for `set`; valid when within `tolerance_percent` of 100%
    pub fn from_set(set: &BucketSet, tolerance_percent: f64) -> Self {
        Self::from_totals(set.total(), set.income(), tolerance_percent)
    }

    pub fn from_totals(total_allocated: Money, income: Money, tolerance_percent: f64) -> Self {
        let percentage = total_allocated.percent_of(income);
        Self {
            total_allocated,
            percentage,
            is_valid: (percentage - 100.0).abs() <= tolerance_percent,
        }
    }

    /// Amount left to allocate (negative when over-allocated)
    pub fn unallocated(&self, income: Money) -> Money {
        income - self.total_allocated
    }
}

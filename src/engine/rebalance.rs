//! Rebalance engine
//!
//! Applies an edit to one modifiable bucket and re-derives every other
//! modifiable bucket so the plan still adds up to its income. The input set is
//! only borrowed; the result is always a new `BucketSet`.
//!
//! Steps, in order:
//!
//! 1. reject unknown or locked buckets
//! 2. clamp the proposed amount into `[0, income]`
//! 3. `delta = proposed - current`
//! 4. the other modifiable buckets absorb `-delta` (proportionally to their
//!    current amounts, or equally when they hold nothing)
//! 5. any remainder left by clamping or rounding is settled on the largest
//!    modifiable bucket, lowest id first on ties

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PlannerError, PlannerResult};
use crate::models::{Bucket, BucketId, BucketSet, Money};

/// How the other buckets share a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbsorptionRule {
    /// Larger buckets absorb proportionally more of the change
    #[default]
    Proportional,
    /// Every other bucket absorbs the same amount
    Equal,
}

impl AbsorptionRule {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "proportional" | "prop" => Some(Self::Proportional),
            "equal" | "even" => Some(Self::Equal),
            _ => None,
        }
    }
}

impl fmt::Display for AbsorptionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Proportional => write!(f, "proportional"),
            Self::Equal => write!(f, "equal"),
        }
    }
}

/// A proposed new amount for one bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketEdit {
    pub bucket_id: BucketId,
    pub proposed: Money,
}

impl BucketEdit {
    pub fn new(bucket_id: impl Into<BucketId>, proposed: Money) -> Self {
        Self {
            bucket_id: bucket_id.into(),
            proposed,
        }
    }
}

/// Stateless engine that turns one plan plus one edit into the next plan
#[derive(Debug, Clone, Copy, Default)]
pub struct RebalanceEngine {
    rule: AbsorptionRule,
}

impl RebalanceEngine {
    pub fn new(rule: AbsorptionRule) -> Self {
        Self { rule }
    }

    pub fn rule(&self) -> AbsorptionRule {
        self.rule
    }

    /// Apply an edit, returning the rebalanced plan
    ///
    /// Fails with `UnknownBucket` or `LockedBucketEditAttempt` without touching
    /// `set`. Out-of-range amounts are clamped rather than rejected, and when
    /// the other buckets cannot absorb the whole change the edited bucket is
    /// pulled back so the total still equals income.
    pub fn apply(&self, set: &BucketSet, edit: &BucketEdit) -> PlannerResult<BucketSet> {
        let index = set
            .position(&edit.bucket_id)
            .ok_or_else(|| PlannerError::unknown_bucket(edit.bucket_id.as_str()))?;

        let target = &set.buckets()[index];
        if target.is_locked() {
            tracing::debug!(bucket = %edit.bucket_id, "rejected edit of locked bucket");
            return Err(PlannerError::LockedBucketEditAttempt(
                edit.bucket_id.to_string(),
            ));
        }

        let income = set.income();
        let proposed = edit.proposed.clamp(Money::zero(), income);
        let delta = proposed - target.amount;
        if delta.is_zero() {
            return Ok(set.clone());
        }

        let mut buckets = set.buckets().to_vec();
        let candidates: Vec<usize> = buckets
            .iter()
            .enumerate()
            .filter(|(i, b)| *i != index && b.is_modifiable())
            .map(|(i, _)| i)
            .collect();
        let capacity: Money = candidates.iter().map(|&i| buckets[i].amount).sum();

        tracing::debug!(
            bucket = %edit.bucket_id,
            %proposed,
            %delta,
            %capacity,
            rule = %self.rule,
            "rebalancing plan"
        );

        match self.rule {
            AbsorptionRule::Proportional if capacity.is_positive() => {
                absorb_proportionally(&mut buckets, &candidates, delta, capacity, income)
            }
            _ => absorb_equally(&mut buckets, &candidates, delta, income),
        }

        buckets[index] = buckets[index].with_amount(proposed);
        settle_residual(income, &mut buckets);

        Ok(BucketSet::from_settled(income, buckets))
    }
}

fn absorb_proportionally(
    buckets: &mut [Bucket],
    candidates: &[usize],
    delta: Money,
    capacity: Money,
    income: Money,
) {
    for &i in candidates {
        let current = buckets[i].amount;
        let share = delta.mul_ratio(current.cents(), capacity.cents());
        buckets[i] = buckets[i].with_amount((current - share).clamp(Money::zero(), income));
    }
}

fn absorb_equally(buckets: &mut [Bucket], candidates: &[usize], delta: Money, income: Money) {
    if candidates.is_empty() {
        return;
    }

    let share = delta.div_round(candidates.len() as i64);
    for &i in candidates {
        let current = buckets[i].amount;
        buckets[i] = buckets[i].with_amount((current - share).clamp(Money::zero(), income));
    }
}

/// Push `income - total` onto the modifiable buckets
///
/// The largest modifiable bucket (lowest id on ties) takes the residual. If it
/// would leave `[0, income]`, the remainder moves on to the next bucket in the
/// same order. Locked buckets never change.
pub(crate) fn settle_residual(income: Money, buckets: &mut [Bucket]) {
    let total: Money = buckets.iter().map(|b| b.amount).sum();
    let mut residual = income - total;
    if residual.is_zero() {
        return;
    }

    let mut order: Vec<usize> = (0..buckets.len())
        .filter(|&i| buckets[i].is_modifiable())
        .collect();
    order.sort_by(|&a, &b| {
        buckets[b]
            .amount
            .cmp(&buckets[a].amount)
            .then_with(|| buckets[a].id.cmp(&buckets[b].id))
    });

    for i in order {
        if residual.is_zero() {
            break;
        }
        let current = buckets[i].amount;
        let settled = (current + residual).clamp(Money::zero(), income);
        residual -= settled - current;
        buckets[i] = buckets[i].with_amount(settled);
        tracing::trace!(bucket = %buckets[i].id, %settled, "settled residual");
    }

    if !residual.is_zero() {
        tracing::warn!(%residual, "residual could not be fully settled");
    }
}

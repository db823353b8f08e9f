//! Bucket set model
//!
//! A `BucketSet` is the complete allocation of one income: an ordered list of
//! buckets whose amounts always add up to the income. It has no mutating API;
//! every change produces a new value.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

use super::bucket::Bucket;
use super::ids::BucketId;
use super::money::Money;
use crate::engine::rebalance::settle_residual;
use crate::error::{PlannerError, PlannerResult};

/// Ordered, fully reconciled allocation of an income across buckets
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketSet {
    income: Money,
    buckets: Vec<Bucket>,
}

impl BucketSet {
    /// Build a plan from a baseline suggestion
    ///
    /// The baseline must contain exactly one locked bucket, at least one
    /// modifiable bucket, unique non-empty ids and no negative amounts. If the
    /// suggested amounts do not add up to `income`, the difference is settled
    /// with the same residual rule the rebalance engine uses.
    pub fn from_baseline(income: Money, buckets: Vec<Bucket>) -> PlannerResult<Self> {
        validate_baseline(income, &buckets)?;

        let mut buckets = buckets;
        settle_residual(income, &mut buckets);
        Ok(Self::from_settled(income, buckets))
    }

    /// Wrap buckets that already satisfy every invariant
    pub(crate) fn from_settled(income: Money, buckets: Vec<Bucket>) -> Self {
        debug_assert_eq!(
            buckets.iter().map(|b| b.amount).sum::<Money>(),
            income,
            "settled buckets must add up to income"
        );
        Self { income, buckets }
    }

    pub fn income(&self) -> Money {
        self.income
    }

    /// Buckets in plan order
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bucket> {
        self.buckets.iter()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Look up a bucket by id
    pub fn get(&self, id: &BucketId) -> Option<&Bucket> {
        self.buckets.iter().find(|b| &b.id == id)
    }

    /// Position of a bucket in plan order
    pub fn position(&self, id: &BucketId) -> Option<usize> {
        self.buckets.iter().position(|b| &b.id == id)
    }

    /// The locked bucket (construction guarantees there is exactly one)
    pub fn locked(&self) -> &Bucket {
        self.buckets
            .iter()
            .find(|b| b.is_locked())
            .unwrap_or(&self.buckets[0])
    }

    /// Buckets the rebalance engine is allowed to change
    pub fn modifiable(&self) -> impl Iterator<Item = &Bucket> {
        self.buckets.iter().filter(|b| b.is_modifiable())
    }

    /// Sum of all bucket amounts
    pub fn total(&self) -> Money {
        self.buckets.iter().map(|b| b.amount).sum()
    }

    /// Build a fresh plan around a refreshed locked baseline
    ///
    /// The modifiable buckets are rescaled to the new remaining capacity
    /// (split equally when nothing was left before) and then settled. The
    /// result is a new plan rather than an edit, so the locked amount changes.
    pub fn rebased(&self, locked_amount: Money) -> PlannerResult<Self> {
        if locked_amount.is_negative() || locked_amount > self.income {
            return Err(PlannerError::Validation(format!(
                "Locked amount {} must be between $0.00 and income {}",
                locked_amount, self.income
            )));
        }

        let old_capacity = self.income - self.locked().amount;
        let new_capacity = self.income - locked_amount;
        let modifiable_count = self.modifiable().count() as i64;

        let mut buckets: Vec<Bucket> = self
            .buckets
            .iter()
            .map(|bucket| {
                if bucket.is_locked() {
                    bucket.with_amount(locked_amount)
                } else if old_capacity.is_positive() {
                    bucket.with_amount(
                        bucket
                            .amount
                            .mul_ratio(new_capacity.cents(), old_capacity.cents()),
                    )
                } else {
                    bucket.with_amount(new_capacity.div_round(modifiable_count))
                }
            })
            .collect();

        settle_residual(self.income, &mut buckets);
        Ok(Self::from_settled(self.income, buckets))
    }
}

impl<'a> IntoIterator for &'a BucketSet {
    type Item = &'a Bucket;
    type IntoIter = std::slice::Iter<'a, Bucket>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.iter()
    }
}

impl<'de> Deserialize<'de> for BucketSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct RawBucketSet {
            income: Money,
            buckets: Vec<Bucket>,
        }

        let raw = RawBucketSet::deserialize(deserializer)?;
        BucketSet::from_baseline(raw.income, raw.buckets).map_err(serde::de::Error::custom)
    }
}

fn validate_baseline(income: Money, buckets: &[Bucket]) -> PlannerResult<()> {
    if !income.is_positive() {
        return Err(PlannerError::Validation(
            "Income must be greater than zero".into(),
        ));
    }

    let mut seen = HashSet::new();
    for bucket in buckets {
        if bucket.id.is_empty() {
            return Err(PlannerError::Validation("Bucket id cannot be empty".into()));
        }
        if !seen.insert(&bucket.id) {
            return Err(PlannerError::Duplicate {
                entity_type: "Bucket",
                identifier: bucket.id.to_string(),
            });
        }
        if bucket.amount.is_negative() {
            return Err(PlannerError::Validation(format!(
                "Bucket '{}' cannot have a negative amount",
                bucket.id
            )));
        }
    }

    let locked: Vec<&Bucket> = buckets.iter().filter(|b| b.is_locked()).collect();
    match locked.as_slice() {
        [only] if only.amount > income => Err(PlannerError::Validation(format!(
            "Locked bucket '{}' ({}) exceeds income ({})",
            only.id, only.amount, income
        ))),
        [_] if buckets.iter().any(|b| b.is_modifiable()) => Ok(()),
        [_] => Err(PlannerError::Validation(
            "A plan needs at least one modifiable bucket".into(),
        )),
        _ => Err(PlannerError::Validation(format!(
            "A plan needs exactly one locked bucket, found {}",
            locked.len()
        ))),
    }
}

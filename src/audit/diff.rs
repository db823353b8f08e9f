//! Diff generation for audit logging
//!
//! Summarises which bucket amounts changed between two plans.

use crate::models::BucketSet;

/// Describe changed bucket amounts, e.g. `"goal: $1200.00 -> $750.00"`
///
/// Buckets are compared by id in the order of `after`. Returns `None` when
/// nothing changed.
pub fn generate_bucket_diff(before: &BucketSet, after: &BucketSet) -> Option<String> {
    let mut changes = Vec::new();

    if before.income() != after.income() {
        changes.push(format!("income: {} -> {}", before.income(), after.income()));
    }

    for bucket in after {
        match before.get(&bucket.id) {
            Some(old) if old.amount != bucket.amount => {
                changes.push(format!("{}: {} -> {}", bucket.id, old.amount, bucket.amount));
            }
            Some(_) => {}
            None => changes.push(format!("{}: (added) -> {}", bucket.id, bucket.amount)),
        }
    }

    for bucket in before {
        if after.get(&bucket.id).is_none() {
            changes.push(format!("{}: {} -> (removed)", bucket.id, bucket.amount));
        }
    }

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Bucket, BucketKind, Money};

    fn set(goal: i64, investments: i64) -> BucketSet {
        BucketSet::from_baseline(
            Money::from_units(5000),
            vec![
                Bucket::new("essential", BucketKind::Essential, Money::from_units(1500)),
                Bucket::new("goal", BucketKind::SavingsGoal, Money::from_units(goal)),
                Bucket::new("investments", BucketKind::Investments, Money::from_units(investments)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_changed_amounts() {
        let diff = generate_bucket_diff(&set(1200, 2300), &set(750, 2750)).unwrap();
        assert_eq!(
            diff,
            "goal: $1200.00 -> $750.00, investments: $2300.00 -> $2750.00"
        );
    }

    #[test]
    fn test_no_changes() {
        assert!(generate_bucket_diff(&set(1200, 2300), &set(1200, 2300)).is_none());
    }
}

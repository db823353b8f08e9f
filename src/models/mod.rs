//! Core data models for the bucket planner
//!
//! This module contains the value types that describe a plan: money amounts,
//! buckets, and the reconciled bucket set.

pub mod bucket;
pub mod bucket_set;
pub mod ids;
pub mod money;

pub use bucket::{Bucket, BucketKind};
pub use bucket_set::BucketSet;
pub use ids::{BucketId, PlanId};
pub use money::{Money, MoneyParseError};

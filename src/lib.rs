//! Bucket Planner - monthly income allocation across buckets
//!
//! This library splits a monthly income into buckets (essential spending,
//! discretionary spending, savings goals, investments, debt). The essential
//! bucket is locked to data-derived spending; editing any other bucket
//! rebalances the rest so the plan always allocates the whole income.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Money, bucket ids and kinds, the validated bucket set
//! - `engine`: Rebalance engine, savings target calculator, validation report
//! - `services`: Edit handling (`Planner`, `PlanSession`) and the draft/saved plan service
//! - `storage`: JSON file storage for the draft and saved plans
//! - `audit`: Audit logging system
//! - `export`: JSON, YAML and CSV export of saved plans
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust
//! use bucket_planner::models::{Bucket, BucketKind, BucketSet, Money};
//! use bucket_planner::services::{EditEvent, PlanSession, Planner};
//! use bucket_planner::config::Settings;
//!
//! let baseline = BucketSet::from_baseline(
//!     Money::from_units(5000),
//!     vec![
//!         Bucket::new("essential", BucketKind::Essential, Money::from_units(1500)),
//!         Bucket::new("goal", BucketKind::SavingsGoal, Money::from_units(1200)),
//!         Bucket::new("investments", BucketKind::Investments, Money::from_units(2300)),
//!     ],
//! )?;
//!
//! let mut session = PlanSession::new(Planner::from_settings(&Settings::default())?, baseline);
//! let snapshot = session.submit(&EditEvent::slider("goal", 1000.0))?;
//! assert_eq!(snapshot.buckets.total(), Money::from_units(5000));
//! # Ok::<(), bucket_planner::PlannerError>(())
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::PlannerError;

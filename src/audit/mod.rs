//! Audit logging for the bucket planner
//!
//! Records draft edits and saved-plan changes with before/after values in an
//! append-only audit log.
//!
//! - `AuditEntry`: one logged operation with timestamp, entity information and
//!   optional before/after values.
//! - `AuditLogger`: writes entries to the log file as JSON lines (JSONL).
//! - `generate_bucket_diff`: human-readable summary of changed bucket amounts.

mod diff;
mod entry;
mod logger;

pub use diff::generate_bucket_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;

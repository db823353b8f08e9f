//! Storage layer for the bucket planner
//!
//! Provides JSON file storage with atomic writes, the draft being edited,
//! saved plans and the audit log.

pub mod draft;
pub mod file_io;
pub mod plans;

pub use draft::DraftStore;
pub use file_io::{read_json, write_json_atomic};
pub use plans::{PlanRepository, SavedPlan};

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::PlannerPaths;
use crate::error::PlannerError;

/// Main storage coordinator that provides access to all stores
pub struct Storage {
    pub plans: PlanRepository,
    pub draft: DraftStore,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: PlannerPaths) -> Result<Self, PlannerError> {
        paths.ensure_directories()?;

        Ok(Self {
            plans: PlanRepository::new(paths.plans_file()),
            draft: DraftStore::new(paths.draft_file()),
            audit: AuditLogger::new(paths.audit_log()),
        })
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), PlannerError> {
        self.plans.load()
    }

    /// Get the audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Log a create operation
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), PlannerError> {
        let entry = AuditEntry::create(entity_type, entity_id, entity_name, entity);
        self.audit.log(&entry)
    }

    /// Log an update operation
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Result<(), PlannerError> {
        let entry = AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        );
        self.audit.log(&entry)
    }

    /// Log a delete operation
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), PlannerError> {
        let entry = AuditEntry::delete(entity_type, entity_id, entity_name, entity);
        self.audit.log(&entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PlannerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        storage.load_all().unwrap();
        assert!(storage.plans.get_all().unwrap().is_empty());
        assert!(storage.draft.load().unwrap().is_none());
    }

    #[test]
    fn test_log_helpers_append_to_audit_log() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PlannerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        storage
            .log_create(EntityType::Draft, "draft", None, &json!({"income": 1}))
            .unwrap();
        storage
            .log_delete(
                EntityType::SavedPlan,
                "plan-1",
                Some("March".into()),
                &json!({"income": 1}),
            )
            .unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].operation, Operation::Delete);
    }
}

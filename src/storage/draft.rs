//! Draft plan store
//!
//! Keeps the snapshot being edited between CLI invocations. The draft is
//! always written as a whole; there is no partial update.

use std::path::PathBuf;

use crate::error::PlannerError;
use crate::services::PlanSnapshot;

use super::file_io::{read_json_optional, remove_file_if_exists, write_json_atomic};

/// File-backed holder of the current draft snapshot
pub struct DraftStore {
    path: PathBuf,
}

impl DraftStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the draft, if one has been started
    pub fn load(&self) -> Result<Option<PlanSnapshot>, PlannerError> {
        read_json_optional(&self.path)
    }

    /// Load the draft or fail with a hint to start one
    pub fn load_required(&self) -> Result<PlanSnapshot, PlannerError> {
        self.load()?.ok_or_else(|| PlannerError::NotFound {
            entity_type: "Draft plan",
            identifier: "run 'buckets new' to start one".into(),
        })
    }

    /// Replace the stored draft
    pub fn save(&self, snapshot: &PlanSnapshot) -> Result<(), PlannerError> {
        write_json_atomic(&self.path, snapshot)
    }

    /// Discard the draft; returns whether one existed
    pub fn clear(&self) -> Result<bool, PlannerError> {
        remove_file_if_exists(&self.path)
    }
}

//! Saved plans repository
//!
//! Handles persistence of finished plans to JSON. A plan whose report is not
//! valid is refused, so everything on disk adds up to its income.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::RwLock;

use crate::engine::SavingsTarget;
use crate::error::PlannerError;
use crate::models::{BucketSet, PlanId};
use crate::services::PlanSnapshot;

use super::file_io::{read_json, write_json_atomic};

/// A plan handed over for persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPlan {
    pub id: PlanId,
    pub name: String,
    pub buckets: BucketSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings_target: Option<SavingsTarget>,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PlansData {
    #[serde(default)]
    plans: Vec<SavedPlan>,
}

/// Repository for saved plans
pub struct PlanRepository {
    path: PathBuf,
    plans: RwLock<Vec<SavedPlan>>,
}

impl PlanRepository {
    /// Create a new repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            plans: RwLock::new(Vec::new()),
        }
    }

    /// Load plans from disk
    pub fn load(&self) -> Result<(), PlannerError> {
        let file_data: PlansData = read_json(&self.path)?;

        let mut plans = self
            .plans
            .write()
            .map_err(|e| PlannerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *plans = file_data.plans;
        Ok(())
    }

    /// Save plans to disk
    pub fn save(&self) -> Result<(), PlannerError> {
        let plans = self
            .plans
            .read()
            .map_err(|e| PlannerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = PlansData {
            plans: plans.clone(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Store a snapshot under `name`, replacing a plan with the same name
    ///
    /// Returns the stored plan and the plan it replaced, if any. Fails with
    /// `InvalidPlan` when the snapshot's report is not valid.
    pub fn upsert_snapshot(
        &self,
        name: &str,
        snapshot: &PlanSnapshot,
    ) -> Result<(SavedPlan, Option<SavedPlan>), PlannerError> {
        if !snapshot.report.is_valid {
            return Err(PlannerError::InvalidPlan {
                percentage: snapshot.report.percentage,
            });
        }

        self.upsert_plan(SavedPlan {
            id: PlanId::new(),
            name: name.to_string(),
            buckets: snapshot.buckets.clone(),
            savings_target: snapshot.savings_target,
            saved_at: Utc::now(),
        })
    }

    /// Store a plan, replacing one with the same name or id
    ///
    /// A replaced plan keeps its id. Returns the stored plan and the plan it
    /// replaced, if any.
    pub fn upsert_plan(
        &self,
        plan: SavedPlan,
    ) -> Result<(SavedPlan, Option<SavedPlan>), PlannerError> {
        let name = plan.name.trim().to_string();
        if name.is_empty() {
            return Err(PlannerError::Validation("Plan name cannot be empty".into()));
        }

        let mut plans = self
            .plans
            .write()
            .map_err(|e| PlannerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let existing = plans
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(&name))
            .or_else(|| plans.iter().position(|p| p.id == plan.id));

        let plan = SavedPlan {
            id: existing.map(|i| plans[i].id).unwrap_or(plan.id),
            name,
            ..plan
        };

        let replaced = match existing {
            Some(i) => Some(std::mem::replace(&mut plans[i], plan.clone())),
            None => {
                plans.push(plan.clone());
                None
            }
        };

        Ok((plan, replaced))
    }

    /// Find a plan by name (case-insensitive) or id
    pub fn get(&self, identifier: &str) -> Result<Option<SavedPlan>, PlannerError> {
        let plans = self
            .plans
            .read()
            .map_err(|e| PlannerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let by_id = PlanId::parse(identifier).ok();
        Ok(plans
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(identifier.trim()) || Some(p.id) == by_id)
            .cloned())
    }

    /// Remove a plan by name or id
    pub fn delete(&self, identifier: &str) -> Result<Option<SavedPlan>, PlannerError> {
        let Some(plan) = self.get(identifier)? else {
            return Ok(None);
        };

        let mut plans = self
            .plans
            .write()
            .map_err(|e| PlannerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        plans.retain(|p| p.id != plan.id);
        Ok(Some(plan))
    }

    /// All saved plans, oldest first
    pub fn get_all(&self) -> Result<Vec<SavedPlan>, PlannerError> {
        let plans = self
            .plans
            .read()
            .map_err(|e| PlannerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list = plans.clone();
        list.sort_by(|a, b| a.saved_at.cmp(&b.saved_at));
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::models::{Bucket, BucketKind, Money};
    use crate::services::Planner;
    use tempfile::TempDir;

    fn snapshot() -> PlanSnapshot {
        let set = BucketSet::from_baseline(
            Money::from_units(4000),
            vec![
                Bucket::new("essential", BucketKind::Essential, Money::from_units(2000)),
                Bucket::new("goal", BucketKind::SavingsGoal, Money::from_units(2000)),
            ],
        )
        .unwrap();
        Planner::from_settings(&Settings::default())
            .unwrap()
            .start(set)
    }

    #[test]
    fn test_upsert_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let repo = PlanRepository::new(temp_dir.path().join("plans.json"));

        let (saved, replaced) = repo.upsert_snapshot("March", &snapshot()).unwrap();
        assert!(replaced.is_none());

        assert_eq!(repo.get("march").unwrap().unwrap().id, saved.id);
        assert_eq!(repo.get(&saved.id.as_uuid().to_string()).unwrap().unwrap().name, "March");
    }

    #[test]
    fn test_upsert_same_name_keeps_id() {
        let temp_dir = TempDir::new().unwrap();
        let repo = PlanRepository::new(temp_dir.path().join("plans.json"));

        let (first, _) = repo.upsert_snapshot("March", &snapshot()).unwrap();
        let (second, replaced) = repo.upsert_snapshot("MARCH", &snapshot()).unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(replaced.unwrap().id, first.id);
        assert_eq!(repo.get_all().unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_snapshot_is_refused() {
        let temp_dir = TempDir::new().unwrap();
        let repo = PlanRepository::new(temp_dir.path().join("plans.json"));

        let mut bad = snapshot();
        bad.report.is_valid = false;
        bad.report.percentage = 90.0;

        let err = repo.upsert_snapshot("Bad", &bad).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidPlan { .. }));
        assert!(repo.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_upsert_plan_matches_by_id_or_name() {
        let temp_dir = TempDir::new().unwrap();
        let repo = PlanRepository::new(temp_dir.path().join("plans.json"));
        let (first, _) = repo.upsert_snapshot("March", &snapshot()).unwrap();

        // renamed copy of the same plan
        let (renamed, replaced) = repo
            .upsert_plan(SavedPlan {
                name: "  April ".into(),
                ..first.clone()
            })
            .unwrap();
        assert_eq!(renamed.id, first.id);
        assert_eq!(renamed.name, "April");
        assert_eq!(replaced.unwrap().name, "March");

        let (other, replaced) = repo
            .upsert_plan(SavedPlan {
                id: PlanId::new(),
                name: "May".into(),
                ..first
            })
            .unwrap();
        assert!(replaced.is_none());
        assert_ne!(other.id, renamed.id);
        assert_eq!(repo.get_all().unwrap().len(), 2);

        let err = repo
            .upsert_plan(SavedPlan {
                name: " ".into(),
                ..other
            })
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("plans.json");

        {
            let repo = PlanRepository::new(path.clone());
            repo.upsert_snapshot("March", &snapshot()).unwrap();
            repo.save().unwrap();
        }

        let repo = PlanRepository::new(path);
        repo.load().unwrap();
        let plan = repo.get("March").unwrap().unwrap();
        assert_eq!(plan.buckets, snapshot().buckets);
    }

    #[test]
    fn test_delete() {
        let temp_dir = TempDir::new().unwrap();
        let repo = PlanRepository::new(temp_dir.path().join("plans.json"));
        repo.upsert_snapshot("March", &snapshot()).unwrap();

        assert!(repo.delete("March").unwrap().is_some());
        assert!(repo.delete("March").unwrap().is_none());
        assert!(repo.get_all().unwrap().is_empty());
    }
}

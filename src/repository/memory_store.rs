// ==========================================
// Obra Schedule - In-memory Baseline Store
// ==========================================
// Explicitly non-durable, scoped to the session. Used as the
// degradation target when the durable store is unreachable, and as a
// lightweight store in tests.
// ==========================================

use crate::domain::BaselineVersion;
use crate::repository::baseline_store::{sort_by_version_number, BaselineStore};
use crate::repository::error::{RepositoryError, RepositoryResult};
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

// ==========================================
// InMemoryBaselineStore
// ==========================================
#[derive(Default)]
pub struct InMemoryBaselineStore {
    // project -> version_name -> baseline
    baselines: Mutex<HashMap<String, BTreeMap<String, BaselineVersion>>>,
}

impl InMemoryBaselineStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(
        &self,
    ) -> RepositoryResult<std::sync::MutexGuard<HashMap<String, BTreeMap<String, BaselineVersion>>>>
    {
        self.baselines
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

impl BaselineStore for InMemoryBaselineStore {
    fn upsert_baseline(&self, baseline: &BaselineVersion) -> RepositoryResult<()> {
        let mut guard = self.guard()?;
        guard
            .entry(baseline.project.clone())
            .or_default()
            .insert(baseline.version_name.clone(), baseline.clone());
        Ok(())
    }

    fn list_baselines(&self, project: &str) -> RepositoryResult<Vec<BaselineVersion>> {
        let guard = self.guard()?;
        let mut versions: Vec<BaselineVersion> = guard
            .get(project)
            .map(|m| m.values().cloned().collect())
            .unwrap_or_default();
        sort_by_version_number(&mut versions);
        Ok(versions)
    }

    fn find_baseline(
        &self,
        project: &str,
        version_name: &str,
    ) -> RepositoryResult<Option<BaselineVersion>> {
        let guard = self.guard()?;
        Ok(guard
            .get(project)
            .and_then(|m| m.get(version_name))
            .cloned())
    }

    fn delete_baseline(&self, project: &str, version_name: &str) -> RepositoryResult<()> {
        let mut guard = self.guard()?;
        let removed = guard
            .get_mut(project)
            .and_then(|m| m.remove(version_name))
            .is_some();
        if !removed {
            return Err(RepositoryError::NotFound {
                entity: "BaselineVersion".to_string(),
                id: format!("{}/{}", project, version_name),
            });
        }
        Ok(())
    }
}

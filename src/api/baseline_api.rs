// ==========================================
// Obra Schedule - Baseline API
// ==========================================
// Scope: baseline lifecycle (create/list/delete/resolve) over the
// BaselineStore contract, with the per-project list cache and the
// in-memory degradation path when the durable store is unreachable.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::catalog::StageCatalog;
use crate::domain::types::AuditActionType;
use crate::domain::{AuditRecord, BaselineVersion, Project, ScheduleEntry};
use crate::engine::reconciler::BaselineSelection;
use crate::engine::{BaselineSnapshotBuilder, StageAggregator};
use crate::repository::{
    AuditLogRepository, BaselineListCache, BaselineStore, InMemoryBaselineStore, RepositoryError,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Reserved name selecting the virtual live baseline.
pub const LIVE_BASELINE_NAME: &str = "P0";

// ==========================================
// BaselineApi
// ==========================================
pub struct BaselineApi {
    catalog: Arc<StageCatalog>,
    store: Arc<dyn BaselineStore>,
    fallback: InMemoryBaselineStore,
    cache: BaselineListCache,
    audit_repo: Option<AuditLogRepository>,
}

impl BaselineApi {
    pub fn new(catalog: Arc<StageCatalog>, store: Arc<dyn BaselineStore>) -> Self {
        Self {
            catalog,
            store,
            fallback: InMemoryBaselineStore::new(),
            cache: BaselineListCache::default(),
            audit_repo: None,
        }
    }

    /// Attach the audit trail. Audit writes are best-effort.
    pub fn with_audit(mut self, audit_repo: AuditLogRepository) -> Self {
        self.audit_repo = Some(audit_repo);
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache = BaselineListCache::new(ttl);
        self
    }

    // ==========================================
    // Baseline lifecycle
    // ==========================================

    /// Create a baseline snapshot from the current working set.
    ///
    /// Aggregates first so parent stages freeze their derived actuals,
    /// builds the snapshot, persists it, and invalidates the project's
    /// cached list before returning.
    ///
    /// # Errors
    /// - `ApiError::InvalidInput`: empty project/operator name
    /// - `ApiError::ValidationError`: nothing meaningful to snapshot
    pub fn create_baseline(
        &self,
        project: &Project,
        entries: &[ScheduleEntry],
        visualization_type: &str,
        created_by: &str,
    ) -> ApiResult<BaselineVersion> {
        if project.name.trim().is_empty() {
            return Err(ApiError::InvalidInput("project name must not be empty".to_string()));
        }
        if created_by.trim().is_empty() {
            return Err(ApiError::InvalidInput("operator must not be empty".to_string()));
        }
        if visualization_type.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "visualization type must not be empty".to_string(),
            ));
        }

        // 1. Aggregate a working copy so child actuals roll up
        let mut aggregated = entries.to_vec();
        StageAggregator::new(&self.catalog).aggregate(&mut aggregated);

        // 2. Discover existing version names for the P{n} numbering
        let existing: Vec<String> = self
            .list_from_store(&project.name)?
            .into_iter()
            .map(|b| b.version_name)
            .collect();

        // 3. Freeze the snapshot
        let baseline = BaselineSnapshotBuilder::new(&self.catalog).build(
            project,
            &aggregated,
            visualization_type,
            created_by,
            chrono::Local::now().naive_local(),
            &existing,
        )?;

        // 4. Persist (all-or-nothing upsert on the unique key)
        self.upsert_to_store(&baseline)?;

        // 5. Audit trail (best-effort)
        self.write_audit(
            AuditRecord::new(
                project.name.clone(),
                AuditActionType::CreateBaseline,
                created_by,
                baseline.created_at,
            )
            .with_payload(serde_json::json!({
                "version_name": baseline.version_name,
                "visualization_type": baseline.visualization_type,
                "total_tasks": baseline.total_tasks(),
            }))
            .with_detail(format!("baseline created: {}", baseline.version_name)),
        );

        // 6. Synchronous invalidation, before the caller can re-read
        self.cache.invalidate(&project.name);

        info!(
            project = project.name.as_str(),
            version = baseline.version_name.as_str(),
            tasks = baseline.total_tasks(),
            "baseline persisted"
        );

        Ok(baseline)
    }

    /// Ordered baseline list for a project, cache-first.
    pub fn list_baselines(&self, project: &str) -> ApiResult<Vec<BaselineVersion>> {
        if project.trim().is_empty() {
            return Err(ApiError::InvalidInput("project name must not be empty".to_string()));
        }

        if let Some(cached) = self.cache.get(project) {
            return Ok(cached);
        }

        let versions = self.list_from_store(project)?;
        self.cache.put(project, versions.clone());
        Ok(versions)
    }

    /// Delete one baseline; NotFound propagates with the full key.
    pub fn delete_baseline(
        &self,
        project: &str,
        version_name: &str,
        operator: &str,
    ) -> ApiResult<()> {
        if project.trim().is_empty() {
            return Err(ApiError::InvalidInput("project name must not be empty".to_string()));
        }
        if version_name.trim().is_empty() {
            return Err(ApiError::InvalidInput("version name must not be empty".to_string()));
        }
        if operator.trim().is_empty() {
            return Err(ApiError::InvalidInput("operator must not be empty".to_string()));
        }

        self.delete_from_store(project, version_name)?;

        self.write_audit(
            AuditRecord::new(
                project,
                AuditActionType::DeleteBaseline,
                operator,
                chrono::Local::now().naive_local(),
            )
            .with_payload(serde_json::json!({ "version_name": version_name }))
            .with_detail(format!("baseline deleted: {}", version_name)),
        );

        // Synchronous invalidation, before the caller can re-read
        self.cache.invalidate(project);

        info!(project, version = version_name, "baseline deleted");
        Ok(())
    }

    /// Resolve a requested baseline name into a selection.
    ///
    /// None or the reserved "P0" name select the virtual live baseline.
    /// A named baseline that cannot be loaded is NotFound; render paths
    /// that prefer degrading to live use [`selection_or_live`].
    ///
    /// [`selection_or_live`]: Self::selection_or_live
    pub fn resolve_selection(
        &self,
        project: &str,
        version_name: Option<&str>,
    ) -> ApiResult<BaselineSelection> {
        let Some(name) = version_name else {
            return Ok(BaselineSelection::Live);
        };
        if name.eq_ignore_ascii_case(LIVE_BASELINE_NAME) {
            return Ok(BaselineSelection::Live);
        }

        match self.find_in_store(project, name)? {
            Some(baseline) => Ok(BaselineSelection::Version(baseline)),
            None => Err(ApiError::NotFound(format!(
                "baseline {} of project {} does not exist",
                name, project
            ))),
        }
    }

    /// Render-path resolution: a baseline that is absent or fails to
    /// load degrades to the live P0 with a warning, so a render never
    /// fails because a snapshot vanished or went stale.
    pub fn selection_or_live(&self, project: &str, version_name: Option<&str>) -> BaselineSelection {
        match self.resolve_selection(project, version_name) {
            Ok(selection) => selection,
            Err(e) => {
                warn!(
                    project,
                    requested = version_name.unwrap_or(LIVE_BASELINE_NAME),
                    error = %e,
                    "baseline unavailable, rendering against live (P0)"
                );
                BaselineSelection::Live
            }
        }
    }

    // ==========================================
    // Store access with in-memory degradation
    // ==========================================

    fn upsert_to_store(&self, baseline: &BaselineVersion) -> ApiResult<()> {
        match self.store.upsert_baseline(baseline) {
            Ok(()) => Ok(()),
            Err(e) if e.is_store_unreachable() => {
                self.warn_degraded("upsert", &e);
                Ok(self.fallback.upsert_baseline(baseline)?)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn list_from_store(&self, project: &str) -> ApiResult<Vec<BaselineVersion>> {
        match self.store.list_baselines(project) {
            Ok(versions) => Ok(versions),
            Err(e) if e.is_store_unreachable() => {
                self.warn_degraded("list", &e);
                Ok(self.fallback.list_baselines(project)?)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn find_in_store(
        &self,
        project: &str,
        version_name: &str,
    ) -> ApiResult<Option<BaselineVersion>> {
        match self.store.find_baseline(project, version_name) {
            Ok(found) => Ok(found),
            Err(e) if e.is_store_unreachable() => {
                self.warn_degraded("find", &e);
                Ok(self.fallback.find_baseline(project, version_name)?)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn delete_from_store(&self, project: &str, version_name: &str) -> ApiResult<()> {
        match self.store.delete_baseline(project, version_name) {
            Ok(()) => Ok(()),
            Err(e) if e.is_store_unreachable() => {
                self.warn_degraded("delete", &e);
                Ok(self.fallback.delete_baseline(project, version_name)?)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn warn_degraded(&self, operation: &str, err: &RepositoryError) {
        warn!(
            operation,
            error = %err,
            "baseline store unreachable, degrading to non-durable in-memory store"
        );
    }

    fn write_audit(&self, record: AuditRecord) {
        if let Some(repo) = &self.audit_repo {
            if let Err(e) = repo.insert(&record) {
                warn!(error = %e, "audit record write failed, continuing");
            }
        }
    }
}

// ==========================================
// Obra Schedule - Baseline Store Contract
// ==========================================
// Persistence contract for baseline snapshots, plus the versioned
// snapshot document persisted as a JSON blob. Snapshot saves are
// all-or-nothing; a blob that fails to decode is reported as such and
// treated as "baseline absent" by the callers, never shown as corrupt
// data to the user.
// ==========================================

use crate::domain::{BaselineTaskSnapshot, BaselineVersion};
use crate::repository::error::{RepositoryError, RepositoryResult};
use serde::{Deserialize, Serialize};

/// Schema version written into every persisted snapshot document.
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

// ==========================================
// BaselineStore - persistence contract
// ==========================================
pub trait BaselineStore: Send + Sync {
    /// Insert or replace one baseline under its (project, version_name)
    /// unique key.
    fn upsert_baseline(&self, baseline: &BaselineVersion) -> RepositoryResult<()>;

    /// All baselines of a project, ordered by version number (names
    /// that do not parse sort last, by name).
    fn list_baselines(&self, project: &str) -> RepositoryResult<Vec<BaselineVersion>>;

    /// One baseline by name; Ok(None) when absent or undecodable.
    fn find_baseline(
        &self,
        project: &str,
        version_name: &str,
    ) -> RepositoryResult<Option<BaselineVersion>>;

    /// Delete one baseline; NotFound when it does not exist.
    fn delete_baseline(&self, project: &str, version_name: &str) -> RepositoryResult<()>;
}

// ==========================================
// SnapshotDocument - persisted JSON envelope
// ==========================================
// Explicitly-optional-field schema validated on read: every task field
// except stage_code carries a serde default, and the envelope carries
// a schema version so newer writers never get silently misread.
#[derive(Debug, Serialize, Deserialize)]
pub struct SnapshotDocument {
    pub schema_version: u32,
    #[serde(default)]
    pub tasks: Vec<BaselineTaskSnapshot>,
}

impl SnapshotDocument {
    pub fn encode(tasks: &[BaselineTaskSnapshot]) -> RepositoryResult<String> {
        let doc = SnapshotDocument {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            tasks: tasks.to_vec(),
        };
        Ok(serde_json::to_string(&doc)?)
    }

    pub fn decode(raw: &str) -> RepositoryResult<Vec<BaselineTaskSnapshot>> {
        let doc: SnapshotDocument = serde_json::from_str(raw)?;
        if doc.schema_version > SNAPSHOT_SCHEMA_VERSION {
            return Err(RepositoryError::SnapshotDecode(format!(
                "unsupported snapshot schema version {}",
                doc.schema_version
            )));
        }
        Ok(doc.tasks)
    }
}

/// Ordering shared by both store implementations.
pub(crate) fn sort_by_version_number(versions: &mut [BaselineVersion]) {
    versions.sort_by(|a, b| match (a.version_number(), b.version_number()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.version_name.cmp(&b.version_name),
    });
}

// ==========================================
// Obra Schedule - SQLite Baseline Repository
// ==========================================
// Durable BaselineStore over the baseline_version table. The snapshot
// itself is one JSON document per row; a row whose document no longer
// decodes is logged and treated as absent, never surfaced as corrupt
// data.
// ==========================================

use crate::domain::BaselineVersion;
use crate::repository::baseline_store::{
    sort_by_version_number, BaselineStore, SnapshotDocument,
};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};
use tracing::warn;

// ==========================================
// SqliteBaselineStore
// ==========================================
pub struct SqliteBaselineStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteBaselineStore {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &rusqlite::Row) -> rusqlite::Result<RawBaselineRow> {
        Ok(RawBaselineRow {
            project: row.get(0)?,
            version_name: row.get(1)?,
            created_at: row.get(2)?,
            created_by: row.get(3)?,
            visualization_type: row.get(4)?,
            snapshot_json: row.get(5)?,
        })
    }

    /// Decode one raw row; None (plus a warning) when the stored
    /// document is unreadable, so stale blobs degrade to "absent".
    fn decode_row(raw: RawBaselineRow) -> Option<BaselineVersion> {
        let created_at =
            match NaiveDateTime::parse_from_str(&raw.created_at, "%Y-%m-%d %H:%M:%S") {
                Ok(ts) => ts,
                Err(e) => {
                    warn!(
                        project = raw.project.as_str(),
                        version = raw.version_name.as_str(),
                        error = %e,
                        "baseline row has unreadable created_at, treating as absent"
                    );
                    return None;
                }
            };
        let tasks = match SnapshotDocument::decode(&raw.snapshot_json) {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!(
                    project = raw.project.as_str(),
                    version = raw.version_name.as_str(),
                    error = %e,
                    "baseline snapshot failed to decode, treating as absent"
                );
                return None;
            }
        };
        Some(BaselineVersion {
            project: raw.project,
            version_name: raw.version_name,
            created_at,
            created_by: raw.created_by,
            visualization_type: raw.visualization_type,
            tasks,
        })
    }
}

struct RawBaselineRow {
    project: String,
    version_name: String,
    created_at: String,
    created_by: String,
    visualization_type: String,
    snapshot_json: String,
}

impl BaselineStore for SqliteBaselineStore {
    fn upsert_baseline(&self, baseline: &BaselineVersion) -> RepositoryResult<()> {
        let snapshot_json = SnapshotDocument::encode(&baseline.tasks)?;
        let conn = self.get_conn()?;

        conn.execute(
            r#"INSERT INTO baseline_version (
                project, version_name, created_at, created_by,
                visualization_type, total_tasks, snapshot_json
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (project, version_name) DO UPDATE SET
                created_at = excluded.created_at,
                created_by = excluded.created_by,
                visualization_type = excluded.visualization_type,
                total_tasks = excluded.total_tasks,
                snapshot_json = excluded.snapshot_json"#,
            params![
                &baseline.project,
                &baseline.version_name,
                &baseline.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                &baseline.created_by,
                &baseline.visualization_type,
                baseline.tasks.len() as i64,
                &snapshot_json,
            ],
        )?;

        Ok(())
    }

    fn list_baselines(&self, project: &str) -> RepositoryResult<Vec<BaselineVersion>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"SELECT project, version_name, created_at, created_by,
                      visualization_type, snapshot_json
               FROM baseline_version
               WHERE project = ?
               ORDER BY version_name"#,
        )?;

        let raw_rows = stmt
            .query_map(params![project], Self::map_row)?
            .collect::<Result<Vec<RawBaselineRow>, _>>()?;

        let mut versions: Vec<BaselineVersion> =
            raw_rows.into_iter().filter_map(Self::decode_row).collect();
        sort_by_version_number(&mut versions);
        Ok(versions)
    }

    fn find_baseline(
        &self,
        project: &str,
        version_name: &str,
    ) -> RepositoryResult<Option<BaselineVersion>> {
        let conn = self.get_conn()?;

        match conn.query_row(
            r#"SELECT project, version_name, created_at, created_by,
                      visualization_type, snapshot_json
               FROM baseline_version
               WHERE project = ? AND version_name = ?"#,
            params![project, version_name],
            Self::map_row,
        ) {
            Ok(raw) => Ok(Self::decode_row(raw)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn delete_baseline(&self, project: &str, version_name: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let affected = conn.execute(
            "DELETE FROM baseline_version WHERE project = ? AND version_name = ?",
            params![project, version_name],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "BaselineVersion".to_string(),
                id: format!("{}/{}", project, version_name),
            });
        }

        Ok(())
    }
}

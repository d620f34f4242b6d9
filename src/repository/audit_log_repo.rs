// ==========================================
// Obra Schedule - Audit Log Repository
// ==========================================

use crate::domain::types::AuditActionType;
use crate::domain::AuditRecord;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

// ==========================================
// AuditLogRepository
// ==========================================
pub struct AuditLogRepository {
    conn: Arc<Mutex<Connection>>,
}

impl AuditLogRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    pub fn insert(&self, record: &AuditRecord) -> RepositoryResult<()> {
        let payload_json = record
            .payload_json
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let conn = self.get_conn()?;

        conn.execute(
            r#"INSERT INTO audit_log (
                audit_id, project, action_type, actor, action_ts,
                payload_json, detail
            ) VALUES (?, ?, ?, ?, ?, ?, ?)"#,
            params![
                &record.audit_id,
                &record.project,
                record.action_type.to_db_str(),
                &record.actor,
                &record.action_ts.format("%Y-%m-%d %H:%M:%S").to_string(),
                &payload_json,
                &record.detail,
            ],
        )?;

        Ok(())
    }

    /// Audit records of a project, most recent first.
    pub fn find_by_project(&self, project: &str) -> RepositoryResult<Vec<AuditRecord>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"SELECT audit_id, project, action_type, actor, action_ts,
                      payload_json, detail
               FROM audit_log
               WHERE project = ?
               ORDER BY action_ts DESC, audit_id"#,
        )?;

        let records = stmt
            .query_map(params![project], Self::map_row)?
            .collect::<Result<Vec<AuditRecord>, _>>()?;

        Ok(records)
    }

    fn map_row(row: &rusqlite::Row) -> rusqlite::Result<AuditRecord> {
        let action_str: String = row.get(2)?;
        let action_type = AuditActionType::from_db_str(&action_str).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                2,
                rusqlite::types::Type::Text,
                format!("unknown audit action type: {}", action_str).into(),
            )
        })?;
        let action_ts =
            NaiveDateTime::parse_from_str(&row.get::<_, String>(4)?, "%Y-%m-%d %H:%M:%S").map_err(
                |e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        4,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                },
            )?;
        let payload_json = row
            .get::<_, Option<String>>(5)?
            .and_then(|raw| serde_json::from_str(&raw).ok());

        Ok(AuditRecord {
            audit_id: row.get(0)?,
            project: row.get(1)?,
            action_type,
            actor: row.get(3)?,
            action_ts,
            payload_json,
            detail: row.get(6)?,
        })
    }
}

// ==========================================
// Obra Schedule - SQLite Connection Setup
// ==========================================
// Goals:
// - unify PRAGMA behavior across every Connection::open
// - unify busy_timeout to reduce sporadic busy errors on writes
// - bootstrap the schema in one place
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// Default busy_timeout (milliseconds).
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Apply the unified PRAGMA set to a connection.
///
/// foreign_keys and busy_timeout are per-connection settings and must
/// be applied to every connection, not once per database.
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Open a SQLite connection with the unified configuration.
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Create the engine's tables when absent.
///
/// The unique key on (project, version_name) is the only guard against
/// two concurrent snapshot requests producing duplicate version
/// numbers; the race itself is accepted, not solved here.
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS baseline_version (
            project            TEXT NOT NULL,
            version_name       TEXT NOT NULL,
            created_at         TEXT NOT NULL,
            created_by         TEXT NOT NULL,
            visualization_type TEXT NOT NULL,
            total_tasks        INTEGER NOT NULL,
            snapshot_json      TEXT NOT NULL,
            PRIMARY KEY (project, version_name)
        );

        CREATE TABLE IF NOT EXISTS audit_log (
            audit_id     TEXT PRIMARY KEY,
            project      TEXT NOT NULL,
            action_type  TEXT NOT NULL,
            actor        TEXT NOT NULL,
            action_ts    TEXT NOT NULL,
            payload_json TEXT,
            detail       TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_audit_log_project
            ON audit_log (project, action_ts);
        "#,
    )
}

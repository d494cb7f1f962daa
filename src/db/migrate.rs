use crate::ui::messages::success;
use rusqlite::{Connection, Error, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the `frames` table with the modern schema (including `jira_worklog`).
fn create_frames_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS frames (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            project       TEXT NOT NULL,
            tags          TEXT NOT NULL DEFAULT '[]',
            start         TEXT NOT NULL,
            stop          TEXT NOT NULL,
            note          TEXT,
            jira_worklog  TEXT,
            updated_at    TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_frames_start ON frames(start);
        CREATE INDEX IF NOT EXISTS idx_frames_project ON frames(project);
        "#,
    )?;
    Ok(())
}

/// Singleton table holding the running session, if any.
fn create_current_frame_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS current_frame (
            id       INTEGER PRIMARY KEY CHECK (id = 1),
            project  TEXT NOT NULL,
            tags     TEXT NOT NULL DEFAULT '[]',
            start    TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn migrate_add_jira_worklog_column(conn: &Connection) -> Result<(), Error> {
    let version = "20250301_0002_add_jira_worklog_to_frames";

    // 1) Already applied?
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(());
    }

    // 2) Add the column only where it is missing (fresh tables already have it)
    if !column_exists(conn, "frames", "jira_worklog")? {
        conn.execute("ALTER TABLE frames ADD COLUMN jira_worklog TEXT;", [])
            .map_err(|e| {
                Error::SqliteFailure(
                    rusqlite::ffi::Error::new(1),
                    Some(format!("Failed to add 'jira_worklog' column: {}", e)),
                )
            })?;

        success(format!(
            "Migration applied: {} → added 'jira_worklog' to frames table",
            version
        ));
    }

    // 3) Mark as applied
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Added jira_worklog to frames')",
        [version],
    )?;

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Frames
    if !table_exists(conn, "frames")? {
        create_frames_table(conn)?;
    } else {
        migrate_add_jira_worklog_column(conn)?;
    }

    // 3) Running session
    create_current_frame_table(conn)?;

    Ok(())
}

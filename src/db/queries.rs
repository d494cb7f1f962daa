use crate::errors::{AppError, AppResult};
use crate::models::frame::{CurrentFrame, Frame};
use chrono::{DateTime, Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

/// Optional filters for [`list_frames`]. Dates are inclusive and compared
/// against the local start date of each frame.
#[derive(Debug, Clone, Default)]
pub struct FrameFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub project: Option<String>,
}

impl FrameFilter {
    fn accepts(&self, frame: &Frame) -> bool {
        let day = frame.start.date_naive();
        self.from.is_none_or(|f| day >= f) && self.to.is_none_or(|t| day <= t)
    }
}

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_timestamp(col: usize, raw: &str) -> Result<DateTime<Local>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|_| conversion_error(col, AppError::InvalidTime(raw.to_string())))
}

fn parse_tags(col: usize, raw: &str) -> Result<Vec<String>> {
    serde_json::from_str(raw).map_err(|e| conversion_error(col, AppError::Json(e)))
}

fn tags_to_json(tags: &[String]) -> AppResult<String> {
    Ok(serde_json::to_string(tags)?)
}

pub fn map_frame(row: &Row) -> Result<Frame> {
    let tags_raw: String = row.get("tags")?;
    let start_raw: String = row.get("start")?;
    let stop_raw: String = row.get("stop")?;

    Ok(Frame {
        id: row.get("id")?,
        project: row.get("project")?,
        tags: parse_tags(2, &tags_raw)?,
        start: parse_timestamp(3, &start_raw)?,
        stop: parse_timestamp(4, &stop_raw)?,
        note: row.get("note")?,
        jira_worklog: row.get("jira_worklog")?,
        updated_at: row.get("updated_at")?,
    })
}

fn map_current(row: &Row) -> Result<CurrentFrame> {
    let tags_raw: String = row.get("tags")?;
    let start_raw: String = row.get("start")?;

    Ok(CurrentFrame {
        project: row.get("project")?,
        tags: parse_tags(1, &tags_raw)?,
        start: parse_timestamp(2, &start_raw)?,
    })
}

// ---------------------------
// Running session
// ---------------------------

pub fn load_current(conn: &Connection) -> AppResult<Option<CurrentFrame>> {
    let current = conn
        .query_row(
            "SELECT project, tags, start FROM current_frame WHERE id = 1",
            [],
            map_current,
        )
        .optional()?;
    Ok(current)
}

pub fn save_current(conn: &Connection, current: &CurrentFrame) -> AppResult<()> {
    conn.execute(
        "INSERT INTO current_frame (id, project, tags, start)
         VALUES (1, ?1, ?2, ?3)",
        params![
            current.project,
            tags_to_json(&current.tags)?,
            current.start.to_rfc3339()
        ],
    )?;
    Ok(())
}

pub fn clear_current(conn: &Connection) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM current_frame WHERE id = 1", [])?)
}

// ---------------------------
// Frames
// ---------------------------

/// Insert a finished frame and return its new id.
pub fn insert_frame(conn: &Connection, frame: &Frame) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO frames (project, tags, start, stop, note, jira_worklog, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            frame.project,
            tags_to_json(&frame.tags)?,
            frame.start.to_rfc3339(),
            frame.stop.to_rfc3339(),
            frame.note,
            frame.jira_worklog,
            frame.updated_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_frame(conn: &Connection, id: i64) -> AppResult<Option<Frame>> {
    let frame = conn
        .query_row("SELECT * FROM frames WHERE id = ?1", [id], map_frame)
        .optional()?;
    Ok(frame)
}

pub fn delete_frame(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM frames WHERE id = ?1", [id])?)
}

pub fn list_frames(conn: &Connection, filter: &FrameFilter) -> AppResult<Vec<Frame>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM frames
         WHERE (?1 IS NULL OR project = ?1)
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([filter.project.as_deref()], map_frame)?;

    let mut out = Vec::new();
    for r in rows {
        let frame = r?;
        if filter.accepts(&frame) {
            out.push(frame);
        }
    }
    // Stored offsets differ across DST changes, so order by instant, not by text.
    out.sort_by_key(|f| f.start);
    Ok(out)
}

use crate::db::log::ttlog_or_warn;
use crate::db::pool::DbPool;
use crate::db::queries::{load_current, save_current};
use crate::errors::{AppError, AppResult};
use crate::models::frame::CurrentFrame;
use chrono::{DateTime, Local};

pub struct StartLogic;

impl StartLogic {
    /// Start tracking `project`. Only one session may run at a time.
    pub fn apply(
        pool: &mut DbPool,
        project: &str,
        tags: &[String],
        start_at: Option<DateTime<Local>>,
    ) -> AppResult<CurrentFrame> {
        if project.trim().is_empty() {
            return Err(AppError::InvalidProject(project.to_string()));
        }

        if let Some(running) = load_current(&pool.conn)? {
            return Err(AppError::FrameAlreadyStarted(running.project));
        }

        let current = CurrentFrame::new(project, tags, start_at.unwrap_or_else(Local::now));
        save_current(&pool.conn, &current)?;

        ttlog_or_warn(
            &pool.conn,
            "start",
            &current.project,
            &format!(
                "Started {} {} at {}",
                current.project,
                crate::models::frame::format_tags(&current.tags),
                current.start.to_rfc3339()
            ),
        );

        Ok(current)
    }
}

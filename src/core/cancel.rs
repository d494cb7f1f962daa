use crate::db::log::ttlog_or_warn;
use crate::db::pool::DbPool;
use crate::db::queries::{clear_current, load_current};
use crate::errors::{AppError, AppResult};
use crate::models::frame::CurrentFrame;

pub struct CancelLogic;

impl CancelLogic {
    /// Drop the running session without recording it. Observers are not notified.
    pub fn apply(pool: &mut DbPool) -> AppResult<CurrentFrame> {
        let current = load_current(&pool.conn)?.ok_or(AppError::NoActiveFrame)?;
        clear_current(&pool.conn)?;

        ttlog_or_warn(
            &pool.conn,
            "cancel",
            &current.project,
            &format!("Cancelled {} started at {}", current.project, current.start.to_rfc3339()),
        );

        Ok(current)
    }
}

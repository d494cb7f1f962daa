use crate::core::observer::FrameObserver;
use crate::db::log::ttlog_or_warn;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_frame, get_frame};
use crate::errors::{AppError, AppResult};
use crate::models::frame::Frame;

pub struct RemoveLogic;

impl RemoveLogic {
    /// Delete frame `id`. The row is deleted inside a transaction that is
    /// committed only once every observer has processed the removal.
    pub fn apply(
        pool: &mut DbPool,
        observers: &[Box<dyn FrameObserver>],
        id: i64,
    ) -> AppResult<Frame> {
        let tx = pool.conn.transaction()?;

        let frame = get_frame(&tx, id)?.ok_or(AppError::FrameNotFound(id))?;
        delete_frame(&tx, id)?;

        for observer in observers {
            observer.frame_removed(&frame)?;
        }

        tx.commit()?;

        if let Some(worklog) = frame.worklog_id().filter(|_| !observers.is_empty()) {
            ttlog_or_warn(
                &pool.conn,
                "jira_del",
                &frame.project,
                &format!("Worklog {} removed with frame #{}", worklog, id),
            );
        }
        ttlog_or_warn(
            &pool.conn,
            "remove",
            &frame.project,
            &format!("Frame #{} deleted", id),
        );

        Ok(frame)
    }
}

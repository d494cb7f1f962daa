use crate::core::observer::FrameObserver;
use crate::db::log::ttlog_or_warn;
use crate::db::pool::DbPool;
use crate::db::queries::{clear_current, insert_frame, load_current};
use crate::errors::{AppError, AppResult};
use crate::models::frame::Frame;
use crate::ui::messages::warning;
use crate::utils::formatting::secs2readable;
use chrono::{DateTime, Local};
use rusqlite::Transaction;

pub struct StopLogic;

impl StopLogic {
    /// Finish the running session and record it as a frame.
    ///
    /// Every observer sees the finalized frame before it is stored. If one of
    /// them fails, or the frame cannot be stored, nothing is written and the
    /// session keeps running. Worklogs already created for the frame are
    /// removed again on a best-effort basis.
    pub fn apply(
        pool: &mut DbPool,
        observers: &[Box<dyn FrameObserver>],
        stop_at: Option<DateTime<Local>>,
        note: Option<String>,
    ) -> AppResult<Frame> {
        let tx = pool.conn.transaction()?;

        //
        // 1. Running session
        //
        let current = load_current(&tx)?.ok_or(AppError::NoActiveFrame)?;

        let stop = stop_at.unwrap_or_else(Local::now);
        if stop < current.start {
            return Err(AppError::InvalidTime(format!(
                "stop time {} is before the start of the frame ({})",
                stop.format("%Y-%m-%d %H:%M:%S"),
                current.start.format("%Y-%m-%d %H:%M:%S")
            )));
        }

        //
        // 2. Notify observers, then persist
        //
        let mut frame = current.finish(stop, note);
        let mut created: Vec<(&dyn FrameObserver, String)> = Vec::new();
        if let Err(e) = Self::record(tx, observers, &mut frame, &mut created) {
            Self::undo_created(&frame, &created);
            return Err(e);
        }

        //
        // 3. Internal log
        //
        let elapsed = frame.duration().num_seconds();
        if let Some(worklog) = frame.worklog_id() {
            ttlog_or_warn(
                &pool.conn,
                "jira_add",
                &frame.project,
                &format!("Worklog {} created for frame #{} ({}s)", worklog, frame.id, elapsed),
            );
        }
        ttlog_or_warn(
            &pool.conn,
            "stop",
            &frame.project,
            &format!("Frame #{} recorded ({})", frame.id, secs2readable(elapsed)),
        );

        Ok(frame)
    }

    fn record<'o>(
        tx: Transaction<'_>,
        observers: &'o [Box<dyn FrameObserver>],
        frame: &mut Frame,
        created: &mut Vec<(&'o dyn FrameObserver, String)>,
    ) -> AppResult<()> {
        for observer in observers {
            if let Some(worklog) = observer.frame_stopped(frame)? {
                frame.jira_worklog = Some(worklog.clone());
                created.push((observer.as_ref(), worklog));
            }
        }

        frame.id = insert_frame(&tx, frame)?;
        clear_current(&tx)?;
        tx.commit()?;
        Ok(())
    }

    /// Hand each created worklog back to the observer that made it.
    fn undo_created(frame: &Frame, created: &[(&dyn FrameObserver, String)]) {
        for (observer, worklog) in created {
            let orphan = Frame {
                jira_worklog: Some(worklog.clone()),
                ..frame.clone()
            };
            if let Err(e) = observer.frame_removed(&orphan) {
                warning(format!(
                    "Worklog {} on {} could not be removed: {}",
                    worklog, frame.project, e
                ));
            }
        }
    }
}

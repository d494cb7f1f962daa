//! Worklog synchronisation for finished and removed frames.

use chrono::{DateTime, Local};

use crate::core::observer::FrameObserver;
use crate::errors::AppResult;
use crate::jira::client::{Worklog, WorklogClient};
use crate::jira::policy::JiraPolicy;
use crate::models::frame::Frame;

pub struct JiraSync<C: WorklogClient> {
    policy: JiraPolicy,
    client: C,
}

/// Whole seconds between `start` and `stop`, truncated.
pub fn seconds_spent(start: DateTime<Local>, stop: DateTime<Local>) -> i64 {
    (stop - start).num_seconds()
}

impl<C: WorklogClient> JiraSync<C> {
    pub fn new(policy: JiraPolicy, client: C) -> Self {
        Self { policy, client }
    }

    pub fn policy(&self) -> &JiraPolicy {
        &self.policy
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Log the time between `start` and `stop` against the issue `project`.
    pub fn add_worklog(
        &self,
        project: &str,
        start: DateTime<Local>,
        stop: DateTime<Local>,
        comment: Option<&str>,
    ) -> AppResult<Worklog> {
        self.client
            .add_worklog(project, seconds_spent(start, stop), comment)
    }

    /// Delete the worklog stored on `frame`. No remote call when there is none.
    /// Returns whether a worklog was deleted.
    pub fn delete_worklog(&self, frame: &Frame) -> AppResult<bool> {
        match frame.worklog_id() {
            Some(id) => {
                self.client.delete_worklog(&frame.project, id)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// The remote worklog of `frame`, if it has one.
    pub fn fetch_worklog(&self, frame: &Frame) -> AppResult<Option<Worklog>> {
        frame
            .worklog_id()
            .map(|id| self.client.worklog(&frame.project, id))
            .transpose()
    }
}

impl<C: WorklogClient> FrameObserver for JiraSync<C> {
    fn frame_stopped(&self, frame: &Frame) -> AppResult<Option<String>> {
        if !self.policy.requires_worklog(&frame.project, &frame.tags) {
            return Ok(None);
        }

        let comment = self.policy.comment_for(&frame.tags, frame.note.as_deref());
        let worklog = self.add_worklog(&frame.project, frame.start, frame.stop, comment.as_deref())?;
        Ok(Some(worklog.id))
    }

    fn frame_removed(&self, frame: &Frame) -> AppResult<()> {
        self.delete_worklog(frame)?;
        Ok(())
    }
}

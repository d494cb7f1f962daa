//! Hooks invoked by the tracker around the lifecycle of a frame.

use crate::errors::AppResult;
use crate::models::frame::Frame;

/// Capability notified when a session is finalized or a recorded frame is removed.
///
/// Errors abort the operation in progress: a failing `frame_stopped` leaves the
/// session running, a failing `frame_removed` keeps the frame.
pub trait FrameObserver {
    /// Called with the finalized (not yet stored) frame.
    ///
    /// Returns the id of a remote worklog created for it, which the tracker
    /// stores in `Frame::jira_worklog`. `None` when nothing was created.
    fn frame_stopped(&self, frame: &Frame) -> AppResult<Option<String>>;

    /// Called with a stored frame right before it is deleted.
    fn frame_removed(&self, frame: &Frame) -> AppResult<()>;
}

pub type Observers = Vec<Box<dyn FrameObserver>>;

//! Remote worklog operations, abstracted so the sync logic can run against
//! a real Jira server or an in-process fake.

use crate::errors::AppResult;
use serde::Serialize;

/// A worklog as stored on the Jira side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Worklog {
    pub id: String,
    pub issue: String,
    pub seconds_spent: i64,
    pub comment: Option<String>,
}

pub trait WorklogClient {
    /// Record `seconds` of work on `issue` and return the created worklog.
    fn add_worklog(&self, issue: &str, seconds: i64, comment: Option<&str>) -> AppResult<Worklog>;

    /// Fetch a single worklog.
    fn worklog(&self, issue: &str, id: &str) -> AppResult<Worklog>;

    fn delete_worklog(&self, issue: &str, id: &str) -> AppResult<()>;
}

//! Optional Jira worklog integration.

pub mod client;
pub mod policy;
pub mod rest;
pub mod sync;

pub use client::{Worklog, WorklogClient};
pub use policy::JiraPolicy;
pub use rest::JiraRestClient;
pub use sync::{JiraSync, seconds_spent};

use crate::config::JiraConfig;
use crate::core::observer::Observers;
use crate::errors::AppResult;

/// Validate the `jira:` options and build the REST-backed sync.
/// `None` when the integration is disabled.
pub fn sync_from_config(cfg: &JiraConfig) -> AppResult<Option<JiraSync<JiraRestClient>>> {
    let policy = JiraPolicy::from_config(cfg)?;
    if !policy.is_enabled() {
        return Ok(None);
    }
    let client = JiraRestClient::from_config(cfg)?;
    Ok(Some(JiraSync::new(policy, client)))
}

/// Frame observers for this configuration. Empty when Jira is disabled.
pub fn observers_from_config(cfg: &JiraConfig) -> AppResult<Observers> {
    let mut observers: Observers = Vec::new();
    if let Some(sync) = sync_from_config(cfg)? {
        observers.push(Box::new(sync));
    }
    Ok(observers)
}

//! Raw `jira:` section of the configuration file.
//!
//! The values here are exactly what the user wrote. They are turned into
//! validated objects (`JiraPolicy`, `JiraRestClient`) once per command run,
//! see `crate::jira::observers_from_config`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JiraConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_regex: Option<String>,
    #[serde(default = "default_track_time_tag")]
    pub track_time_tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default = "default_review_tag")]
    pub review_tag: String,
    #[serde(default = "default_review_comment")]
    pub review_comment: String,
}

fn default_track_time_tag() -> String {
    "track-time".to_string()
}
fn default_review_tag() -> String {
    "review".to_string()
}
fn default_review_comment() -> String {
    "review".to_string()
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            project_regex: None,
            track_time_tag: default_track_time_tag(),
            server: None,
            user: None,
            token: None,
            review_tag: default_review_tag(),
            review_comment: default_review_comment(),
        }
    }
}

/// Treat blank strings the same as missing keys.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

//! Decides whether a finished frame must be logged to Jira, and with which comment.

use crate::config::JiraConfig;
use crate::config::jira::non_empty;
use crate::errors::{AppError, AppResult};
use crate::models::frame::has_tag;
use regex::Regex;

/// Validated form of the `jira:` options that drive the logging decision.
#[derive(Debug, Clone)]
pub struct JiraPolicy {
    enabled: bool,
    project_regex: Option<Regex>,
    track_time_tag: String,
    review_tag: String,
    review_comment: String,
}

impl JiraPolicy {
    /// Validate the raw options.
    ///
    /// Fails when the integration is enabled but `project_regex` is missing,
    /// blank or not a valid pattern. A disabled integration never fails.
    pub fn from_config(cfg: &JiraConfig) -> AppResult<Self> {
        let project_regex = if cfg.enabled {
            let pattern = non_empty(&cfg.project_regex).ok_or_else(|| {
                AppError::Config(
                    "You must specify jira.project_regex in order to use jira integration"
                        .to_string(),
                )
            })?;
            let re = Regex::new(pattern).map_err(|e| {
                AppError::Config(format!("Invalid jira.project_regex {:?}: {}", pattern, e))
            })?;
            Some(re)
        } else {
            None
        };

        Ok(Self {
            enabled: cfg.enabled,
            project_regex,
            track_time_tag: cfg.track_time_tag.clone(),
            review_tag: cfg.review_tag.clone(),
            review_comment: cfg.review_comment.clone(),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn pattern(&self) -> Option<&str> {
        self.project_regex.as_ref().map(Regex::as_str)
    }

    pub fn track_time_tag(&self) -> &str {
        &self.track_time_tag
    }

    /// True when the project identifier matches the configured pattern,
    /// anchored at its first character.
    pub fn matches_project(&self, project: &str) -> bool {
        self.project_regex
            .as_ref()
            .and_then(|re| re.find(project))
            .is_some_and(|m| m.start() == 0)
    }

    /// Whether a session on `project` with `tags` must produce a worklog.
    pub fn requires_worklog(&self, project: &str, tags: &[String]) -> bool {
        if !self.enabled {
            return false;
        }
        self.matches_project(project) && has_tag(tags, &self.track_time_tag)
    }

    /// Comment attached to the worklog: the review comment when the review tag
    /// is present, otherwise the frame note.
    pub fn comment_for(&self, tags: &[String], note: Option<&str>) -> Option<String> {
        if has_tag(tags, &self.review_tag) {
            Some(self.review_comment.clone())
        } else {
            note.map(str::to_string)
        }
    }
}

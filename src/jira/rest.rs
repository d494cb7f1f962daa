//! Blocking Jira REST (v2) client for issue worklogs.

use std::collections::BTreeMap;

use reqwest::Url;
use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};

use crate::config::JiraConfig;
use crate::config::jira::non_empty;
use crate::errors::{AppError, AppResult};
use crate::jira::client::{Worklog, WorklogClient};

pub struct JiraRestClient {
    http: Client,
    server: Url,
    user: String,
    token: String,
}

/// Body of `POST /rest/api/2/issue/{issue}/worklog`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddWorklogBody<'a> {
    time_spent_seconds: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<&'a str>,
}

/// The subset of Jira's worklog representation we care about.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WorklogBody {
    id: String,
    #[serde(default)]
    time_spent_seconds: i64,
    #[serde(default)]
    comment: Option<String>,
}

/// Jira's standard error envelope.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct JiraErrorBody {
    #[serde(default)]
    error_messages: Vec<String>,
    #[serde(default)]
    errors: BTreeMap<String, serde_json::Value>,
}

impl JiraRestClient {
    /// Build a client from the `jira:` options. Server, user and token are all required.
    pub fn from_config(cfg: &JiraConfig) -> AppResult<Self> {
        match (
            non_empty(&cfg.server),
            non_empty(&cfg.user),
            non_empty(&cfg.token),
        ) {
            (Some(server), Some(user), Some(token)) => Self::new(server, user, token),
            _ => Err(AppError::Config(
                "You must specify jira.server, jira.user and jira.token \
                 in order to use jira integration"
                    .to_string(),
            )),
        }
    }

    pub fn new(server: &str, user: &str, token: &str) -> AppResult<Self> {
        let server = Url::parse(server)
            .ok()
            .filter(|u| !u.cannot_be_a_base())
            .ok_or_else(|| AppError::Config(format!("Invalid jira.server URL: {:?}", server)))?;

        let http = Client::builder()
            .user_agent(concat!("rwatson/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            server,
            user: user.to_string(),
            token: token.to_string(),
        })
    }

    pub fn server(&self) -> &Url {
        &self.server
    }

    /// `{server}/rest/api/2/issue/{issue}/worklog[/{id}]`, each segment percent-encoded.
    fn worklog_url(&self, issue: &str, id: Option<&str>) -> AppResult<Url> {
        let mut url = self.server.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| AppError::Config(format!("Invalid jira.server URL: {}", self.server)))?;
            segments
                .pop_if_empty()
                .extend(["rest", "api", "2", "issue", issue, "worklog"]);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    fn check(resp: Response) -> AppResult<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().unwrap_or_default();
        Err(AppError::Jira {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }

    fn into_worklog(issue: &str, body: WorklogBody) -> Worklog {
        Worklog {
            id: body.id,
            issue: issue.to_string(),
            seconds_spent: body.time_spent_seconds,
            comment: body.comment,
        }
    }
}

/// Flatten a Jira error response into one line. Falls back to the raw body.
fn error_message(body: &str) -> String {
    let parsed: JiraErrorBody = serde_json::from_str(body).unwrap_or_default();

    let mut parts = parsed.error_messages;
    for (field, value) in parsed.errors {
        let text = value.as_str().map(str::to_string).unwrap_or_else(|| value.to_string());
        parts.push(format!("{}: {}", field, text));
    }

    if !parts.is_empty() {
        parts.join("; ")
    } else if body.trim().is_empty() {
        "empty response body".to_string()
    } else {
        body.trim().to_string()
    }
}

impl WorklogClient for JiraRestClient {
    fn add_worklog(&self, issue: &str, seconds: i64, comment: Option<&str>) -> AppResult<Worklog> {
        let url = self.worklog_url(issue, None)?;
        let resp = self
            .http
            .post(url)
            .basic_auth(&self.user, Some(&self.token))
            .json(&AddWorklogBody {
                time_spent_seconds: seconds,
                comment,
            })
            .send()?;

        let body: WorklogBody = Self::check(resp)?.json()?;
        Ok(Self::into_worklog(issue, body))
    }

    fn worklog(&self, issue: &str, id: &str) -> AppResult<Worklog> {
        let url = self.worklog_url(issue, Some(id))?;
        let resp = self
            .http
            .get(url)
            .basic_auth(&self.user, Some(&self.token))
            .send()?;

        let body: WorklogBody = Self::check(resp)?.json()?;
        Ok(Self::into_worklog(issue, body))
    }

    fn delete_worklog(&self, issue: &str, id: &str) -> AppResult<()> {
        let url = self.worklog_url(issue, Some(id))?;
        let resp = self
            .http
            .delete(url)
            .basic_auth(&self.user, Some(&self.token))
            .send()?;

        Self::check(resp)?;
        Ok(())
    }
}

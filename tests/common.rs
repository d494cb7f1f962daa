#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::runtime::Runtime;

pub fn rwa() -> Command {
    cargo_bin_cmd!("rwatson")
}

/// Scratch directory holding a config file and a database for one test.
pub struct TestEnv {
    _dir: TempDir,
    pub config: String,
    pub db: String,
}

impl TestEnv {
    /// Config without a `jira:` section (integration disabled).
    pub fn new() -> Self {
        Self::with_config("")
    }

    /// `extra` is appended verbatim to the YAML config after the `database` key.
    pub fn with_config(extra: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let db = dir.path().join("rwatson.sqlite").to_string_lossy().to_string();
        let config = dir.path().join("rwatson.conf").to_string_lossy().to_string();

        let yaml = format!("database: {:?}\n{}", db, extra);
        fs::write(&config, yaml).expect("write config");

        Self {
            _dir: dir,
            config,
            db,
        }
    }

    /// `rwatson --config <cfg> <args...>`
    pub fn cmd(&self, args: &[&str]) -> Command {
        let mut cmd = rwa();
        cmd.env("NO_PROXY", "127.0.0.1,localhost")
            .env("no_proxy", "127.0.0.1,localhost")
            .args(["--config", &self.config])
            .args(args);
        cmd
    }

    pub fn path(&self) -> PathBuf {
        PathBuf::from(&self.config)
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_default()
    }

    /// Worklog ids stored on the frames, ordered by id.
    pub fn stored_worklogs(&self) -> Vec<Option<String>> {
        let conn = rusqlite::Connection::open(&self.db).expect("open db");
        let mut stmt = conn
            .prepare("SELECT jira_worklog FROM frames ORDER BY id")
            .expect("prepare");
        stmt.query_map([], |row| row.get(0))
            .expect("query")
            .map(|r| r.expect("row"))
            .collect()
    }

    pub fn frame_count(&self) -> i64 {
        let conn = rusqlite::Connection::open(&self.db).expect("open db");
        conn.query_row("SELECT COUNT(*) FROM frames", [], |row| row.get(0))
            .expect("count")
    }
}

/// `jira:` section pointing at `server`.
pub fn jira_section(server: &str) -> String {
    format!(
        "jira:\n  enabled: true\n  project_regex: \"^PROJ-\"\n  server: {:?}\n  user: me@example.com\n  token: secret\n",
        server
    )
}

/// Expected `Authorization` header for the credentials in [`jira_section`].
pub const BASIC_AUTH: &str = "Basic bWVAZXhhbXBsZS5jb206c2VjcmV0";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: String,
}

impl Recorded {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

struct FakeState {
    responses: Mutex<VecDeque<(u16, String)>>,
    requests: Mutex<Vec<Recorded>>,
}

/// Jira stand-in: answers every request with the next canned response and
/// records what it received. Requests past the script get a 500.
pub struct FakeJira {
    pub url: String,
    state: Arc<FakeState>,
    _runtime: Runtime,
}

async fn fake_jira_handler(
    State(state): State<Arc<FakeState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.requests.lock().push(Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: String::from_utf8_lossy(&body).to_string(),
    });

    match state.responses.lock().pop_front() {
        Some((code, body)) => (
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        None => (StatusCode::INTERNAL_SERVER_ERROR, "unexpected request").into_response(),
    }
}

impl FakeJira {
    pub fn start(responses: Vec<(u16, &str)>) -> Self {
        let state = Arc::new(FakeState {
            responses: Mutex::new(
                responses
                    .into_iter()
                    .map(|(code, body)| (code, body.to_string()))
                    .collect(),
            ),
            requests: Mutex::new(Vec::new()),
        });

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("build runtime");

        let listener = runtime
            .block_on(TcpListener::bind("127.0.0.1:0"))
            .expect("bind fake jira");
        let url = format!("http://{}", listener.local_addr().expect("local addr"));

        let app = Router::new()
            .fallback(fake_jira_handler)
            .with_state(Arc::clone(&state));
        runtime.spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            url,
            state,
            _runtime: runtime,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().clone()
    }
}

pub const WORKLOG_10001: &str =
    r#"{"id":"10001","issueId":"10100","timeSpentSeconds":60,"timeSpent":"1m"}"#;

use chrono::{DateTime, Local, TimeZone};
use rwatson::config::{Config, JiraConfig};
use rwatson::core::observer::{FrameObserver, Observers};
use rwatson::core::remove::RemoveLogic;
use rwatson::core::start::StartLogic;
use rwatson::core::stop::StopLogic;
use rwatson::db::pool::DbPool;
use rwatson::db::queries::{get_frame, load_current};
use rwatson::errors::{AppError, AppResult};
use rwatson::jira::{JiraPolicy, JiraSync, Worklog, WorklogClient, observers_from_config, seconds_spent};
use rwatson::models::frame::{CurrentFrame, Frame};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Add {
        issue: String,
        seconds: i64,
        comment: Option<String>,
    },
    Get {
        issue: String,
        id: String,
    },
    Delete {
        issue: String,
        id: String,
    },
}

/// Records calls; clones share the same log.
#[derive(Clone, Default)]
struct FakeClient {
    calls: Rc<RefCell<Vec<Call>>>,
    fail: bool,
}

impl FakeClient {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn check(&self) -> AppResult<()> {
        if self.fail {
            Err(AppError::Jira {
                status: 401,
                message: "Unauthorized".into(),
            })
        } else {
            Ok(())
        }
    }
}

impl WorklogClient for FakeClient {
    fn add_worklog(&self, issue: &str, seconds: i64, comment: Option<&str>) -> AppResult<Worklog> {
        self.calls.borrow_mut().push(Call::Add {
            issue: issue.into(),
            seconds,
            comment: comment.map(String::from),
        });
        self.check()?;
        Ok(Worklog {
            id: "10001".into(),
            issue: issue.into(),
            seconds_spent: seconds,
            comment: comment.map(String::from),
        })
    }

    fn worklog(&self, issue: &str, id: &str) -> AppResult<Worklog> {
        self.calls.borrow_mut().push(Call::Get {
            issue: issue.into(),
            id: id.into(),
        });
        self.check()?;
        Ok(Worklog {
            id: id.into(),
            issue: issue.into(),
            seconds_spent: 60,
            comment: None,
        })
    }

    fn delete_worklog(&self, issue: &str, id: &str) -> AppResult<()> {
        self.calls.borrow_mut().push(Call::Delete {
            issue: issue.into(),
            id: id.into(),
        });
        self.check()
    }
}

fn enabled_config() -> JiraConfig {
    JiraConfig {
        enabled: true,
        project_regex: Some("^PROJ-".into()),
        server: Some("https://jira.example.com".into()),
        user: Some("me".into()),
        token: Some("secret".into()),
        ..JiraConfig::default()
    }
}

fn policy() -> JiraPolicy {
    JiraPolicy::from_config(&enabled_config()).unwrap()
}

fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(2025, 1, 10, h, m, s).unwrap()
}

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

fn frame(project: &str, tag_list: &[&str], note: Option<&str>) -> Frame {
    CurrentFrame::new(project, &tags(tag_list), at(10, 0, 0))
        .finish(at(10, 1, 0), note.map(String::from))
}

// ---------------------------
// Policy
// ---------------------------

#[test]
fn disabled_integration_never_requires_a_worklog() {
    let cfg = JiraConfig {
        enabled: false,
        project_regex: Some(".*".into()),
        ..JiraConfig::default()
    };
    let p = JiraPolicy::from_config(&cfg).unwrap();
    assert!(!p.is_enabled());
    for (project, t) in [
        ("PROJ-1", tags(&["track-time"])),
        ("anything", tags(&[])),
        ("", tags(&["track-time", "review"])),
    ] {
        assert!(!p.requires_worklog(project, &t));
    }
}

#[test]
fn disabled_integration_with_empty_config_is_valid() {
    let p = JiraPolicy::from_config(&JiraConfig::default()).unwrap();
    assert!(!p.requires_worklog("PROJ-1", &tags(&["track-time"])));
    assert!(observers_from_config(&JiraConfig::default()).unwrap().is_empty());
}

#[test]
fn enabled_without_project_regex_is_a_config_error() {
    for regex in [None, Some("".to_string()), Some("   ".to_string())] {
        let cfg = JiraConfig {
            project_regex: regex,
            ..enabled_config()
        };
        let err = JiraPolicy::from_config(&cfg).unwrap_err();
        assert!(
            matches!(err, AppError::Config(ref m) if m.contains("jira.project_regex")),
            "unexpected error: {err}"
        );
    }
}

#[test]
fn invalid_project_regex_is_a_config_error() {
    let cfg = JiraConfig {
        project_regex: Some("PROJ-(".into()),
        ..enabled_config()
    };
    assert!(matches!(JiraPolicy::from_config(&cfg), Err(AppError::Config(_))));
}

#[test]
fn requires_matching_project_and_track_time_tag() {
    let p = policy();

    assert!(p.requires_worklog("PROJ-1", &tags(&["track-time"])));
    assert!(p.requires_worklog("PROJ-42", &tags(&["review", "track-time"])));

    assert!(!p.requires_worklog("PROJ-1", &tags(&[])));
    assert!(!p.requires_worklog("PROJ-1", &tags(&["review"])));
    assert!(!p.requires_worklog("OTHER-1", &tags(&["track-time"])));
}

#[test]
fn project_pattern_is_anchored_at_the_start_only() {
    let cfg = JiraConfig {
        project_regex: Some("PROJ-".into()),
        ..enabled_config()
    };
    let p = JiraPolicy::from_config(&cfg).unwrap();

    assert!(p.matches_project("PROJ-1"));
    assert!(p.matches_project("PROJ-1-backend"));
    assert!(!p.matches_project("MY-PROJ-1"));
}

#[test]
fn custom_track_time_tag() {
    let cfg = JiraConfig {
        track_time_tag: "billable".into(),
        ..enabled_config()
    };
    let p = JiraPolicy::from_config(&cfg).unwrap();

    assert!(p.requires_worklog("PROJ-1", &tags(&["billable"])));
    assert!(!p.requires_worklog("PROJ-1", &tags(&["track-time"])));
}

#[test]
fn review_tag_selects_review_comment() {
    let cfg = JiraConfig {
        review_comment: "Code review".into(),
        ..enabled_config()
    };
    let p = JiraPolicy::from_config(&cfg).unwrap();

    assert_eq!(
        p.comment_for(&tags(&["track-time", "review"]), Some("ignored")),
        Some("Code review".into())
    );
    assert_eq!(p.comment_for(&tags(&["track-time"]), Some("note")), Some("note".into()));
    assert_eq!(p.comment_for(&tags(&["track-time"]), None), None);
}

#[test]
fn jira_section_defaults_from_yaml() {
    let cfg = Config::from_yaml("jira:\n  enabled: true\n").unwrap();
    assert!(cfg.jira.enabled);
    assert_eq!(cfg.jira.track_time_tag, "track-time");
    assert_eq!(cfg.jira.review_tag, "review");
    assert_eq!(cfg.jira.review_comment, "review");
    assert_eq!(cfg.jira.project_regex, None);

    let cfg = Config::from_yaml("").unwrap();
    assert!(!cfg.jira.enabled);
}

#[test]
fn observers_require_credentials_when_enabled() {
    let cfg = JiraConfig {
        token: None,
        ..enabled_config()
    };
    let err = observers_from_config(&cfg).err().unwrap();
    assert!(matches!(err, AppError::Config(ref m) if m.contains("jira.token")));

    assert_eq!(observers_from_config(&enabled_config()).unwrap().len(), 1);
}

// ---------------------------
// Sync
// ---------------------------

#[test]
fn seconds_are_truncated_elapsed_time() {
    assert_eq!(seconds_spent(at(10, 0, 0), at(10, 1, 30)), 90);

    let start = at(10, 0, 0);
    let stop = start + chrono::Duration::milliseconds(59_999);
    assert_eq!(seconds_spent(start, stop), 59);
}

#[test]
fn add_worklog_passes_duration_and_comment() {
    let client = FakeClient::default();
    let sync = JiraSync::new(policy(), client.clone());

    let w = sync
        .add_worklog("PROJ-1", at(10, 0, 0), at(10, 1, 30), Some("pairing"))
        .unwrap();
    assert_eq!(w.id, "10001");
    assert_eq!(
        client.calls(),
        vec![Call::Add {
            issue: "PROJ-1".into(),
            seconds: 90,
            comment: Some("pairing".into()),
        }]
    );
}

#[test]
fn frame_stopped_creates_worklog_only_when_required() {
    let client = FakeClient::default();
    let sync = JiraSync::new(policy(), client.clone());

    assert_eq!(sync.frame_stopped(&frame("OTHER-1", &["track-time"], None)).unwrap(), None);
    assert_eq!(sync.frame_stopped(&frame("PROJ-1", &[], None)).unwrap(), None);
    assert!(client.calls().is_empty());

    let id = sync.frame_stopped(&frame("PROJ-1", &["track-time"], None)).unwrap();
    assert_eq!(id.as_deref(), Some("10001"));
    assert_eq!(
        client.calls(),
        vec![Call::Add {
            issue: "PROJ-1".into(),
            seconds: 60,
            comment: None,
        }]
    );
}

#[test]
fn frame_stopped_uses_review_comment() {
    let client = FakeClient::default();
    let sync = JiraSync::new(policy(), client.clone());

    sync.frame_stopped(&frame("PROJ-1", &["track-time", "review"], Some("my note")))
        .unwrap();
    assert_eq!(
        client.calls(),
        vec![Call::Add {
            issue: "PROJ-1".into(),
            seconds: 60,
            comment: Some("review".into()),
        }]
    );
}

#[test]
fn delete_is_skipped_without_stored_worklog() {
    let client = FakeClient::default();
    let sync = JiraSync::new(policy(), client.clone());

    let mut f = frame("PROJ-1", &["track-time"], None);
    assert!(!sync.delete_worklog(&f).unwrap());
    f.jira_worklog = Some(String::new());
    assert!(!sync.delete_worklog(&f).unwrap());
    assert!(client.calls().is_empty());

    f.jira_worklog = Some("10001".into());
    assert!(sync.delete_worklog(&f).unwrap());
    assert_eq!(
        client.calls(),
        vec![Call::Delete {
            issue: "PROJ-1".into(),
            id: "10001".into(),
        }]
    );
}

#[test]
fn fetch_worklog_of_frame() {
    let client = FakeClient::default();
    let sync = JiraSync::new(policy(), client.clone());

    let mut f = frame("PROJ-1", &["track-time"], None);
    assert_eq!(sync.fetch_worklog(&f).unwrap(), None);

    f.jira_worklog = Some("10001".into());
    let w = sync.fetch_worklog(&f).unwrap().unwrap();
    assert_eq!(w.seconds_spent, 60);
    assert_eq!(
        client.calls(),
        vec![Call::Get {
            issue: "PROJ-1".into(),
            id: "10001".into(),
        }]
    );
}

// ---------------------------
// Tracker + observers
// ---------------------------

fn observers(client: &FakeClient) -> Observers {
    vec![Box::new(JiraSync::new(policy(), client.clone())) as Box<dyn FrameObserver>]
}

#[test]
fn stop_stores_worklog_id_from_observer() {
    let client = FakeClient::default();
    let obs = observers(&client);
    let mut pool = DbPool::open_in_memory().unwrap();

    StartLogic::apply(&mut pool, "PROJ-1", &tags(&["+track-time"]), Some(at(10, 0, 0))).unwrap();
    let f = StopLogic::apply(&mut pool, &obs, Some(at(10, 1, 0)), None).unwrap();

    assert_eq!(f.jira_worklog.as_deref(), Some("10001"));
    assert_eq!(
        client.calls(),
        vec![Call::Add {
            issue: "PROJ-1".into(),
            seconds: 60,
            comment: None,
        }]
    );

    let stored = get_frame(&pool.conn, f.id).unwrap().unwrap();
    assert_eq!(stored.jira_worklog.as_deref(), Some("10001"));
    assert_eq!(stored.tags, vec!["track-time"]);
    assert!(load_current(&pool.conn).unwrap().is_none());
}

#[test]
fn stop_without_required_logging_stores_no_worklog() {
    let client = FakeClient::default();
    let obs = observers(&client);
    let mut pool = DbPool::open_in_memory().unwrap();

    StartLogic::apply(&mut pool, "PROJ-1", &tags(&["+meeting"]), Some(at(10, 0, 0))).unwrap();
    let f = StopLogic::apply(&mut pool, &obs, Some(at(10, 1, 0)), None).unwrap();

    assert_eq!(f.jira_worklog, None);
    assert!(client.calls().is_empty());
    assert_eq!(get_frame(&pool.conn, f.id).unwrap().unwrap().jira_worklog, None);
}

#[test]
fn failing_observer_keeps_session_running() {
    let client = FakeClient::failing();
    let obs = observers(&client);
    let mut pool = DbPool::open_in_memory().unwrap();

    StartLogic::apply(&mut pool, "PROJ-1", &tags(&["track-time"]), Some(at(10, 0, 0))).unwrap();
    let err = StopLogic::apply(&mut pool, &obs, Some(at(10, 1, 0)), None).unwrap_err();

    assert!(matches!(err, AppError::Jira { status: 401, .. }));
    let current = load_current(&pool.conn).unwrap().expect("still running");
    assert_eq!(current.project, "PROJ-1");
    assert_eq!(get_frame(&pool.conn, 1).unwrap(), None);
}

#[test]
fn stop_before_start_is_rejected_without_remote_call() {
    let client = FakeClient::default();
    let obs = observers(&client);
    let mut pool = DbPool::open_in_memory().unwrap();

    StartLogic::apply(&mut pool, "PROJ-1", &tags(&["track-time"]), Some(at(10, 0, 0))).unwrap();
    let err = StopLogic::apply(&mut pool, &obs, Some(at(9, 0, 0)), None).unwrap_err();

    assert!(matches!(err, AppError::InvalidTime(_)));
    assert!(client.calls().is_empty());
}

#[test]
fn remove_deletes_remote_worklog_then_frame() {
    let client = FakeClient::default();
    let obs = observers(&client);
    let mut pool = DbPool::open_in_memory().unwrap();

    StartLogic::apply(&mut pool, "PROJ-1", &tags(&["track-time"]), Some(at(10, 0, 0))).unwrap();
    let f = StopLogic::apply(&mut pool, &obs, Some(at(10, 1, 0)), None).unwrap();

    RemoveLogic::apply(&mut pool, &obs, f.id).unwrap();

    assert_eq!(
        client.calls().last(),
        Some(&Call::Delete {
            issue: "PROJ-1".into(),
            id: "10001".into(),
        })
    );
    assert_eq!(get_frame(&pool.conn, f.id).unwrap(), None);
}

#[test]
fn remove_without_worklog_makes_no_remote_call() {
    let client = FakeClient::default();
    let obs = observers(&client);
    let mut pool = DbPool::open_in_memory().unwrap();

    StartLogic::apply(&mut pool, "OTHER-1", &tags(&["track-time"]), Some(at(10, 0, 0))).unwrap();
    let f = StopLogic::apply(&mut pool, &obs, Some(at(10, 1, 0)), None).unwrap();
    RemoveLogic::apply(&mut pool, &obs, f.id).unwrap();

    assert!(client.calls().is_empty());
    assert!(matches!(
        RemoveLogic::apply(&mut pool, &obs, f.id),
        Err(AppError::FrameNotFound(_))
    ));
}

fn fail_on(pool: &DbPool, event: &str) {
    pool.conn
        .execute_batch(&format!(
            "CREATE TRIGGER frames_{0} BEFORE {0} ON frames
             BEGIN SELECT RAISE(ABORT, 'disk full'); END;",
            event
        ))
        .unwrap();
}

#[test]
fn failed_insert_removes_the_created_worklog() {
    let client = FakeClient::default();
    let obs = observers(&client);
    let mut pool = DbPool::open_in_memory().unwrap();

    StartLogic::apply(&mut pool, "PROJ-1", &tags(&["track-time"]), Some(at(10, 0, 0))).unwrap();
    fail_on(&pool, "INSERT");

    for _ in 0..2 {
        let err = StopLogic::apply(&mut pool, &obs, Some(at(10, 1, 0)), None).unwrap_err();
        assert!(matches!(err, AppError::Db(_)), "unexpected error: {err}");
    }

    let add = Call::Add {
        issue: "PROJ-1".into(),
        seconds: 60,
        comment: None,
    };
    let delete = Call::Delete {
        issue: "PROJ-1".into(),
        id: "10001".into(),
    };
    assert_eq!(
        client.calls(),
        vec![add.clone(), delete.clone(), add, delete]
    );
    assert!(load_current(&pool.conn).unwrap().is_some());
    assert_eq!(get_frame(&pool.conn, 1).unwrap(), None);
}

#[test]
fn failed_local_delete_keeps_remote_worklog() {
    let client = FakeClient::default();
    let obs = observers(&client);
    let mut pool = DbPool::open_in_memory().unwrap();

    StartLogic::apply(&mut pool, "PROJ-1", &tags(&["track-time"]), Some(at(10, 0, 0))).unwrap();
    let f = StopLogic::apply(&mut pool, &obs, Some(at(10, 1, 0)), None).unwrap();
    fail_on(&pool, "DELETE");

    let err = RemoveLogic::apply(&mut pool, &obs, f.id).unwrap_err();
    assert!(matches!(err, AppError::Db(_)), "unexpected error: {err}");

    assert!(!client.calls().iter().any(|c| matches!(c, Call::Delete { .. })));
    let stored = get_frame(&pool.conn, f.id).unwrap().unwrap();
    assert_eq!(stored.jira_worklog.as_deref(), Some("10001"));
}

#[test]
fn failing_remote_delete_keeps_frame() {
    let client = FakeClient::default();
    let mut pool = DbPool::open_in_memory().unwrap();

    StartLogic::apply(&mut pool, "PROJ-1", &tags(&["track-time"]), Some(at(10, 0, 0))).unwrap();
    let f = StopLogic::apply(&mut pool, &observers(&client), Some(at(10, 1, 0)), None).unwrap();

    let failing = FakeClient::failing();
    let err = RemoveLogic::apply(&mut pool, &observers(&failing), f.id).unwrap_err();
    assert!(matches!(err, AppError::Jira { status: 401, .. }));

    let stored = get_frame(&pool.conn, f.id).unwrap().unwrap();
    assert_eq!(stored.jira_worklog.as_deref(), Some("10001"));
}

use chrono::{DateTime, Duration, Local};
use serde::Serialize;

/// The session currently being tracked (at most one at a time).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentFrame {
    pub project: String,
    pub tags: Vec<String>,
    pub start: DateTime<Local>,
}

impl CurrentFrame {
    pub fn new(project: &str, tags: &[String], start: DateTime<Local>) -> Self {
        Self {
            project: project.trim().to_string(),
            tags: normalize_tags(tags),
            start,
        }
    }

    pub fn elapsed(&self, now: DateTime<Local>) -> Duration {
        now - self.start
    }

    /// Close the session at `stop`. The resulting frame is not yet persisted (`id == 0`).
    pub fn finish(&self, stop: DateTime<Local>, note: Option<String>) -> Frame {
        Frame {
            id: 0,
            project: self.project.clone(),
            tags: self.tags.clone(),
            start: self.start,
            stop,
            note: note.filter(|n| !n.trim().is_empty()),
            jira_worklog: None,
            updated_at: Local::now().to_rfc3339(),
        }
    }
}

/// A finished, recorded session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub id: i64,                      // ⇔ frames.id
    pub project: String,              // ⇔ frames.project
    pub tags: Vec<String>,            // ⇔ frames.tags (JSON array)
    pub start: DateTime<Local>,       // ⇔ frames.start (RFC 3339)
    pub stop: DateTime<Local>,        // ⇔ frames.stop  (RFC 3339)
    pub note: Option<String>,         // ⇔ frames.note
    pub jira_worklog: Option<String>, // ⇔ frames.jira_worklog
    pub updated_at: String,           // ⇔ frames.updated_at
}

impl Frame {
    pub fn duration(&self) -> Duration {
        self.stop - self.start
    }

    /// The stored worklog id, ignoring blank values.
    pub fn worklog_id(&self) -> Option<&str> {
        self.jira_worklog
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    pub fn tags_label(&self) -> String {
        format_tags(&self.tags)
    }
}

/// Strip the `+` prefix used on the command line, drop blanks and duplicates,
/// keep first-seen order.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for raw in tags {
        let tag = raw.trim().trim_start_matches('+').trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

/// Exact, case-sensitive tag lookup.
pub fn has_tag(tags: &[String], tag: &str) -> bool {
    tags.iter().any(|t| t == tag)
}

pub fn format_tags(tags: &[String]) -> String {
    if tags.is_empty() {
        String::new()
    } else {
        format!("[{}]", tags.join(", "))
    }
}

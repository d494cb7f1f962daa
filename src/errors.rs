//! Unified application error type.
//! All modules (db, core, jira, cli) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Serialization
    // ---------------------------
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Jira
    // ---------------------------
    #[error("Jira request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Jira API error ({status}): {message}")]
    Jira { status: u16, message: String },

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    #[error("Invalid project name: {0:?}")]
    InvalidProject(String),

    // ---------------------------
    // Tracking errors
    // ---------------------------
    #[error("No project started")]
    NoActiveFrame,

    #[error("Project {0} is already started")]
    FrameAlreadyStarted(String),

    #[error("No frame found with id {0}")]
    FrameNotFound(i64),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to save configuration")]
    ConfigSave,
}

pub type AppResult<T> = Result<T, AppError>;

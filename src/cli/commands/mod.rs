pub mod cancel;
pub mod config;
pub mod init;
pub mod jira;
pub mod list;
pub mod log;
pub mod remove;
pub mod start;
pub mod status;
pub mod stop;

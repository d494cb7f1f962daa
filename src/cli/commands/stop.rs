use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::stop::StopLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::jira::observers_from_config;
use crate::ui::messages::success;
use crate::utils::secs2readable;
use crate::utils::time::parse_optional_at;

/// Stop the running project, notify Jira if required, record the frame.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stop { at, note } = cmd {
        let stop_at = parse_optional_at(at.as_ref())?;

        // Jira options are validated before anything is touched.
        let observers = observers_from_config(&cfg.jira)?;

        let mut pool = DbPool::new(&cfg.database)?;
        let frame = StopLogic::apply(&mut pool, &observers, stop_at, note.clone())?;

        success(format!(
            "Stopping project {} {}, started at {} ({}). Frame #{} recorded.",
            frame.project,
            frame.tags_label(),
            frame.start.format("%Y-%m-%d %H:%M"),
            secs2readable(frame.duration().num_seconds()),
            frame.id
        ));

        if let Some(worklog) = frame.worklog_id() {
            success(format!("Jira worklog {} added to {}", worklog, frame.project));
        }
    }

    Ok(())
}

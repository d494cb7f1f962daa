use crate::cli::parser::{Commands, JiraAction};
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries::get_frame;
use crate::errors::{AppError, AppResult};
use crate::jira::sync_from_config;
use crate::ui::messages::{info, success};
use crate::utils::secs2readable;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Jira { action } = cmd else {
        return Ok(());
    };

    let sync = sync_from_config(&cfg.jira)?;

    match action {
        JiraAction::Check => match sync {
            None => info("Jira integration is disabled."),
            Some(sync) => success(format!(
                "Jira integration enabled: {} (projects matching {:?}, tag '{}')",
                sync.client().server(),
                sync.policy().pattern().unwrap_or_default(),
                sync.policy().track_time_tag()
            )),
        },
        JiraAction::Show { id } => {
            let sync = sync.ok_or_else(|| {
                AppError::Config("Jira integration is disabled (jira.enabled = false)".into())
            })?;

            let pool = DbPool::new(&cfg.database)?;
            let frame = get_frame(&pool.conn, *id)?.ok_or(AppError::FrameNotFound(*id))?;

            match sync.fetch_worklog(&frame)? {
                None => info(format!("Frame #{} has no Jira worklog.", frame.id)),
                Some(w) => {
                    println!("Issue   : {}", w.issue);
                    println!("Worklog : {}", w.id);
                    println!("Spent   : {}", secs2readable(w.seconds_spent));
                    println!("Comment : {}", w.comment.as_deref().unwrap_or("-"));
                }
            }
        }
    }

    Ok(())
}

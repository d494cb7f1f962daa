use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::remove::RemoveLogic;
use crate::db::pool::DbPool;
use crate::db::queries::get_frame;
use crate::errors::{AppError, AppResult};
use crate::jira::observers_from_config;
use crate::ui::messages::{info, success, warning};

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Remove { id, force } = cmd {
        let observers = observers_from_config(&cfg.jira)?;
        let mut pool = DbPool::new(&cfg.database)?;

        let frame = get_frame(&pool.conn, *id)?.ok_or(AppError::FrameNotFound(*id))?;

        if !*force {
            let mut prompt = format!(
                "Remove frame #{} ({} {}, {} → {})?",
                frame.id,
                frame.project,
                frame.tags_label(),
                frame.start.format("%Y-%m-%d %H:%M"),
                frame.stop.format("%H:%M")
            );
            if frame.worklog_id().is_some() && !observers.is_empty() {
                prompt.push_str(" Its Jira worklog will be deleted too.");
            }
            if !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }
        }

        let removed = RemoveLogic::apply(&mut pool, &observers, *id)?;
        success(format!("Frame #{} ({}) removed.", removed.id, removed.project));
    }

    Ok(())
}

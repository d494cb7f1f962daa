use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::start::StartLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::frame::format_tags;
use crate::ui::messages::success;
use crate::utils::time::parse_optional_at;

/// Start tracking a project.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Start { project, tags, at } = cmd {
        let start_at = parse_optional_at(at.as_ref())?;

        let mut pool = DbPool::new(&cfg.database)?;
        let current = StartLogic::apply(&mut pool, project, tags, start_at)?;

        success(format!(
            "Starting project {} {} at {}",
            current.project,
            format_tags(&current.tags),
            current.start.format("%H:%M")
        ));
    }

    Ok(())
}

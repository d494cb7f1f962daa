use crate::config::Config;
use crate::core::cancel::CancelLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::new(&cfg.database)?;
    let current = CancelLogic::apply(&mut pool)?;

    success(format!(
        "Cancelled project {} started at {}",
        current.project,
        current.start.format("%Y-%m-%d %H:%M")
    ));
    Ok(())
}

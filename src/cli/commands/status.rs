use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries::load_current;
use crate::errors::AppResult;
use crate::models::frame::format_tags;
use crate::ui::messages::info;
use crate::utils::formatting::{bold, humanize_ago};
use chrono::Local;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;

    match load_current(&pool.conn)? {
        Some(current) => {
            let elapsed = current.elapsed(Local::now()).num_seconds();
            println!(
                "Project {} {} started {} ({})",
                bold(&current.project),
                format_tags(&current.tags),
                humanize_ago(elapsed),
                current.start.format("%Y-%m-%d %H:%M:%S")
            );
        }
        None => info("No project started."),
    }

    Ok(())
}

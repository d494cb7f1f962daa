use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries::{FrameFilter, list_frames};
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::date::parse_period;
use crate::utils::secs2readable;
use crate::utils::table::Table;

/// List recorded frames, optionally filtered by period and project.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { period, project } = cmd {
        let mut filter = FrameFilter {
            project: project.clone(),
            ..FrameFilter::default()
        };
        if let Some(p) = period {
            let (from, to) = parse_period(p)?;
            filter.from = Some(from);
            filter.to = Some(to);
        }

        let pool = DbPool::new(&cfg.database)?;
        let frames = list_frames(&pool.conn, &filter)?;

        if frames.is_empty() {
            info("No frames found.");
            return Ok(());
        }

        let title = match period {
            Some(p) => format!("Frames for {}", p),
            None => "All frames".to_string(),
        };
        header(title);

        let mut table = Table::new(["ID", "DATE", "START", "STOP", "DURATION", "PROJECT", "TAGS", "JIRA"]);
        let mut total = 0;

        for f in &frames {
            let secs = f.duration().num_seconds();
            total += secs;
            table.add_row(vec![
                f.id.to_string(),
                f.start.format("%Y-%m-%d").to_string(),
                f.start.format("%H:%M:%S").to_string(),
                f.stop.format("%H:%M:%S").to_string(),
                secs2readable(secs),
                f.project.clone(),
                f.tags.join(", "),
                f.worklog_id().unwrap_or("-").to_string(),
            ]);
        }

        print!("{}", table.render());
        println!("\nTotal: {} in {} frame(s)", secs2readable(total), frames.len());
    }

    Ok(())
}

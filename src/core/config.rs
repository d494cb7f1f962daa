use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    /// Print the effective configuration with the Jira token masked.
    pub fn print(cfg: &Config) -> AppResult<()> {
        let mut shown = cfg.clone();
        if shown.jira.token.is_some() {
            shown.jira.token = Some("********".to_string());
        }
        println!("📄 Current configuration:\n");
        println!("{}", serde_yaml::to_string(&shown)?);
        Ok(())
    }

    fn default_editor() -> String {
        std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            })
    }

    fn run_editor(editor: &str, path: &Path) -> bool {
        matches!(Command::new(editor).arg(path).status(), Ok(s) if s.success())
    }

    /// Open `path` in the requested editor, falling back to $EDITOR/$VISUAL/nano.
    pub fn edit(path: &Path, editor: Option<&str>) -> AppResult<()> {
        let fallback = Self::default_editor();
        let requested = editor.map(str::to_string).unwrap_or_else(|| fallback.clone());

        if Self::run_editor(&requested, path) {
            success(format!("Configuration file edited using '{}'", requested));
            return Ok(());
        }

        if requested != fallback {
            warning(format!(
                "Editor '{}' not available, falling back to '{}'",
                requested, fallback
            ));
            if Self::run_editor(&fallback, path) {
                success(format!("Configuration file edited using '{}'", fallback));
                return Ok(());
            }
        }

        Err(AppError::Config(format!(
            "failed to edit {} with '{}'",
            path.display(),
            requested
        )))
    }
}

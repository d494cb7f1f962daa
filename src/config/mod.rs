use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod jira;

pub use jira::JiraConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default)]
    pub jira: JiraConfig,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            jira: JiraConfig::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rwatson")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rwatson")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rwatson.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rwatson.sqlite")
    }

    /// The file in use: `--config` when given, the default location otherwise.
    pub fn resolve_path(custom: Option<&str>) -> PathBuf {
        custom
            .map(crate::utils::path::expand_tilde)
            .unwrap_or_else(Self::config_file)
    }

    /// Load configuration from the default file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file. The file must exist.
    pub fn load_from(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
            .map_err(|e| AppError::Config(format!("cannot parse {}: {}", path.display(), e)))
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        // An empty file is a valid (all-defaults) configuration.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Initialize configuration and database files.
    ///
    /// `config_path` overrides the default config file location,
    /// `custom_db` overrides the database path (relative names land in the config dir).
    pub fn init_all(
        config_path: Option<&Path>,
        custom_db: Option<&str>,
    ) -> AppResult<Self> {
        let conf_file = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_file);
        let dir = conf_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_dir);
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => {
                let p = crate::utils::path::expand_tilde(name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => dir.join("rwatson.sqlite"),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            jira: JiraConfig::default(),
        };

        // An existing configuration file is left untouched.
        if !conf_file.exists() {
            let yaml = serde_yaml::to_string(&config).map_err(|_| AppError::ConfigSave)?;
            let mut file = fs::File::create(&conf_file)?;
            file.write_all(yaml.as_bytes())?;
            success(format!("Config file: {}", conf_file.display()));
        }

        Ok(config)
    }
}

//! Application configuration
//!
//! Loaded from `tabula.toml` in the platform config directory, or from an
//! explicit path given on the command line.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_EMPTY_MESSAGE, DEFAULT_PAGE_SIZE, DEFAULT_SKELETON_ROWS,
    PAGE_SIZE_OPTIONS,
};
use crate::error::{Error, Result};
use crate::helpers::get_or_create_config_dir;

fn get_config_path() -> Result<PathBuf> {
    let config_dir = get_or_create_config_dir()?;
    let path = config_dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        std::fs::write(&path, "")?;
    }
    Ok(path)
}

/// Table presentation defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub page_size: usize,
    pub skeleton_rows: usize,
    pub page_size_options: Vec<usize>,
    pub empty_message: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            skeleton_rows: DEFAULT_SKELETON_ROWS,
            page_size_options: PAGE_SIZE_OPTIONS.to_vec(),
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive; `RUST_LOG` takes precedence
    pub level: String,
    /// Directory for daily rolling log files
    pub directory: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

/// Persisted application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub table: TableConfig,
    pub log: LogConfig,
}

impl AppConfig {
    /// Load from `path`, or from the default location when `None`.
    ///
    /// An empty file yields the defaults.
    pub fn try_load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => get_config_path()?,
        };
        info!(path = ?path, "Loading config file");
        let value = std::fs::read_to_string(&path)?;

        Self::parse(&value).map_err(|e| {
            error!(error = %e, path = ?path, "Failed to parse config file");
            e
        })
    }

    /// Parse TOML text and validate it
    pub fn parse(value: &str) -> Result<Self> {
        if value.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut config: Self = toml::from_str(value)?;
        config.validate()?;
        config.table.page_size_options.sort_unstable();
        config.table.page_size_options.dedup();
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.table.page_size == 0 {
            return Err(Error::Invalid {
                message: "table.page_size must be positive".to_string(),
            });
        }
        if self.table.page_size_options.contains(&0) {
            return Err(Error::Invalid {
                message: "table.page_size_options must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Save to `path`, or to the default location when `None`
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => get_config_path()?,
        };
        let value = toml::to_string(self)?;
        std::fs::write(path, value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::parse("  \n").expect("empty config");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.table.page_size, 10);
        assert_eq!(config.table.page_size_options, vec![5, 10, 20, 30, 40, 50]);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = AppConfig::parse(
            r#"
            [table]
            page_size = 20
            page_size_options = [50, 20, 20, 5]

            [log]
            directory = "/tmp/tabula-logs"
            "#,
        )
        .expect("valid config");

        assert_eq!(config.table.page_size, 20);
        assert_eq!(config.table.skeleton_rows, 5);
        assert_eq!(config.table.page_size_options, vec![5, 20, 50]);
        assert_eq!(config.table.empty_message, "No results.");
        assert_eq!(config.log.directory, Some(PathBuf::from("/tmp/tabula-logs")));
    }

    #[test]
    fn rejects_zero_page_size() {
        let err = AppConfig::parse("[table]\npage_size = 0\n");
        assert!(matches!(err, Err(Error::Invalid { .. })));
        assert!(matches!(AppConfig::parse("table = 3"), Err(Error::TomlDe { .. })));
    }

    #[test]
    fn save_then_load_from_explicit_path() {
        let path = std::env::temp_dir().join(format!("tabula-config-{}.toml", std::process::id()));
        let mut config = AppConfig::default();
        config.table.empty_message = "Nobody here".to_string();

        config.save(Some(&path)).expect("save config");
        let loaded = AppConfig::try_load(Some(&path)).expect("load config");
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }
}

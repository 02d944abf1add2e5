//! Configuration loading and merging logic.
//!
//! Config files are merged as TOML tables before deserialization, so a file
//! that sets only `[restore] timeout_ms` keeps every other value from the
//! layer below it.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::types::WmSessionConfig;
use crate::config::validation::validate_config;
use crate::errors::ConfigError;

/// Path of the per-user config file, if a config directory is known.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("wmsession").join("config.toml"))
}

/// Load configuration from the hierarchy of config files.
///
/// Loads and merges configuration from:
/// 1. Default values
/// 2. User config (`$XDG_CONFIG_HOME/wmsession/config.toml`)
/// 3. The explicit config file, if one was given
///
/// # Errors
///
/// A missing user config is not an error. A missing explicit config, any
/// parse error, or a failed validation is.
pub fn load_hierarchy(explicit: Option<&Path>) -> Result<WmSessionConfig, ConfigError> {
    let mut merged = toml::Table::new();

    if let Some(path) = user_config_path() {
        match load_config_table(&path) {
            Ok(table) => merge_tables(&mut merged, table),
            Err(ConfigError::ConfigNotFound { .. }) => {
                debug!(
                    event = "core.config.user_config_missing",
                    path = %path.display()
                );
            }
            Err(e) => return Err(e),
        }
    }

    if let Some(path) = explicit {
        let table = load_config_table(path)?;
        merge_tables(&mut merged, table);
    }

    let config = table_into_config(merged, explicit.unwrap_or(Path::new("<merged>")))?;
    validate_config(&config)?;

    Ok(config)
}

fn load_config_table(path: &Path) -> Result<toml::Table, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        Err(e) => return Err(ConfigError::IoError { source: e }),
    };

    toml::from_str::<toml::Table>(&content).map_err(|e| ConfigError::ConfigParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

fn table_into_config(table: toml::Table, origin: &Path) -> Result<WmSessionConfig, ConfigError> {
    toml::Value::Table(table)
        .try_into::<WmSessionConfig>()
        .map_err(|e| ConfigError::ConfigParseError {
            path: origin.display().to_string(),
            message: e.to_string(),
        })
}

/// Merge `overlay` into `base`; nested tables merge key by key, every other
/// value in `overlay` replaces the one in `base`.
pub fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(base_table)), toml::Value::Table(overlay_table)) => {
                merge_tables(base_table, overlay_table);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

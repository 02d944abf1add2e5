//! Configuration type definitions for wmsession.
//!
//! These types are deserialized from TOML config files. Every section and
//! field is optional in the file; missing values fall back to the defaults
//! in [`super::defaults`].
//!
//! # Example Configuration
//!
//! ```toml
//! [resolve]
//! allow_raw_cmdline = true
//! min_entry_similarity = 0.8
//! extra_desktop_dirs = ["~/apps/desktop"]
//!
//! [restore]
//! poll_interval_ms = 250
//! timeout_ms = 15000
//!
//! [dbus]
//! system = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration loaded from TOML config files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WmSessionConfig {
    /// How captured windows are turned into commands
    #[serde(default)]
    pub resolve: ResolveConfig,

    /// Window matching behaviour during restore
    #[serde(default)]
    pub restore: RestoreConfig,

    /// Which bus the window manager extension lives on
    #[serde(default)]
    pub dbus: DbusConfig,
}

/// Command resolution settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolveConfig {
    /// Fall back to the live `/proc` command line when no desktop entry
    /// matches. Disabling this drops such windows from the session.
    #[serde(default = "super::defaults::default_allow_raw_cmdline")]
    pub allow_raw_cmdline: bool,

    /// Minimum similarity (0, 1] a fuzzy desktop entry match must reach.
    #[serde(default = "super::defaults::default_min_entry_similarity")]
    pub min_entry_similarity: f64,

    /// Additional directories searched for `*.desktop` files, before the
    /// XDG data directories.
    #[serde(default)]
    pub extra_desktop_dirs: Vec<PathBuf>,
}

/// Restore-time matching settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestoreConfig {
    /// Interval between window-list polls.
    #[serde(default = "super::defaults::default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Total time to wait for launched applications to show their windows.
    #[serde(default = "super::defaults::default_timeout_ms")]
    pub timeout_ms: u64,
}

/// D-Bus connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DbusConfig {
    /// Explicit bus address; takes precedence over `system`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Connect to the system bus instead of the session bus.
    #[serde(default)]
    pub system: bool,
}

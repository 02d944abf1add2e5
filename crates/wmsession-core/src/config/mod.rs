//! # Configuration System
//!
//! Hierarchical TOML configuration for wmsession.
//!
//! ## Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `$XDG_CONFIG_HOME/wmsession/config.toml`
//! 3. **Explicit config** - the file passed with `--config`
//! 4. **CLI arguments** - Command-line flags (highest priority)
//!
//! ## Usage Example
//!
//! ```toml
//! # ~/.config/wmsession/config.toml
//! [resolve]
//! allow_raw_cmdline = false
//! min_entry_similarity = 0.85
//!
//! [restore]
//! timeout_ms = 30000
//! ```
//!
//! ## Loading Configuration
//!
//! ```rust,no_run
//! use wmsession_core::config::WmSessionConfig;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = WmSessionConfig::load_hierarchy(None)?;
//!     println!("{}", config.restore.timeout_ms);
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

use std::path::Path;

pub use types::{DbusConfig, ResolveConfig, RestoreConfig, WmSessionConfig};
pub use validation::validate_config;

impl WmSessionConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy(
        explicit: Option<&Path>,
    ) -> Result<Self, crate::errors::ConfigError> {
        loading::load_hierarchy(explicit)
    }

    /// Validate the configuration.
    ///
    /// See [`validation::validate_config`] for details.
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        validation::validate_config(self)
    }
}

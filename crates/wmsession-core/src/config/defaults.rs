//! Default implementations for configuration types.
//!
//! This module contains all `Default` implementations and helper functions
//! for providing default values in serde deserialization.

use crate::config::types::{ResolveConfig, RestoreConfig};

/// Used by serde `#[serde(default = "...")]` attribute.
pub fn default_allow_raw_cmdline() -> bool {
    true
}

/// Returns the default fuzzy desktop entry threshold (0.8).
///
/// Lower values let window classes such as `jetbrains-clion` find entries
/// like `com.jetbrains.CLion`, but also start matching unrelated apps that
/// share a vendor prefix.
///
/// Used by serde `#[serde(default = "...")]` attribute.
pub fn default_min_entry_similarity() -> f64 {
    0.8
}

/// Returns the default poll interval in milliseconds (250ms).
///
/// Used by serde `#[serde(default = "...")]` attribute.
pub fn default_poll_interval_ms() -> u64 {
    250
}

/// Returns the default matching timeout in milliseconds (15s).
///
/// Heavy applications (browsers, IDEs) regularly need several seconds before
/// their first window is mapped.
///
/// Used by serde `#[serde(default = "...")]` attribute.
pub fn default_timeout_ms() -> u64 {
    15_000
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            allow_raw_cmdline: default_allow_raw_cmdline(),
            min_entry_similarity: default_min_entry_similarity(),
            extra_desktop_dirs: Vec::new(),
        }
    }
}

impl Default for RestoreConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

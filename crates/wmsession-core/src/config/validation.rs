//! Configuration validation logic.

use crate::config::types::WmSessionConfig;
use crate::errors::ConfigError;

/// Validate a WmSessionConfig, returning an error if any values are invalid.
///
/// # Validation Rules
///
/// - `resolve.min_entry_similarity` must lie in (0, 1]
/// - `restore.poll_interval_ms` must be greater than 0
/// - `restore.timeout_ms` must not be shorter than one poll interval
pub fn validate_config(config: &WmSessionConfig) -> Result<(), ConfigError> {
    let similarity = config.resolve.min_entry_similarity;
    if !(similarity > 0.0 && similarity <= 1.0) {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "resolve.min_entry_similarity must be in (0, 1], got {}",
                similarity
            ),
        });
    }

    if config.restore.poll_interval_ms == 0 {
        return Err(ConfigError::InvalidConfiguration {
            message: "restore.poll_interval_ms must be greater than 0".to_string(),
        });
    }

    if config.restore.timeout_ms < config.restore.poll_interval_ms {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "restore.timeout_ms ({}) must be at least restore.poll_interval_ms ({})",
                config.restore.timeout_ms, config.restore.poll_interval_ms
            ),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&WmSessionConfig::default()).is_ok());
    }

    #[test]
    fn test_similarity_out_of_range() {
        let mut config = WmSessionConfig::default();
        config.resolve.min_entry_similarity = 0.0;
        assert!(validate_config(&config).is_err());

        config.resolve.min_entry_similarity = 1.5;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("min_entry_similarity"));
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let mut config = WmSessionConfig::default();
        config.restore.poll_interval_ms = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_timeout_shorter_than_interval_rejected() {
        let mut config = WmSessionConfig::default();
        config.restore.poll_interval_ms = 500;
        config.restore.timeout_ms = 100;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("timeout_ms"));
    }
}

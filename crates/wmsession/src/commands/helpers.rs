use std::path::PathBuf;

use clap::ArgMatches;
use tracing::warn;

use wmsession_core::{DocumentPath, WmSessionConfig};

/// Load configuration with warning on errors.
///
/// Falls back to defaults if config loading fails, but notifies the user via:
/// - stderr message for immediate visibility
/// - structured log event `cli.config.load_failed` for debugging
pub fn load_config_with_warning(matches: &ArgMatches) -> WmSessionConfig {
    let explicit = matches.get_one::<PathBuf>("config");

    match WmSessionConfig::load_hierarchy(explicit.map(PathBuf::as_path)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Could not load config: {}. Using defaults.\n\
                 Tip: Check ~/.config/wmsession/config.toml{} for syntax errors.",
                e,
                explicit
                    .map(|path| format!(" and {}", path.display()))
                    .unwrap_or_default()
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                "Config load failed, using defaults"
            );
            WmSessionConfig::default()
        }
    }
}

/// Apply `--system` / `--dbus-address` on top of the `[dbus]` config section.
pub fn apply_bus_overrides(config: &mut WmSessionConfig, matches: &ArgMatches) {
    if let Some(address) = matches.get_one::<String>("dbus-address") {
        config.dbus.address = Some(address.clone());
        config.dbus.system = false;
    } else if matches.get_flag("system") {
        config.dbus.address = None;
        config.dbus.system = true;
    }
}

pub fn document_path(matches: &ArgMatches) -> Result<DocumentPath, Box<dyn std::error::Error>> {
    let raw = matches
        .get_one::<String>("file")
        .ok_or("--file argument is required")?;
    Ok(DocumentPath::parse(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::build_cli;

    fn restore_matches(args: &[&str]) -> ArgMatches {
        let mut argv = vec!["wmsession"];
        argv.extend_from_slice(args);
        build_cli()
            .try_get_matches_from(argv)
            .unwrap()
            .subcommand_matches("restore")
            .unwrap()
            .clone()
    }

    #[test]
    fn test_bus_overrides() {
        let mut config = WmSessionConfig::default();
        config.dbus.address = Some("unix:path=/tmp/old".to_string());

        apply_bus_overrides(&mut config, &restore_matches(&["restore", "-f", "-", "--system"]));
        assert!(config.dbus.system);
        assert_eq!(config.dbus.address, None);

        apply_bus_overrides(
            &mut config,
            &restore_matches(&["restore", "-f", "-", "--dbus-address", "tcp:host=localhost,port=4000"]),
        );
        assert!(!config.dbus.system);
        assert_eq!(
            config.dbus.address.as_deref(),
            Some("tcp:host=localhost,port=4000")
        );
    }

    #[test]
    fn test_bus_config_kept_without_flags() {
        let mut config = WmSessionConfig::default();
        config.dbus.system = true;

        apply_bus_overrides(&mut config, &restore_matches(&["restore", "-f", "-"]));
        assert!(config.dbus.system);
    }

    #[test]
    fn test_document_path_from_flag() {
        let matches = restore_matches(&["restore", "-f", "-"]);
        assert_eq!(document_path(&matches).unwrap(), DocumentPath::Stdio);
    }
}

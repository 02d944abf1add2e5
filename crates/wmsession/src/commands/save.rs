use clap::ArgMatches;
use tracing::{error, info};

use wmsession_core::{DocumentPath, events, session_ops};

use super::helpers::{apply_bus_overrides, document_path, load_config_with_warning};

pub(crate) fn handle_save_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let target = document_path(matches)?;
    let mut config = load_config_with_warning(matches);
    apply_bus_overrides(&mut config, matches);

    info!(event = "cli.save_started", target = %target);

    match session_ops::save_session(&target, &config) {
        Ok(document) => {
            // stdout carries the document itself when saving to '-'
            if target != DocumentPath::Stdio {
                println!("Saved {} windows to {}", document.len(), target);
            }
            info!(
                event = "cli.save_completed",
                target = %target,
                entries = document.len()
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Failed to save session: {}", e);
            error!(event = "cli.save_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

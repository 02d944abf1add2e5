use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use clap::ArgMatches;
use signal_hook::consts::{SIGINT, SIGTERM};
use tracing::{error, info, warn};

use wmsession_core::sessions::SessionError;
use wmsession_core::sessions::types::Disposal;
use wmsession_core::{RestoreOutcome, RestoreReport, events, session_ops};

use super::helpers::{apply_bus_overrides, document_path, load_config_with_warning};

pub(crate) fn handle_restore_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = document_path(matches)?;
    let json_output = matches.get_flag("json");
    let disposal = Disposal {
        mark: matches.get_flag("mark"),
        remove: matches.get_flag("rm"),
    };

    let mut config = load_config_with_warning(matches);
    apply_bus_overrides(&mut config, matches);
    if let Some(timeout_ms) = matches.get_one::<u64>("timeout") {
        config.restore.timeout_ms = *timeout_ms;
    }
    if let Err(e) = config.validate() {
        eprintln!("❌ Invalid restore options: {}", e);
        error!(event = "cli.restore_invalid_options", error = %e);
        return Err(e.into());
    }

    info!(
        event = "cli.restore_started",
        source = %source,
        timeout_ms = config.restore.timeout_ms,
        json_output = json_output
    );

    let document = session_ops::load_document(&source).map_err(restore_failed)?;

    // Registered only now so that reading stdin stays interruptible.
    let cancel = Arc::new(AtomicBool::new(false));
    for signal in [SIGINT, SIGTERM] {
        signal_hook::flag::register(signal, Arc::clone(&cancel))?;
    }

    let report =
        session_ops::restore_document(&document, &config, &cancel).map_err(restore_failed)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    // The session was restored; a failed cleanup only warrants a warning.
    match session_ops::dispose_document(&source, disposal) {
        Ok(Some(path)) if disposal.mark => {
            if !json_output {
                println!("Session file moved to {}", path.display());
            }
        }
        Ok(_) => {}
        Err(e) => {
            eprintln!("Warning: {}", e);
            warn!(event = "cli.restore_dispose_failed", error = %e);
        }
    }

    info!(
        event = "cli.restore_completed",
        matched = report.matched(),
        timed_out = report.timed_out(),
        launch_failed = report.launch_failed()
    );
    Ok(())
}

fn restore_failed(e: SessionError) -> Box<dyn std::error::Error> {
    eprintln!("❌ Failed to restore session: {}", e);
    error!(event = "cli.restore_failed", error = %e);
    events::log_app_error(&e);
    e.into()
}

fn print_report(report: &RestoreReport) {
    for entry in &report.entries {
        let marker = match entry.outcome {
            RestoreOutcome::Matched => "✅",
            RestoreOutcome::Launched => "…",
            RestoreOutcome::MatchTimedOut | RestoreOutcome::LaunchFailed => "❌",
        };
        let class = if entry.window_class.is_empty() {
            "<no class>"
        } else {
            entry.window_class.as_str()
        };
        match &entry.error {
            Some(error) => println!(
                "{} {} ({}): {} - {}",
                marker, class, entry.program, entry.outcome, error
            ),
            None => println!(
                "{} {} ({}): {}",
                marker, class, entry.program, entry.outcome
            ),
        }
    }

    println!(
        "{} matched, {} timed out, {} launch failed",
        report.matched(),
        report.timed_out(),
        report.launch_failed()
    );
    if report.launched() > 0 {
        println!(
            "{} launched but not matched (restore interrupted)",
            report.launched()
        );
    }
}

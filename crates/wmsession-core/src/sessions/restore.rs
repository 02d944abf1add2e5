use std::sync::atomic::AtomicBool;

use tracing::{info, warn};

use crate::matcher::{MatchOptions, MatchState, PendingRecord, WindowMatcher, run_matcher};
use crate::process::{Launcher, ProcessInspector};
use crate::sessions::errors::SessionError;
use crate::sessions::types::{RestoreEntryReport, RestoreOutcome, RestoreReport, SessionDocument};
use crate::shell::WindowManager;

/// Relaunch every entry of `document` and put the new windows back in place.
///
/// The extension is checked and the already-open windows are recorded before
/// anything is launched; those windows are never moved. Launches happen in
/// document order, then one matcher run covers every entry that launched.
/// Per-entry failures end up in the report; only an unreachable extension is
/// an error.
pub fn restore_session(
    wm: &dyn WindowManager,
    launcher: &dyn Launcher,
    inspector: &dyn ProcessInspector,
    document: &SessionDocument,
    options: &MatchOptions,
    cancel: &AtomicBool,
) -> Result<RestoreReport, SessionError> {
    info!(
        event = "core.session.restore_started",
        entries = document.len()
    );

    wm.ensure_available()?;
    let baseline: Vec<u32> = wm
        .list_windows()?
        .iter()
        .map(|window| window.stable_sequence)
        .collect();

    let mut report = RestoreReport::default();
    let mut pending = Vec::new();
    // matcher slot -> report index
    let mut slots = Vec::new();

    for entry in &document.entries {
        let program = entry.command.argv.first().cloned().unwrap_or_default();
        let mut line = RestoreEntryReport {
            window_class: entry.window.window_class.clone(),
            program,
            outcome: RestoreOutcome::Launched,
            launched_pid: None,
            matched_sequence: None,
            error: None,
        };

        match launcher.launch(&entry.command.argv) {
            Ok(pid) => {
                line.launched_pid = Some(pid);
                slots.push(report.entries.len());
                pending.push(PendingRecord {
                    record: entry.window.clone(),
                    launched_pid: Some(pid),
                });
            }
            Err(e) => {
                warn!(
                    event = "core.session.launch_failed",
                    window_class = %line.window_class,
                    program = %line.program,
                    error = %e
                );
                line.outcome = RestoreOutcome::LaunchFailed;
                line.error = Some(e.to_string());
            }
        }
        report.entries.push(line);
    }

    let mut matcher = WindowMatcher::with_baseline(pending, baseline);
    run_matcher(wm, inspector, &mut matcher, options, cancel);

    for (slot, state) in matcher.states().iter().enumerate() {
        let line = &mut report.entries[slots[slot]];
        match *state {
            MatchState::Matched { stable_sequence } => {
                line.outcome = RestoreOutcome::Matched;
                line.matched_sequence = Some(stable_sequence);
            }
            MatchState::TimedOut => line.outcome = RestoreOutcome::MatchTimedOut,
            MatchState::Pending => line.outcome = RestoreOutcome::Launched,
        }
    }

    info!(
        event = "core.session.restore_completed",
        matched = report.matched(),
        timed_out = report.timed_out(),
        launch_failed = report.launch_failed(),
        unsettled = report.launched()
    );

    Ok(report)
}

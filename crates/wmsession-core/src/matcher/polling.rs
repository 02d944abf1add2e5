use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::operations::WindowMatcher;
use super::types::{Assignment, MatchOptions};
use crate::process::ProcessInspector;
use crate::shell::WindowManager;

/// Longest uninterrupted sleep between cancellation checks.
const CANCEL_CHECK_SLICE: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchRunSummary {
    pub polls: u32,
    pub moves_failed: u32,
    /// Stopped by the cancellation flag; pending records were left pending
    pub cancelled: bool,
}

/// Poll the window manager and feed the matcher until nothing matchable is
/// pending, the timeout elapses, or `cancel` is set.
///
/// Every assignment is applied with `move_window` immediately. A failed move
/// is logged and the record stays matched. A failed window listing is logged
/// and the next poll retries. On timeout the remaining records are expired;
/// on cancellation they are left pending.
pub fn run_matcher(
    wm: &dyn WindowManager,
    inspector: &dyn ProcessInspector,
    matcher: &mut WindowMatcher,
    options: &MatchOptions,
    cancel: &AtomicBool,
) -> MatchRunSummary {
    let deadline = Instant::now() + options.timeout;
    let mut summary = MatchRunSummary::default();

    info!(
        event = "core.matcher.run_started",
        records = matcher.len(),
        poll_interval_ms = options.poll_interval.as_millis() as u64,
        timeout_ms = options.timeout.as_millis() as u64
    );

    loop {
        if cancel.load(Ordering::Relaxed) {
            summary.cancelled = true;
            break;
        }
        if !matcher.has_matchable_pending() {
            break;
        }

        summary.polls += 1;
        match wm.list_windows() {
            Ok(windows) => {
                debug!(
                    event = "core.matcher.poll_completed",
                    poll = summary.polls,
                    windows = windows.len()
                );
                for assignment in matcher.observe(&windows, inspector) {
                    if !apply_assignment(wm, &assignment) {
                        summary.moves_failed += 1;
                    }
                }
            }
            Err(e) => {
                warn!(
                    event = "core.matcher.poll_failed",
                    poll = summary.polls,
                    error = %e
                );
            }
        }

        if !matcher.has_matchable_pending() {
            break;
        }
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        sleep_unless_cancelled(options.poll_interval.min(deadline - now), cancel);
    }

    if summary.cancelled {
        warn!(
            event = "core.matcher.run_cancelled",
            polls = summary.polls
        );
    } else {
        matcher.expire();
    }

    info!(
        event = "core.matcher.run_completed",
        polls = summary.polls,
        moves_failed = summary.moves_failed,
        cancelled = summary.cancelled
    );
    summary
}

fn apply_assignment(wm: &dyn WindowManager, assignment: &Assignment) -> bool {
    match wm.move_window(assignment.stable_sequence, &assignment.geometry) {
        Ok(()) => true,
        Err(e) => {
            warn!(
                event = "core.matcher.move_failed",
                stable_sequence = assignment.stable_sequence,
                error = %e
            );
            false
        }
    }
}

fn sleep_unless_cancelled(total: Duration, cancel: &AtomicBool) {
    let until = Instant::now() + total;
    loop {
        if cancel.load(Ordering::Relaxed) {
            return;
        }
        let now = Instant::now();
        if now >= until {
            return;
        }
        std::thread::sleep(CANCEL_CHECK_SLICE.min(until - now));
    }
}

//! Restore-time window matching.
//!
//! [`WindowMatcher`] holds the per-record state machine
//! (`Pending → Matched | TimedOut`) and the set of consumed windows; the
//! [`polling`] driver feeds it window lists from the window manager until
//! every record is settled, the timeout elapses, or the run is cancelled.

pub mod operations;
pub mod polling;
pub mod types;

pub use operations::WindowMatcher;
pub use polling::{MatchRunSummary, run_matcher};
pub use types::{Assignment, MatchOptions, MatchState, PendingRecord};

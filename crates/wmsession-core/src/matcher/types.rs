use std::time::Duration;

use crate::sessions::types::WindowRecord;
use crate::shell::WindowGeometry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    Pending,
    /// Matched to the live window with this stable sequence
    Matched { stable_sequence: u32 },
    TimedOut,
}

impl MatchState {
    pub fn is_pending(&self) -> bool {
        matches!(self, MatchState::Pending)
    }
}

/// A saved record waiting for its application's window to appear.
#[derive(Debug, Clone)]
pub struct PendingRecord {
    pub record: WindowRecord,
    /// Pid returned by the launcher; used to rank same-class candidates
    pub launched_pid: Option<u32>,
}

/// A decided match: move window `stable_sequence` to `geometry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    /// Index of the record in the matcher
    pub slot: usize,
    pub stable_sequence: u32,
    pub geometry: WindowGeometry,
    /// The window's process descends from the pid launched for the record
    pub ancestry_confirmed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl MatchOptions {
    pub fn from_millis(poll_interval_ms: u64, timeout_ms: u64) -> Self {
        Self {
            poll_interval: Duration::from_millis(poll_interval_ms),
            timeout: Duration::from_millis(timeout_ms),
        }
    }
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self::from_millis(
            crate::config::defaults::default_poll_interval_ms(),
            crate::config::defaults::default_timeout_ms(),
        )
    }
}

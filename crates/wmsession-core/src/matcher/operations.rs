use std::collections::HashSet;

use tracing::{debug, info};

use super::types::{Assignment, MatchState, PendingRecord};
use crate::process::ProcessInspector;
use crate::shell::MetaWindow;

/// Per-record matching state for one restore run.
///
/// A window, once assigned, is consumed and never offered to another record.
/// Windows that were already open before anything was launched can be
/// registered as consumed up front via [`WindowMatcher::with_baseline`].
#[derive(Debug)]
pub struct WindowMatcher {
    records: Vec<PendingRecord>,
    states: Vec<MatchState>,
    consumed: HashSet<u32>,
}

impl WindowMatcher {
    pub fn new(records: Vec<PendingRecord>) -> Self {
        Self::with_baseline(records, std::iter::empty())
    }

    pub fn with_baseline(
        records: Vec<PendingRecord>,
        baseline: impl IntoIterator<Item = u32>,
    ) -> Self {
        let states = vec![MatchState::Pending; records.len()];
        Self {
            records,
            states,
            consumed: baseline.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn state(&self, slot: usize) -> Option<MatchState> {
        self.states.get(slot).copied()
    }

    pub fn states(&self) -> &[MatchState] {
        &self.states
    }

    pub fn record(&self, slot: usize) -> Option<&PendingRecord> {
        self.records.get(slot)
    }

    /// Whether any pending record could still be matched by a future poll.
    ///
    /// Records with an empty class never match, so once only those remain
    /// further polling cannot change anything.
    pub fn has_matchable_pending(&self) -> bool {
        self.states
            .iter()
            .zip(&self.records)
            .any(|(state, pending)| state.is_pending() && is_matchable(pending))
    }

    /// Apply one window list from the window manager.
    ///
    /// Runs two passes over the pending records in document order. The first
    /// pass only accepts windows whose process descends from the pid launched
    /// for the record; the second takes the first unconsumed window of the
    /// same class in enumeration order. Repeating the same list is a no-op.
    pub fn observe(
        &mut self,
        observed: &[MetaWindow],
        inspector: &dyn ProcessInspector,
    ) -> Vec<Assignment> {
        let mut assignments = Vec::new();

        for slot in 0..self.records.len() {
            if !self.is_open(slot) {
                continue;
            }
            let Some(launched_pid) = self.records[slot].launched_pid else {
                continue;
            };
            let class = self.records[slot].record.window_class.as_str();
            let found = observed.iter().find(|window| {
                window.window_class == class
                    && !self.consumed.contains(&window.stable_sequence)
                    && inspector.descends_from(window.pid, launched_pid)
            });
            if let Some(window) = found {
                assignments.push(self.assign(slot, window, true));
            }
        }

        for slot in 0..self.records.len() {
            if !self.is_open(slot) {
                continue;
            }
            let class = self.records[slot].record.window_class.as_str();
            let found = observed.iter().find(|window| {
                window.window_class == class && !self.consumed.contains(&window.stable_sequence)
            });
            if let Some(window) = found {
                assignments.push(self.assign(slot, window, false));
            }
        }

        assignments
    }

    /// Time out every record still pending. Returns the affected slots;
    /// a second call returns nothing.
    pub fn expire(&mut self) -> Vec<usize> {
        let mut expired = Vec::new();
        for (slot, state) in self.states.iter_mut().enumerate() {
            if state.is_pending() {
                *state = MatchState::TimedOut;
                expired.push(slot);
            }
        }

        if !expired.is_empty() {
            info!(
                event = "core.matcher.records_timed_out",
                count = expired.len()
            );
        }
        expired
    }

    fn is_open(&self, slot: usize) -> bool {
        self.states[slot].is_pending() && is_matchable(&self.records[slot])
    }

    fn assign(&mut self, slot: usize, window: &MetaWindow, ancestry_confirmed: bool) -> Assignment {
        self.consumed.insert(window.stable_sequence);
        self.states[slot] = MatchState::Matched {
            stable_sequence: window.stable_sequence,
        };

        let record = &self.records[slot].record;
        debug!(
            event = "core.matcher.window_matched",
            slot = slot,
            window_class = %record.window_class,
            stable_sequence = window.stable_sequence,
            pid = window.pid,
            ancestry_confirmed = ancestry_confirmed
        );

        Assignment {
            slot,
            stable_sequence: window.stable_sequence,
            geometry: record.geometry,
            ancestry_confirmed,
        }
    }
}

fn is_matchable(pending: &PendingRecord) -> bool {
    !pending.record.window_class.is_empty()
}

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::resolve::ResolvedCommand;
use crate::shell::{MetaWindow, WindowGeometry};

/// One captured window.
///
/// Only on-screen windows (non-negative origin) become records. Records are
/// never modified after capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    /// Window-manager class; may be empty
    #[serde(default)]
    pub window_class: String,
    pub geometry: WindowGeometry,
    pub pid: u32,
    pub stable_sequence: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gtk_app_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sandboxed_app_id: Option<String>,
}

impl From<MetaWindow> for WindowRecord {
    fn from(window: MetaWindow) -> Self {
        Self {
            window_class: window.window_class,
            geometry: window.geometry,
            pid: window.pid,
            stable_sequence: window.stable_sequence,
            gtk_app_id: window.gtk_app_id,
            sandboxed_app_id: window.sandboxed_app_id,
        }
    }
}

/// A captured window paired with the command that relaunches it.
///
/// Serialized flat: the window fields sit next to `argv` and `source`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEntry {
    #[serde(flatten)]
    pub window: WindowRecord,
    #[serde(flatten)]
    pub command: ResolvedCommand,
}

/// The persisted session: entries in capture order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionDocument {
    pub entries: Vec<SessionEntry>,
}

impl SessionDocument {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Where a session document is read from or written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentPath {
    /// `-` on the command line: stdout for save, stdin for restore
    Stdio,
    File(PathBuf),
}

impl DocumentPath {
    /// Parse a command-line path. `-` selects stdio and a leading `~/` is
    /// expanded to the home directory.
    pub fn parse(raw: &str) -> Self {
        if raw == "-" {
            return DocumentPath::Stdio;
        }

        let path = Path::new(raw);
        match (path.strip_prefix("~"), dirs::home_dir()) {
            (Ok(rest), Some(home)) => DocumentPath::File(home.join(rest)),
            _ => DocumentPath::File(path.to_path_buf()),
        }
    }

    pub fn as_file(&self) -> Option<&Path> {
        match self {
            DocumentPath::Stdio => None,
            DocumentPath::File(path) => Some(path),
        }
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentPath::Stdio => f.write_str("-"),
            DocumentPath::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// What happens to a session file after it has been restored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Disposal {
    /// Rename to `<name>.<UTC timestamp>`
    pub mark: bool,
    /// Delete (the marked file, when combined with `mark`)
    pub remove: bool,
}

/// Final state of one document entry after a restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestoreOutcome {
    /// Launched, but matching was cancelled before a verdict
    Launched,
    LaunchFailed,
    Matched,
    MatchTimedOut,
}

impl fmt::Display for RestoreOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RestoreOutcome::Launched => "launched",
            RestoreOutcome::LaunchFailed => "launch failed",
            RestoreOutcome::Matched => "matched",
            RestoreOutcome::MatchTimedOut => "timed out",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoreEntryReport {
    pub window_class: String,
    pub program: String,
    pub outcome: RestoreOutcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launched_pid: Option<u32>,
    /// Stable sequence of the live window the record was matched to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_sequence: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Per-entry outcomes of a restore, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RestoreReport {
    pub entries: Vec<RestoreEntryReport>,
}

impl RestoreReport {
    pub fn count(&self, outcome: RestoreOutcome) -> usize {
        self.entries.iter().filter(|e| e.outcome == outcome).count()
    }

    pub fn matched(&self) -> usize {
        self.count(RestoreOutcome::Matched)
    }

    pub fn timed_out(&self) -> usize {
        self.count(RestoreOutcome::MatchTimedOut)
    }

    pub fn launch_failed(&self) -> usize {
        self.count(RestoreOutcome::LaunchFailed)
    }

    pub fn launched(&self) -> usize {
        self.count(RestoreOutcome::Launched)
    }
}

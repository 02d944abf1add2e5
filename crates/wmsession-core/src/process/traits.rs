//! Process table and process launching traits.

use super::errors::LaunchError;

/// Guards against parent cycles reported by a racing process table.
const MAX_ANCESTRY_DEPTH: usize = 64;

/// Read-only view of the live process table.
pub trait ProcessInspector {
    /// Command-line arguments of `pid`, or `None` if the process is gone,
    /// a zombie, or unreadable.
    fn read_cmdline(&self, pid: u32) -> Option<Vec<String>>;

    /// Parent of `pid`, if the process exists and has one.
    fn parent_pid(&self, pid: u32) -> Option<u32>;

    /// Whether `pid` is `ancestor` or one of its descendants.
    fn descends_from(&self, pid: u32, ancestor: u32) -> bool {
        if pid == 0 || ancestor == 0 {
            return false;
        }

        let mut current = pid;
        for _ in 0..MAX_ANCESTRY_DEPTH {
            if current == ancestor {
                return true;
            }
            match self.parent_pid(current) {
                Some(parent) if parent != current && parent != 0 => current = parent,
                _ => return false,
            }
        }
        false
    }
}

/// Starts applications for a restore.
pub trait Launcher {
    /// Spawn `argv` detached from the caller and return the new pid.
    fn launch(&self, argv: &[String]) -> Result<u32, LaunchError>;
}

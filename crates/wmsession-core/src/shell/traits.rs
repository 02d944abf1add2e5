//! Window manager trait definition.

use super::errors::ShellError;
use super::types::{MetaWindow, WindowGeometry};

/// Narrow, synchronous view of the window manager extension.
///
/// Every call is blocking and may fail; implementations never retry
/// internally. Callers decide whether a failure is fatal.
pub trait WindowManager {
    /// Check that the extension can be reached at all.
    fn ensure_available(&self) -> Result<(), ShellError>;

    /// Enumerate the visible top-level windows in the order the extension
    /// reports them.
    fn list_windows(&self) -> Result<Vec<MetaWindow>, ShellError>;

    /// Move, resize and (un)minimize the window with the given stable sequence.
    fn move_window(&self, stable_sequence: u32, geometry: &WindowGeometry)
    -> Result<(), ShellError>;
}

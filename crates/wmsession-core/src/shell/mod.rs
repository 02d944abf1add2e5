//! Window manager extension boundary.
//!
//! The extension is consumed through the narrow [`WindowManager`] trait:
//! list the current windows, move one window, and check availability. The
//! production implementation talks to a GNOME Shell extension over D-Bus.

pub mod dbus;
pub mod errors;
pub mod traits;
pub mod types;

pub use dbus::{BusTarget, GnomeShellWindowManager};
pub use errors::ShellError;
pub use traits::WindowManager;
pub use types::{MetaWindow, WindowGeometry};

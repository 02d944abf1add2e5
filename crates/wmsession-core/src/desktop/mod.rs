//! Desktop entry lookup.
//!
//! Maps an application identifier (gtk app id, flatpak id, window class or
//! executable name) to the command line of a launchable `.desktop` entry.

pub mod locator;
pub mod parse;
pub mod similarity;
pub mod traits;
pub mod types;

pub use locator::{XdgDesktopEntries, application_dirs};
pub use traits::DesktopEntryLocator;
pub use types::DesktopEntry;

//! wmsession-core: capture and restore the open windows of a desktop session
//!
//! This library provides the decision logic for turning the windows the
//! window manager reports into launchable commands, and for matching
//! relaunched applications back to their saved geometry. It is used by the
//! `wmsession` CLI.
//!
//! # Main Entry Points
//!
//! - [`sessions`] - Capture, persist and restore session documents
//! - [`resolve`] - Map a captured window to a launchable command
//! - [`matcher`] - Correlate freshly launched windows with saved records
//! - [`config`] - Configuration management

pub mod config;
pub mod desktop;
pub mod errors;
pub mod events;
pub mod logging;
pub mod matcher;
pub mod process;
pub mod resolve;
pub mod sessions;
pub mod shell;

// Re-export commonly used types at crate root for convenience
pub use config::WmSessionConfig;
pub use desktop::{DesktopEntry, DesktopEntryLocator, XdgDesktopEntries};
pub use matcher::{MatchOptions, MatchState, WindowMatcher};
pub use process::{DetachedLauncher, Launcher, ProcessInspector, SysinfoProcessInspector};
pub use resolve::{CommandResolver, CommandSource, ResolutionFailure, ResolvedCommand};
pub use sessions::types::{
    DocumentPath, RestoreOutcome, RestoreReport, SessionDocument, SessionEntry, WindowRecord,
};
pub use shell::{BusTarget, GnomeShellWindowManager, MetaWindow, WindowGeometry, WindowManager};

// Re-export handler module as the primary API
pub use sessions::handler as session_ops;

// Re-export logging initialization
pub use logging::init_logging;

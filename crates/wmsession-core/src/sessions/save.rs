use tracing::{error, info};

use crate::config::WmSessionConfig;
use crate::desktop::XdgDesktopEntries;
use crate::process::SysinfoProcessInspector;
use crate::resolve::{CommandResolver, ResolveOptions};
use crate::sessions::{capture::capture_session, errors::SessionError, persistence, types::*};
use crate::shell::{BusTarget, GnomeShellWindowManager};

/// Capture the live session and write it to `target`.
///
/// Returns the written document. Fails with [`SessionError::NothingCaptured`]
/// when no window could be resolved, in which case nothing is written.
pub fn save_session(
    target: &DocumentPath,
    config: &WmSessionConfig,
) -> Result<SessionDocument, SessionError> {
    info!(event = "core.session.save_started", target = %target);

    let bus = BusTarget::from_options(config.dbus.address.as_deref(), config.dbus.system);
    let wm = GnomeShellWindowManager::connect(&bus)?;

    let entries = XdgDesktopEntries::from_environment(
        &config.resolve.extra_desktop_dirs,
        config.resolve.min_entry_similarity,
    );
    let inspector = SysinfoProcessInspector::new();
    let resolver = CommandResolver::new(
        &entries,
        &inspector,
        ResolveOptions {
            allow_raw_cmdline: config.resolve.allow_raw_cmdline,
        },
    );

    let document = capture_session(&wm, &resolver)?;
    if document.is_empty() {
        error!(event = "core.session.save_failed", reason = "nothing_captured");
        return Err(SessionError::NothingCaptured);
    }

    persistence::write_document(&document, target)?;

    info!(
        event = "core.session.save_completed",
        target = %target,
        entries = document.len()
    );
    Ok(document)
}

use std::sync::atomic::AtomicBool;

use chrono::Utc;
use tracing::{info, warn};

use crate::config::WmSessionConfig;
use crate::matcher::MatchOptions;
use crate::process::{DetachedLauncher, SysinfoProcessInspector};
use crate::sessions::{errors::SessionError, persistence, restore::restore_session, types::*};
use crate::shell::{BusTarget, GnomeShellWindowManager};

/// Read and validate the document at `source`.
///
/// Done before the bus is touched, so a missing or malformed file fails
/// without a running window manager.
pub fn load_document(source: &DocumentPath) -> Result<SessionDocument, SessionError> {
    let document = persistence::read_document(source)?;
    info!(
        event = "core.session.document_loaded",
        source = %source,
        entries = document.len()
    );
    Ok(document)
}

/// Restore a loaded document against the live desktop.
///
/// Setting `cancel` stops window matching; processes already launched keep
/// running.
pub fn restore_document(
    document: &SessionDocument,
    config: &WmSessionConfig,
    cancel: &AtomicBool,
) -> Result<RestoreReport, SessionError> {
    let bus = BusTarget::from_options(config.dbus.address.as_deref(), config.dbus.system);
    let wm = GnomeShellWindowManager::connect(&bus)?;

    let options = MatchOptions::from_millis(config.restore.poll_interval_ms, config.restore.timeout_ms);
    restore_session(
        &wm,
        &DetachedLauncher::new(),
        &SysinfoProcessInspector::new(),
        document,
        &options,
        cancel,
    )
}

/// Rename and/or delete a restored session file.
///
/// Returns where the file now lives, or `None` if it was removed or the
/// document came from stdin.
pub fn dispose_document(
    source: &DocumentPath,
    disposal: Disposal,
) -> Result<Option<std::path::PathBuf>, SessionError> {
    let Some(path) = source.as_file() else {
        if disposal != Disposal::default() {
            warn!(
                event = "core.session.dispose_skipped",
                reason = "document read from stdin"
            );
        }
        return Ok(None);
    };

    let path = if disposal.mark {
        persistence::mark_document(path, Utc::now())?
    } else {
        path.to_path_buf()
    };

    if disposal.remove {
        persistence::remove_document(&path)?;
        return Ok(None);
    }
    Ok(Some(path))
}

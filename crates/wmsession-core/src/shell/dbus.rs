//! GNOME Shell extension client over D-Bus.
//!
//! The extension exports `io.github.wmsession.WindowCtl` on the
//! `org.gnome.Shell` service. Strings the extension cannot fill (missing
//! class, no app id) arrive as empty strings.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use zbus::blocking::Connection;
use zbus::zvariant::Type;

use super::errors::ShellError;
use super::traits::WindowManager;
use super::types::{MetaWindow, WindowGeometry, non_empty};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type)]
struct WireGeometry {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    minimized: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
struct WireWindow {
    window_class: String,
    geometry: WireGeometry,
    pid: i32,
    stable_sequence: u32,
    gtk_app_id: String,
    sandboxed_app_id: String,
}

impl From<WireGeometry> for WindowGeometry {
    fn from(g: WireGeometry) -> Self {
        Self {
            x: g.x,
            y: g.y,
            width: g.width,
            height: g.height,
            minimized: g.minimized,
        }
    }
}

impl From<&WindowGeometry> for WireGeometry {
    fn from(g: &WindowGeometry) -> Self {
        Self {
            x: g.x,
            y: g.y,
            width: g.width,
            height: g.height,
            minimized: g.minimized,
        }
    }
}

impl From<WireWindow> for MetaWindow {
    fn from(w: WireWindow) -> Self {
        Self {
            window_class: w.window_class,
            geometry: w.geometry.into(),
            // The shell reports 0 or -1 for windows without a known client pid
            pid: u32::try_from(w.pid).unwrap_or(0),
            stable_sequence: w.stable_sequence,
            gtk_app_id: non_empty(w.gtk_app_id),
            sandboxed_app_id: non_empty(w.sandboxed_app_id),
        }
    }
}

#[zbus::proxy(
    interface = "io.github.wmsession.WindowCtl",
    default_service = "org.gnome.Shell",
    default_path = "/io/github/wmsession/WindowCtl",
    gen_async = false
)]
trait WindowCtl {
    fn list_windows(&self) -> zbus::Result<Vec<WireWindow>>;

    fn move_window(&self, stable_sequence: u32, geometry: WireGeometry) -> zbus::Result<bool>;

    fn get_num_monitors(&self) -> zbus::Result<u32>;
}

/// Which message bus to connect to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BusTarget {
    #[default]
    Session,
    System,
    Address(String),
}

impl BusTarget {
    /// Pick a bus from an optional explicit address and the system flag.
    /// An explicit address wins.
    pub fn from_options(address: Option<&str>, system: bool) -> Self {
        match address {
            Some(address) => BusTarget::Address(address.to_string()),
            None if system => BusTarget::System,
            None => BusTarget::Session,
        }
    }
}

/// [`WindowManager`] backed by the GNOME Shell extension.
pub struct GnomeShellWindowManager {
    proxy: WindowCtlProxy<'static>,
}

impl std::fmt::Debug for GnomeShellWindowManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GnomeShellWindowManager").finish_non_exhaustive()
    }
}

impl GnomeShellWindowManager {
    /// Connect to the bus and build the extension proxy.
    ///
    /// Connecting does not prove the extension is loaded; call
    /// [`WindowManager::ensure_available`] for that.
    pub fn connect(target: &BusTarget) -> Result<Self, ShellError> {
        debug!(event = "core.shell.connect_started", target = ?target);

        let connection = match target {
            BusTarget::Session => Connection::session(),
            BusTarget::System => Connection::system(),
            BusTarget::Address(address) => zbus::blocking::connection::Builder::address(
                address.as_str(),
            )
            .and_then(|builder| builder.build()),
        }
        .map_err(|e| ShellError::Unavailable {
            message: format!("cannot connect to {:?}: {}", target, e),
        })?;

        let proxy = WindowCtlProxy::new(&connection).map_err(|e| {
            ShellError::Unavailable {
                message: e.to_string(),
            }
        })?;

        Ok(Self { proxy })
    }
}

impl WindowManager for GnomeShellWindowManager {
    fn ensure_available(&self) -> Result<(), ShellError> {
        let monitors = self
            .proxy
            .get_num_monitors()
            .map_err(|e| ShellError::Unavailable {
                message: e.to_string(),
            })?;

        debug!(event = "core.shell.available", monitors = monitors);
        Ok(())
    }

    fn list_windows(&self) -> Result<Vec<MetaWindow>, ShellError> {
        let windows = self
            .proxy
            .list_windows()
            .map_err(|e| ShellError::CallFailed {
                method: "ListWindows".to_string(),
                message: e.to_string(),
            })?;

        Ok(windows.into_iter().map(MetaWindow::from).collect())
    }

    fn move_window(
        &self,
        stable_sequence: u32,
        geometry: &WindowGeometry,
    ) -> Result<(), ShellError> {
        let moved = self
            .proxy
            .move_window(stable_sequence, WireGeometry::from(geometry))
            .map_err(|e| ShellError::CallFailed {
                method: "MoveWindow".to_string(),
                message: e.to_string(),
            })?;

        if moved {
            Ok(())
        } else {
            warn!(
                event = "core.shell.move_rejected",
                stable_sequence = stable_sequence
            );
            Err(ShellError::MoveRejected { stable_sequence })
        }
    }
}

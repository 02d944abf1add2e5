use serde::{Deserialize, Serialize};

/// Position, size and minimization state of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub minimized: bool,
}

impl WindowGeometry {
    /// Off-screen and special windows report a negative origin.
    pub fn is_on_screen(&self) -> bool {
        self.x >= 0 && self.y >= 0
    }
}

/// A window as reported by the window manager extension.
///
/// App ids the extension reports as empty strings are normalized to `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaWindow {
    pub window_class: String,
    pub geometry: WindowGeometry,
    pub pid: u32,
    pub stable_sequence: u32,
    pub gtk_app_id: Option<String>,
    pub sandboxed_app_id: Option<String>,
}

/// Turn an extension-reported id into an optional value.
pub(crate) fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

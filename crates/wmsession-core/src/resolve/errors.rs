use crate::errors::WmSessionError;

/// Why a captured window could not be turned into a command. Always
/// per-window: the window is dropped from the session, capture continues.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionFailure {
    #[error("Process {pid} no longer exists or has no command line")]
    ProcessGone { pid: u32 },

    #[error("No desktop entry found for window class '{window_class}'")]
    NoDesktopEntry { window_class: String },
}

impl WmSessionError for ResolutionFailure {
    fn error_code(&self) -> &'static str {
        match self {
            ResolutionFailure::ProcessGone { .. } => "RESOLVE_PROCESS_GONE",
            ResolutionFailure::NoDesktopEntry { .. } => "RESOLVE_NO_DESKTOP_ENTRY",
        }
    }

    fn is_user_error(&self) -> bool {
        true
    }
}

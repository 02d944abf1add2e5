use crate::errors::WmSessionError;

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("Window manager extension is unavailable: {message}")]
    Unavailable { message: String },

    #[error("Window manager call '{method}' failed: {message}")]
    CallFailed { method: String, message: String },

    #[error("Window manager refused to move window {stable_sequence}")]
    MoveRejected { stable_sequence: u32 },
}

impl WmSessionError for ShellError {
    fn error_code(&self) -> &'static str {
        match self {
            ShellError::Unavailable { .. } => "SHELL_UNAVAILABLE",
            ShellError::CallFailed { .. } => "SHELL_CALL_FAILED",
            ShellError::MoveRejected { .. } => "SHELL_MOVE_REJECTED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, ShellError::Unavailable { .. })
    }
}

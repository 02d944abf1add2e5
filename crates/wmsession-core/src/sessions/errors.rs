use crate::errors::WmSessionError;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Failed to read session document '{path}': {source}")]
    DocumentRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write session document '{path}': {source}")]
    DocumentWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Session document '{path}' is not valid: {message}")]
    DocumentParse { path: String, message: String },

    #[error("Window manager extension unavailable: {source}")]
    ExtensionUnavailable {
        #[from]
        source: crate::shell::ShellError,
    },

    #[error("No windows could be resolved to a command; nothing to save")]
    NothingCaptured,
}

impl WmSessionError for SessionError {
    fn error_code(&self) -> &'static str {
        match self {
            SessionError::DocumentRead { .. } => "SESSION_DOCUMENT_READ",
            SessionError::DocumentWrite { .. } => "SESSION_DOCUMENT_WRITE",
            SessionError::DocumentParse { .. } => "SESSION_DOCUMENT_PARSE",
            SessionError::ExtensionUnavailable { .. } => "SESSION_EXTENSION_UNAVAILABLE",
            SessionError::NothingCaptured => "SESSION_NOTHING_CAPTURED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            SessionError::DocumentParse { .. } | SessionError::NothingCaptured
        )
    }
}

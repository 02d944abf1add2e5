use crate::errors::WmSessionError;

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("Cannot launch an empty command")]
    EmptyCommand,

    #[error("Program '{program}' not found in PATH")]
    ProgramNotFound { program: String },

    #[error("Failed to spawn '{program}': {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl WmSessionError for LaunchError {
    fn error_code(&self) -> &'static str {
        match self {
            LaunchError::EmptyCommand => "LAUNCH_EMPTY_COMMAND",
            LaunchError::ProgramNotFound { .. } => "LAUNCH_PROGRAM_NOT_FOUND",
            LaunchError::SpawnFailed { .. } => "LAUNCH_SPAWN_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, LaunchError::ProgramNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_error_display() {
        let error = LaunchError::ProgramNotFound {
            program: "gnome-calculator".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Program 'gnome-calculator' not found in PATH"
        );
        assert_eq!(error.error_code(), "LAUNCH_PROGRAM_NOT_FOUND");
        assert!(error.is_user_error());
    }
}

use serde::{Deserialize, Serialize};

/// Which step of the fallback chain produced a command.
///
/// Recorded for diagnostics only; restore never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandSource {
    GtkAppId,
    SandboxedAppId,
    WmClassOrExeHeuristic,
    RawCmdline,
}

impl std::fmt::Display for CommandSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CommandSource::GtkAppId => "gtk app id",
            CommandSource::SandboxedAppId => "sandboxed app id",
            CommandSource::WmClassOrExeHeuristic => "window class / executable",
            CommandSource::RawCmdline => "process command line",
        };
        f.write_str(label)
    }
}

/// The command that relaunches a captured window's application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedCommand {
    /// Never empty
    pub argv: Vec<String>,
    pub source: CommandSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_serializes_snake_case() {
        let json = serde_json::to_string(&CommandSource::WmClassOrExeHeuristic).unwrap();
        assert_eq!(json, r#""wm_class_or_exe_heuristic""#);

        let parsed: CommandSource = serde_json::from_str(r#""raw_cmdline""#).unwrap();
        assert_eq!(parsed, CommandSource::RawCmdline);
    }
}

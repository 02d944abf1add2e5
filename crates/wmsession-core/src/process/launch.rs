use std::os::unix::process::CommandExt;
use std::process::{Command, Stdio};

use tracing::{debug, info};

use super::errors::LaunchError;
use super::traits::Launcher;

/// Spawns applications in their own process group with stdio detached, so
/// they outlive the restore command and ignore its terminal's signals.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedLauncher;

impl DetachedLauncher {
    pub fn new() -> Self {
        Self
    }
}

impl Launcher for DetachedLauncher {
    fn launch(&self, argv: &[String]) -> Result<u32, LaunchError> {
        let (program, args) = argv.split_first().ok_or(LaunchError::EmptyCommand)?;

        let resolved = which::which(program).map_err(|e| {
            debug!(
                event = "core.launch.lookup_failed",
                program = %program,
                error = %e
            );
            LaunchError::ProgramNotFound {
                program: program.clone(),
            }
        })?;

        let child = Command::new(&resolved)
            .arg0(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .process_group(0)
            .spawn()
            .map_err(|e| LaunchError::SpawnFailed {
                program: program.clone(),
                source: e,
            })?;

        let pid = child.id();
        info!(
            event = "core.launch.spawned",
            program = %program,
            resolved = %resolved.display(),
            pid = pid
        );

        Ok(pid)
    }
}

use std::path::Path;

use sysinfo::{
    Pid as SysinfoPid, ProcessRefreshKind, ProcessStatus, ProcessesToUpdate, System, UpdateKind,
};
use tracing::debug;

use super::traits::ProcessInspector;

/// [`ProcessInspector`] backed by `sysinfo`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SysinfoProcessInspector;

impl SysinfoProcessInspector {
    pub fn new() -> Self {
        Self
    }
}

fn refresh_single(system: &mut System, pid: SysinfoPid, kind: ProcessRefreshKind) {
    system.refresh_processes_specifics(ProcessesToUpdate::Some(&[pid]), true, kind);
}

impl ProcessInspector for SysinfoProcessInspector {
    fn read_cmdline(&self, pid: u32) -> Option<Vec<String>> {
        let mut system = System::new();
        let pid_obj = SysinfoPid::from_u32(pid);
        refresh_single(
            &mut system,
            pid_obj,
            ProcessRefreshKind::nothing()
                .with_cmd(UpdateKind::Always)
                .with_exe(UpdateKind::Always),
        );

        let process = system.process(pid_obj)?;
        if process.status() == ProcessStatus::Zombie {
            debug!(event = "core.process.zombie", pid = pid);
            return None;
        }

        let args: Vec<String> = process
            .cmd()
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .filter(|arg| !arg.is_empty())
            .collect();

        let args = normalize_cmdline(args, process.exe());
        if args.is_empty() { None } else { Some(args) }
    }

    fn parent_pid(&self, pid: u32) -> Option<u32> {
        let mut system = System::new();
        let pid_obj = SysinfoPid::from_u32(pid);
        refresh_single(&mut system, pid_obj, ProcessRefreshKind::nothing());

        system
            .process(pid_obj)
            .and_then(|process| process.parent())
            .map(|parent| parent.as_u32())
    }
}

/// Repair command lines that were rewritten by the process itself.
///
/// Some programs overwrite their argv with a single space-joined string
/// (Chromium-based apps, Electron helpers). When that string's first word is
/// not an existing path, the executable path is substituted for it.
pub fn normalize_cmdline(args: Vec<String>, exe: Option<&Path>) -> Vec<String> {
    if args.len() != 1 || !args[0].contains(' ') {
        return args;
    }

    let mut split: Vec<String> = args[0].split_whitespace().map(str::to_string).collect();

    if let Some(first) = split.first_mut()
        && !Path::new(first.as_str()).exists()
        && let Some(exe) = exe
    {
        debug!(
            event = "core.process.cmdline_program_replaced",
            original = %first,
            exe = %exe.display()
        );
        *first = exe.to_string_lossy().into_owned();
    }

    split
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_keeps_regular_argv() {
        let args = vec!["foo".to_string(), "--bar baz".to_string()];
        assert_eq!(normalize_cmdline(args.clone(), None), args);
    }

    #[test]
    fn test_normalize_splits_joined_argv_and_uses_exe() {
        let args = vec!["/definitely/missing/prog --type=renderer --lang=en".to_string()];
        let normalized = normalize_cmdline(args, Some(Path::new("/opt/app/prog")));
        assert_eq!(
            normalized,
            vec![
                "/opt/app/prog".to_string(),
                "--type=renderer".to_string(),
                "--lang=en".to_string()
            ]
        );
    }

    #[test]
    fn test_normalize_keeps_existing_program() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let program = temp.path().to_string_lossy().into_owned();
        let args = vec![format!("{} --flag", program)];

        let normalized = normalize_cmdline(args, Some(Path::new("/opt/other")));
        assert_eq!(normalized, vec![program, "--flag".to_string()]);
    }

    #[test]
    fn test_read_cmdline_of_current_process() {
        let inspector = SysinfoProcessInspector::new();
        let cmdline = inspector.read_cmdline(std::process::id());
        assert!(cmdline.is_some_and(|args| !args.is_empty()));
    }

    #[test]
    fn test_read_cmdline_of_missing_process() {
        let inspector = SysinfoProcessInspector::new();
        // Above the default pid_max on Linux
        assert_eq!(inspector.read_cmdline(4_194_304 + 17), None);
    }

    #[test]
    fn test_current_process_has_parent() {
        let inspector = SysinfoProcessInspector::new();
        assert!(inspector.parent_pid(std::process::id()).is_some());
    }
}

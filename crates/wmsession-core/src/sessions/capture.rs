use tracing::{info, warn};

use crate::resolve::CommandResolver;
use crate::sessions::errors::SessionError;
use crate::sessions::types::{SessionDocument, SessionEntry, WindowRecord};
use crate::shell::WindowManager;

/// Snapshot the current windows into a session document.
///
/// Windows with a negative origin are skipped. Windows whose command cannot
/// be resolved are logged and dropped; only a failed enumeration is fatal.
pub fn capture_session(
    wm: &dyn WindowManager,
    resolver: &CommandResolver<'_>,
) -> Result<SessionDocument, SessionError> {
    info!(event = "core.session.capture_started");

    let windows = wm.list_windows()?;
    let total = windows.len();

    let records: Vec<WindowRecord> = windows
        .into_iter()
        .filter(|window| window.geometry.is_on_screen())
        .map(WindowRecord::from)
        .collect();
    let off_screen = total - records.len();

    let mut entries = Vec::with_capacity(records.len());
    let mut unresolved = 0usize;
    for record in records {
        match resolver.resolve(&record) {
            Ok(command) => entries.push(SessionEntry {
                window: record,
                command,
            }),
            Err(failure) => {
                unresolved += 1;
                warn!(
                    event = "core.session.window_unresolved",
                    window_class = %record.window_class,
                    pid = record.pid,
                    error = %failure
                );
            }
        }
    }

    info!(
        event = "core.session.capture_completed",
        windows = total,
        off_screen = off_screen,
        unresolved = unresolved,
        captured = entries.len()
    );

    Ok(SessionDocument { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::desktop::{DesktopEntry, DesktopEntryLocator};
    use crate::process::ProcessInspector;
    use crate::resolve::{CommandSource, ResolveOptions};
    use crate::shell::{MetaWindow, ShellError, WindowGeometry};
    use std::collections::HashMap;

    struct NoEntries;

    impl DesktopEntryLocator for NoEntries {
        fn lookup(&self, _identifier: &str) -> Option<DesktopEntry> {
            None
        }
    }

    struct Cmdlines(HashMap<u32, Vec<String>>);

    impl ProcessInspector for Cmdlines {
        fn read_cmdline(&self, pid: u32) -> Option<Vec<String>> {
            self.0.get(&pid).cloned()
        }

        fn parent_pid(&self, _pid: u32) -> Option<u32> {
            None
        }
    }

    struct FixedWindows(Result<Vec<MetaWindow>, ()>);

    impl WindowManager for FixedWindows {
        fn ensure_available(&self) -> Result<(), ShellError> {
            Ok(())
        }

        fn list_windows(&self) -> Result<Vec<MetaWindow>, ShellError> {
            self.0.clone().map_err(|()| ShellError::Unavailable {
                message: "org.gnome.Shell is not running".to_string(),
            })
        }

        fn move_window(&self, _: u32, _: &WindowGeometry) -> Result<(), ShellError> {
            Ok(())
        }
    }

    fn window(class: &str, x: i32, y: i32, pid: u32, seq: u32) -> MetaWindow {
        MetaWindow {
            window_class: class.to_string(),
            geometry: WindowGeometry {
                x,
                y,
                width: 800,
                height: 600,
                minimized: false,
            },
            pid,
            stable_sequence: seq,
            gtk_app_id: None,
            sandboxed_app_id: None,
        }
    }

    fn inspector() -> Cmdlines {
        Cmdlines(HashMap::from([
            (10, vec!["foo".to_string(), "--bar".to_string()]),
            (11, vec!["gimp".to_string()]),
            (12, vec!["hidden-panel".to_string()]),
        ]))
    }

    #[test]
    fn test_capture_skips_off_screen_windows() {
        let wm = FixedWindows(Ok(vec![
            window("Foo", 0, 0, 10, 1),
            window("Panel", -100, 0, 12, 2),
            window("Gimp", 300, 200, 11, 3),
            window("Panel", 0, -1, 12, 4),
        ]));
        let inspector = inspector();
        let resolver = CommandResolver::new(&NoEntries, &inspector, ResolveOptions::default());

        let document = capture_session(&wm, &resolver).unwrap();

        assert_eq!(document.len(), 2);
        assert!(
            document
                .entries
                .iter()
                .all(|e| e.window.geometry.x >= 0 && e.window.geometry.y >= 0)
        );
        assert_eq!(document.entries[0].window.stable_sequence, 1);
        assert_eq!(document.entries[0].command.argv, vec!["foo", "--bar"]);
        assert_eq!(document.entries[0].command.source, CommandSource::RawCmdline);
        assert_eq!(document.entries[1].window.window_class, "Gimp");
    }

    #[test]
    fn test_capture_drops_unresolvable_windows() {
        let wm = FixedWindows(Ok(vec![
            window("Foo", 0, 0, 10, 1),
            window("Ghost", 0, 0, 999, 2),
        ]));
        let inspector = inspector();
        let resolver = CommandResolver::new(&NoEntries, &inspector, ResolveOptions::default());

        let document = capture_session(&wm, &resolver).unwrap();

        assert_eq!(document.len(), 1);
        assert_eq!(document.entries[0].window.window_class, "Foo");
    }

    #[test]
    fn test_capture_fails_when_extension_unreachable() {
        let wm = FixedWindows(Err(()));
        let inspector = inspector();
        let resolver = CommandResolver::new(&NoEntries, &inspector, ResolveOptions::default());

        let result = capture_session(&wm, &resolver);

        assert!(matches!(
            result,
            Err(SessionError::ExtensionUnavailable { .. })
        ));
    }
}

//! Capture a fake desktop, save it, reload it, and restore it onto an empty
//! fake desktop.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

use tempfile::TempDir;
use wmsession_core::process::LaunchError;
use wmsession_core::resolve::ResolveOptions;
use wmsession_core::shell::ShellError;
use wmsession_core::{
    CommandResolver, CommandSource, DesktopEntry, DesktopEntryLocator, DocumentPath, Launcher,
    MatchOptions, MetaWindow, ProcessInspector, RestoreOutcome, WindowGeometry, WindowManager,
    session_ops,
};

#[derive(Default)]
struct FakeDesktop {
    windows: RefCell<Vec<MetaWindow>>,
    moves: RefCell<Vec<(u32, WindowGeometry)>>,
    cmdlines: HashMap<u32, Vec<String>>,
    /// program name -> window class it maps
    classes: HashMap<String, String>,
    next_pid: RefCell<u32>,
}

impl FakeDesktop {
    fn map_window(&self, class: &str, geometry: WindowGeometry, pid: u32) {
        let mut windows = self.windows.borrow_mut();
        let stable_sequence = 1 + windows.len() as u32;
        windows.push(MetaWindow {
            window_class: class.to_string(),
            geometry,
            pid,
            stable_sequence,
            gtk_app_id: None,
            sandboxed_app_id: None,
        });
    }
}

impl WindowManager for FakeDesktop {
    fn ensure_available(&self) -> Result<(), ShellError> {
        Ok(())
    }

    fn list_windows(&self) -> Result<Vec<MetaWindow>, ShellError> {
        Ok(self.windows.borrow().clone())
    }

    fn move_window(&self, stable_sequence: u32, geometry: &WindowGeometry) -> Result<(), ShellError> {
        self.moves.borrow_mut().push((stable_sequence, *geometry));
        Ok(())
    }
}

impl ProcessInspector for FakeDesktop {
    fn read_cmdline(&self, pid: u32) -> Option<Vec<String>> {
        self.cmdlines.get(&pid).cloned()
    }

    fn parent_pid(&self, _pid: u32) -> Option<u32> {
        None
    }
}

impl Launcher for FakeDesktop {
    fn launch(&self, argv: &[String]) -> Result<u32, LaunchError> {
        let program = argv.first().ok_or(LaunchError::EmptyCommand)?;
        let class = self
            .classes
            .get(program)
            .ok_or_else(|| LaunchError::ProgramNotFound {
                program: program.clone(),
            })?;

        let pid = {
            let mut next = self.next_pid.borrow_mut();
            *next += 1;
            *next
        };
        let placeholder = WindowGeometry {
            x: 0,
            y: 0,
            width: 200,
            height: 200,
            minimized: false,
        };
        self.map_window(class, placeholder, pid);
        Ok(pid)
    }
}

struct Applications;

impl DesktopEntryLocator for Applications {
    fn lookup(&self, identifier: &str) -> Option<DesktopEntry> {
        (identifier == "Gimp").then(|| DesktopEntry {
            id: "gimp".to_string(),
            path: PathBuf::from("/usr/share/applications/gimp.desktop"),
            argv: vec!["gimp".to_string()],
        })
    }
}

fn geometry(x: i32, y: i32, minimized: bool) -> WindowGeometry {
    WindowGeometry {
        x,
        y,
        width: 1024,
        height: 768,
        minimized,
    }
}

#[test]
fn test_capture_save_restore_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let document_path = DocumentPath::File(temp_dir.path().join("session.json"));

    // Live session: two real windows and one off-screen helper.
    let live = FakeDesktop {
        cmdlines: HashMap::from([
            (10, vec!["/usr/bin/gimp-2.10".to_string()]),
            (11, vec!["kitty".to_string(), "--single-instance".to_string()]),
            (12, vec!["tray-helper".to_string()]),
        ]),
        ..FakeDesktop::default()
    };
    live.map_window("Gimp", geometry(50, 60, false), 10);
    live.map_window("kitty", geometry(700, 0, true), 11);
    live.map_window("TrayHelper", geometry(-32, -32, false), 12);

    let resolver = CommandResolver::new(&Applications, &live, ResolveOptions::default());
    let document = session_ops::capture_session(&live, &resolver).unwrap();
    assert_eq!(document.len(), 2);
    assert_eq!(document.entries[0].command.source, CommandSource::WmClassOrExeHeuristic);
    assert_eq!(document.entries[1].command.source, CommandSource::RawCmdline);

    session_ops::write_document(&document, &document_path).unwrap();
    let reloaded = session_ops::read_document(&document_path).unwrap();
    assert_eq!(reloaded, document);

    // Fresh login: nothing open yet.
    let fresh = FakeDesktop {
        classes: HashMap::from([
            ("gimp".to_string(), "Gimp".to_string()),
            ("kitty".to_string(), "kitty".to_string()),
        ]),
        next_pid: RefCell::new(2000),
        ..FakeDesktop::default()
    };

    let report = session_ops::restore_session(
        &fresh,
        &fresh,
        &fresh,
        &reloaded,
        &MatchOptions::from_millis(5, 500),
        &AtomicBool::new(false),
    )
    .unwrap();

    assert_eq!(report.matched(), 2);
    assert_eq!(report.timed_out(), 0);
    assert_eq!(report.launch_failed(), 0);
    assert!(report.entries.iter().all(|e| e.outcome == RestoreOutcome::Matched));

    let moves = fresh.moves.borrow();
    assert_eq!(moves.len(), 2);
    assert!(moves.contains(&(1, geometry(50, 60, false))));
    assert!(moves.contains(&(2, geometry(700, 0, true))));
}

//! XDG desktop entry index.
//!
//! Desktop files are indexed once, when the locator is built. A capture run
//! is short-lived, so entries installed mid-run are not picked up.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use super::parse::{exec_to_argv, parse_main_group};
use super::similarity::entry_similarity;
use super::traits::DesktopEntryLocator;
use super::types::DesktopEntry;

const DEFAULT_XDG_DATA_DIRS: &str = "/usr/local/share:/usr/share";
const SYSTEM_FLATPAK_EXPORTS: &str = "/var/lib/flatpak/exports/share";

#[derive(Debug, Clone)]
struct IndexedEntry {
    id: String,
    path: PathBuf,
}

/// [`DesktopEntryLocator`] over the `applications` directories of the XDG
/// data dirs.
#[derive(Debug, Clone)]
pub struct XdgDesktopEntries {
    entries: Vec<IndexedEntry>,
    min_similarity: f64,
}

/// The directories searched for desktop files, highest precedence first:
/// configured extras, `$XDG_DATA_HOME`, `$XDG_DATA_DIRS`, then the flatpak
/// export directories.
pub fn application_dirs(extra_dirs: &[PathBuf]) -> Vec<PathBuf> {
    let mut dirs_out: Vec<PathBuf> = extra_dirs.iter().map(|d| expand_home(d)).collect();

    if let Some(data_home) = dirs::data_dir() {
        dirs_out.push(data_home.join("applications"));
    }

    let data_dirs = std::env::var("XDG_DATA_DIRS")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_XDG_DATA_DIRS.to_string());
    dirs_out.extend(
        data_dirs
            .split(':')
            .filter(|d| !d.is_empty())
            .map(|d| Path::new(d).join("applications")),
    );

    if let Some(data_home) = dirs::data_dir() {
        dirs_out.push(data_home.join("flatpak/exports/share/applications"));
    }
    dirs_out.push(Path::new(SYSTEM_FLATPAK_EXPORTS).join("applications"));

    let mut seen = HashSet::new();
    dirs_out.retain(|d| seen.insert(d.clone()));
    dirs_out
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

/// Desktop file id of `path` below `root`: the relative path with `/`
/// replaced by `-` and the `.desktop` suffix removed.
fn desktop_file_id(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let joined = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("-");
    joined.strip_suffix(".desktop").map(str::to_string)
}

impl XdgDesktopEntries {
    /// Index the standard XDG locations plus `extra_dirs`.
    pub fn from_environment(extra_dirs: &[PathBuf], min_similarity: f64) -> Self {
        Self::from_dirs(&application_dirs(extra_dirs), min_similarity)
    }

    /// Index the given directories. When two directories provide the same
    /// desktop file id, the earlier directory wins.
    pub fn from_dirs(dirs: &[PathBuf], min_similarity: f64) -> Self {
        let mut entries = Vec::new();
        let mut seen_ids = HashSet::new();

        for root in dirs {
            if !root.is_dir() {
                continue;
            }

            for entry in WalkDir::new(root)
                .follow_links(true)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let path = entry.path();
                if !entry.file_type().is_file()
                    || path.extension().and_then(|e| e.to_str()) != Some("desktop")
                {
                    continue;
                }

                if let Some(id) = desktop_file_id(root, path)
                    && seen_ids.insert(id.clone())
                {
                    entries.push(IndexedEntry {
                        id,
                        path: path.to_path_buf(),
                    });
                }
            }
        }

        debug!(
            event = "core.desktop.index_completed",
            directories = dirs.len(),
            entries = entries.len()
        );

        Self {
            entries,
            min_similarity,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read and parse an indexed entry. Hidden entries, entries without a
    /// usable `Exec` and unreadable files yield `None`.
    fn load(&self, entry: &IndexedEntry) -> Option<DesktopEntry> {
        let content = match fs::read_to_string(&entry.path) {
            Ok(content) => content,
            Err(e) => {
                warn!(
                    event = "core.desktop.read_failed",
                    path = %entry.path.display(),
                    error = %e
                );
                return None;
            }
        };

        let group = match parse_main_group(&content) {
            Ok(group) => group,
            Err(e) => {
                warn!(
                    event = "core.desktop.parse_failed",
                    path = %entry.path.display(),
                    error = %e
                );
                return None;
            }
        };
        if group.hidden {
            debug!(event = "core.desktop.entry_hidden", id = %entry.id);
            return None;
        }

        let argv = group.exec.as_deref().and_then(exec_to_argv);
        if argv.is_none() {
            debug!(event = "core.desktop.entry_without_exec", id = %entry.id);
        }

        argv.map(|argv| DesktopEntry {
            id: entry.id.clone(),
            path: entry.path.clone(),
            argv,
        })
    }
}

impl DesktopEntryLocator for XdgDesktopEntries {
    fn lookup(&self, identifier: &str) -> Option<DesktopEntry> {
        let identifier = identifier.strip_suffix(".desktop").unwrap_or(identifier);
        if identifier.is_empty() {
            return None;
        }

        let exact = self.entries.iter().filter(|e| e.id == identifier);
        let folded = self
            .entries
            .iter()
            .filter(|e| e.id != identifier && e.id.eq_ignore_ascii_case(identifier));

        exact.chain(folded).find_map(|e| self.load(e))
    }

    fn lookup_fuzzy(&self, identifier: &str) -> Option<DesktopEntry> {
        if identifier.is_empty() {
            return None;
        }

        let mut scored: Vec<(f64, &IndexedEntry)> = self
            .entries
            .iter()
            .map(|e| (entry_similarity(identifier, &e.id), e))
            .filter(|(score, _)| *score >= self.min_similarity)
            .collect();

        // Stable sort keeps directory precedence among equal scores
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        let found = scored
            .into_iter()
            .find_map(|(score, e)| self.load(e).map(|entry| (score, entry)));

        if let Some((score, entry)) = &found {
            debug!(
                event = "core.desktop.fuzzy_match",
                identifier = identifier,
                id = %entry.id,
                score = score
            );
        }

        found.map(|(_, entry)| entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_entry(dir: &Path, name: &str, body: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, format!("[Desktop Entry]\nType=Application\n{}\n", body)).unwrap();
    }

    #[test]
    fn test_exact_and_case_insensitive_lookup() {
        let temp_dir = tempfile::tempdir().unwrap();
        write_entry(temp_dir.path(), "org.gnome.Terminal.desktop", "Exec=gnome-terminal");

        let locator = XdgDesktopEntries::from_dirs(&[temp_dir.path().to_path_buf()], 0.8);
        assert_eq!(locator.len(), 1);

        let entry = locator.lookup("org.gnome.Terminal").unwrap();
        assert_eq!(entry.argv, vec!["gnome-terminal".to_string()]);

        let folded = locator.lookup("ORG.GNOME.TERMINAL").unwrap();
        assert_eq!(folded.id, "org.gnome.Terminal");

        assert!(locator.lookup("org.gnome.Nautilus").is_none());
    }

    #[test]
    fn test_earlier_directory_wins() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        write_entry(first.path(), "editor.desktop", "Exec=editor --user");
        write_entry(second.path(), "editor.desktop", "Exec=editor --system");

        let locator = XdgDesktopEntries::from_dirs(
            &[first.path().to_path_buf(), second.path().to_path_buf()],
            0.8,
        );

        let entry = locator.lookup("editor").unwrap();
        assert_eq!(entry.argv, vec!["editor".to_string(), "--user".to_string()]);
    }

    #[test]
    fn test_subdirectory_ids_use_dashes() {
        let temp_dir = tempfile::tempdir().unwrap();
        write_entry(temp_dir.path(), "kde/konsole.desktop", "Exec=konsole");

        let locator = XdgDesktopEntries::from_dirs(&[temp_dir.path().to_path_buf()], 0.8);
        assert!(locator.lookup("kde-konsole").is_some());
        assert!(locator.lookup("konsole").is_none());
    }

    #[test]
    fn test_hidden_entry_is_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();
        write_entry(temp_dir.path(), "ghost.desktop", "Exec=ghost\nHidden=true");

        let locator = XdgDesktopEntries::from_dirs(&[temp_dir.path().to_path_buf()], 0.8);
        assert!(locator.lookup("ghost").is_none());
    }

    #[test]
    fn test_fuzzy_lookup_respects_threshold() {
        let temp_dir = tempfile::tempdir().unwrap();
        write_entry(
            temp_dir.path(),
            "org.mozilla.firefox.desktop",
            "Exec=/usr/bin/firefox %u",
        );
        write_entry(temp_dir.path(), "org.gnome.Calculator.desktop", "Exec=gnome-calculator");

        let locator = XdgDesktopEntries::from_dirs(&[temp_dir.path().to_path_buf()], 0.8);

        assert!(locator.lookup("firefox").is_none());
        let entry = locator.lookup_fuzzy("firefox").unwrap();
        assert_eq!(entry.id, "org.mozilla.firefox");
        assert_eq!(entry.argv, vec!["/usr/bin/firefox".to_string()]);

        assert!(locator.lookup_fuzzy("spotify").is_none());
    }

    #[test]
    fn test_missing_directories_are_skipped() {
        let locator =
            XdgDesktopEntries::from_dirs(&[PathBuf::from("/nonexistent/wmsession/apps")], 0.8);
        assert!(locator.is_empty());
    }

    #[test]
    fn test_escaped_exec_value() {
        let temp_dir = tempfile::tempdir().unwrap();
        write_entry(temp_dir.path(), "myapp.desktop", r"Exec=/opt/My\sApp/app --x %U");

        let locator = XdgDesktopEntries::from_dirs(&[temp_dir.path().to_path_buf()], 0.8);
        let entry = locator.lookup("myapp").unwrap();
        assert_eq!(
            entry.argv,
            vec!["/opt/My App/app".to_string(), "--x".to_string()]
        );
    }
}

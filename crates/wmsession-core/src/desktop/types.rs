use std::path::PathBuf;

/// A desktop entry that resolved to a runnable command line.
#[derive(Debug, Clone, PartialEq)]
pub struct DesktopEntry {
    /// Desktop file id, e.g. `org.gnome.Terminal`
    pub id: String,
    pub path: PathBuf,
    /// `Exec` split into arguments with field codes removed; never empty
    pub argv: Vec<String>,
}

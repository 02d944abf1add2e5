//! Desktop entry locator trait definition.

use super::types::DesktopEntry;

/// Finds the launchable desktop entry for an application identifier.
pub trait DesktopEntryLocator {
    /// Exact lookup: the identifier names the desktop file id, compared
    /// case-insensitively when no exact-case entry exists.
    fn lookup(&self, identifier: &str) -> Option<DesktopEntry>;

    /// Approximate lookup for identifiers that only resemble a desktop
    /// file id, such as window classes. Locators without a notion of
    /// similarity find nothing.
    fn lookup_fuzzy(&self, _identifier: &str) -> Option<DesktopEntry> {
        None
    }
}

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use tracing::{debug, info};

use crate::desktop::{DesktopEntry, DesktopEntryLocator};
use crate::process::ProcessInspector;
use crate::resolve::errors::ResolutionFailure;
use crate::resolve::types::{CommandSource, ResolvedCommand};
use crate::sessions::types::WindowRecord;

/// Tunables for the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Whether the live process command line may be used as a last resort.
    pub allow_raw_cmdline: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            allow_raw_cmdline: true,
        }
    }
}

/// Turns captured windows into launchable commands.
///
/// Fallback chain, first hit wins:
/// 1. desktop entry named by the gtk app id
/// 2. desktop entry named by the sandboxed (flatpak) app id
/// 3. desktop entry for the window class, then for the executable's base
///    name (exact ids first, then fuzzy matches)
/// 4. the live command line of the owning process
///
/// Each call reads the process table afresh; nothing is cached between
/// windows.
pub struct CommandResolver<'a> {
    locator: &'a dyn DesktopEntryLocator,
    inspector: &'a dyn ProcessInspector,
    options: ResolveOptions,
}

fn present(id: Option<&str>) -> Option<&str> {
    id.map(str::trim).filter(|id| !id.is_empty())
}

/// Window classes of Chromium "install as app" windows, e.g.
/// `chrome-listen.tidal.com__-Default`.
static CHROME_APP_CLASS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new("chrome-(?P<website>.+?)__.*?-(?P<profile>.+)").ok());

/// Minimum similarity between executable name and window class before the
/// executable takes part in fuzzy lookup. Interpreter hosts (`java`,
/// `python3`, `electron`) would otherwise match unrelated entries.
const MIN_EXE_CLASS_SIMILARITY: f64 = 0.5;

/// Terms tried against fuzzy desktop entry lookup, in order: the window
/// class, the website and profile of a Chromium web app class, then the
/// executable name when it resembles the class (or there is no class).
fn fuzzy_search_terms<'a>(class: Option<&'a str>, exe: Option<&'a str>) -> Vec<&'a str> {
    let mut terms: Vec<&str> = Vec::with_capacity(4);
    terms.extend(class);

    if let Some(class) = class
        && let Some(captures) = CHROME_APP_CLASS
            .as_ref()
            .and_then(|re| re.captures(class))
    {
        for name in ["website", "profile"] {
            if let Some(m) = captures.name(name) {
                terms.push(m.as_str());
            }
        }
    }

    if let Some(exe) = exe {
        let related = class.is_none_or(|class| {
            strsim::normalized_levenshtein(&exe.to_lowercase(), &class.to_lowercase())
                > MIN_EXE_CLASS_SIMILARITY
        });
        if related {
            terms.push(exe);
        }
    }

    let mut seen = Vec::with_capacity(terms.len());
    terms.retain(|term| {
        let fresh = !seen.contains(term);
        seen.push(*term);
        fresh
    });
    terms
}

fn from_entry(entry: DesktopEntry, source: CommandSource) -> ResolvedCommand {
    ResolvedCommand {
        argv: entry.argv,
        source,
    }
}

impl<'a> CommandResolver<'a> {
    pub fn new(
        locator: &'a dyn DesktopEntryLocator,
        inspector: &'a dyn ProcessInspector,
        options: ResolveOptions,
    ) -> Self {
        Self {
            locator,
            inspector,
            options,
        }
    }

    pub fn resolve(&self, record: &WindowRecord) -> Result<ResolvedCommand, ResolutionFailure> {
        if let Some(gtk_app_id) = present(record.gtk_app_id.as_deref())
            && let Some(entry) = self.locator.lookup(gtk_app_id)
        {
            info!(
                event = "core.resolve.gtk_app_id_hit",
                window_class = %record.window_class,
                desktop_id = %entry.id
            );
            return Ok(from_entry(entry, CommandSource::GtkAppId));
        }

        if let Some(sandboxed_app_id) = present(record.sandboxed_app_id.as_deref())
            && let Some(entry) = self.locator.lookup(sandboxed_app_id)
        {
            info!(
                event = "core.resolve.sandboxed_app_id_hit",
                window_class = %record.window_class,
                desktop_id = %entry.id
            );
            return Ok(from_entry(entry, CommandSource::SandboxedAppId));
        }

        let cmdline = if record.pid == 0 {
            None
        } else {
            self.inspector.read_cmdline(record.pid)
        };

        let exe_name = cmdline
            .as_ref()
            .and_then(|args| args.first())
            .and_then(|program| Path::new(program).file_name())
            .map(|name| name.to_string_lossy().into_owned());

        let class = present(Some(record.window_class.as_str()));
        let exe = present(exe_name.as_deref());

        let mut exact_terms: Vec<&str> = Vec::with_capacity(2);
        exact_terms.extend(class);
        if let Some(exe) = exe
            && !exact_terms.contains(&exe)
        {
            exact_terms.push(exe);
        }

        let heuristic_hit = exact_terms
            .iter()
            .find_map(|term| self.locator.lookup(term))
            .or_else(|| {
                fuzzy_search_terms(class, exe)
                    .iter()
                    .find_map(|term| self.locator.lookup_fuzzy(term))
            });

        if let Some(entry) = heuristic_hit {
            info!(
                event = "core.resolve.heuristic_hit",
                window_class = %record.window_class,
                executable = exe_name.as_deref().unwrap_or(""),
                desktop_id = %entry.id
            );
            return Ok(from_entry(entry, CommandSource::WmClassOrExeHeuristic));
        }

        match cmdline {
            None => {
                debug!(
                    event = "core.resolve.process_gone",
                    window_class = %record.window_class,
                    pid = record.pid
                );
                Err(ResolutionFailure::ProcessGone { pid: record.pid })
            }
            Some(_) if !self.options.allow_raw_cmdline => {
                Err(ResolutionFailure::NoDesktopEntry {
                    window_class: record.window_class.clone(),
                })
            }
            Some(argv) => {
                info!(
                    event = "core.resolve.raw_cmdline",
                    window_class = %record.window_class,
                    pid = record.pid
                );
                Ok(ResolvedCommand {
                    argv,
                    source: CommandSource::RawCmdline,
                })
            }
        }
    }
}

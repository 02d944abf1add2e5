//! Minimal `.desktop` file reading: the `Exec` and `Hidden` keys of the
//! `[Desktop Entry]` group.

use ini::{Ini, ParseError, ParseOption};

const MAIN_GROUP: &str = "Desktop Entry";

/// Field codes that expand to files, URLs or icon arguments at launch time.
/// A session restore launches without any of them.
const FIELD_CODES: [&str; 13] = [
    "%f", "%F", "%u", "%U", "%d", "%D", "%n", "%N", "%i", "%c", "%k", "%v", "%m",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MainGroup {
    pub exec: Option<String>,
    pub hidden: bool,
}

/// Read the keys of the `[Desktop Entry]` group that matter for launching.
///
/// Localized keys (`Exec[de]`) and keys from action groups are ignored.
/// A file without a main group yields an empty `MainGroup`.
pub fn parse_main_group(content: &str) -> Result<MainGroup, ParseError> {
    // Quotes and backslashes belong to the Exec syntax, not to the INI layer.
    let options = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    };
    let file = Ini::load_from_str_opt(content, options)?;

    let Some(section) = file.section(Some(MAIN_GROUP)) else {
        return Ok(MainGroup::default());
    };

    Ok(MainGroup {
        exec: section.get("Exec").map(|raw| unescape_value(raw.trim())),
        hidden: section.get("Hidden").is_some_and(|v| v.trim() == "true"),
    })
}

/// Tracks quoting of the unescaped text so `\s` can be emitted in a form
/// the Exec tokenizer keeps inside one argument.
#[derive(Default)]
struct ExecText {
    text: String,
    quote: Option<char>,
    escaped: bool,
}

impl ExecText {
    fn quoted(&self) -> bool {
        self.quote.is_some()
    }

    fn push(&mut self, ch: char) {
        self.text.push(ch);
        if self.escaped {
            self.escaped = false;
            return;
        }
        match (self.quote, ch) {
            (Some('\''), '\'') => self.quote = None,
            (Some('\''), _) => {}
            (_, '\\') => self.escaped = true,
            (None, '"' | '\'') => self.quote = Some(ch),
            (Some('"'), '"') => self.quote = None,
            _ => {}
        }
    }
}

/// Undo the string-level escapes of desktop entry values: `\s`, `\n`,
/// `\t`, `\r` and `\\`. Unknown sequences are kept for the tokenizer.
fn unescape_value(raw: &str) -> String {
    let mut out = ExecText::default();
    let mut chars = raw.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('s') if out.quoted() => out.push(' '),
            Some('s') => {
                out.push('\\');
                out.push(' ');
            }
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out.text
}

/// Split an `Exec` value into argv, dropping field codes.
///
/// Returns `None` when the value cannot be tokenized or leaves no program.
pub fn exec_to_argv(exec: &str) -> Option<Vec<String>> {
    let words = shell_words::split(exec).ok()?;

    let argv: Vec<String> = words
        .into_iter()
        .filter(|word| !FIELD_CODES.contains(&word.as_str()))
        .map(|word| word.replace("%%", "%"))
        .filter(|word| !word.is_empty())
        .collect();

    if argv.is_empty() { None } else { Some(argv) }
}

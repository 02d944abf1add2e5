//! Session document persistence
//!
//! The whole document is serialized in memory first; files are written to a
//! temporary sibling and renamed into place.

use std::ffi::OsString;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::sessions::{errors::SessionError, types::*};

fn cleanup_temp_file(temp_file: &Path, original_error: &std::io::Error) {
    if let Err(cleanup_err) = fs::remove_file(temp_file) {
        tracing::warn!(
            event = "core.session.temp_file_cleanup_failed",
            temp_file = %temp_file.display(),
            original_error = %original_error,
            cleanup_error = %cleanup_err,
            message = "Failed to clean up temp file after operation error"
        );
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

pub fn write_document(document: &SessionDocument, target: &DocumentPath) -> Result<(), SessionError> {
    let json = serde_json::to_string_pretty(document).map_err(|e| {
        tracing::error!(
            event = "core.session.serialization_failed",
            error = %e,
            message = "Failed to serialize session document to JSON"
        );
        SessionError::DocumentWrite {
            path: target.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        }
    })?;

    let path = match target {
        DocumentPath::Stdio => {
            let mut stdout = std::io::stdout().lock();
            return writeln!(stdout, "{}", json)
                .and_then(|_| stdout.flush())
                .map_err(|e| SessionError::DocumentWrite {
                    path: target.to_string(),
                    source: e,
                });
        }
        DocumentPath::File(path) => path,
    };

    let temp_file = temp_sibling(path);
    let write_err = |source| SessionError::DocumentWrite {
        path: path.display().to_string(),
        source,
    };

    if let Err(e) = fs::write(&temp_file, &json) {
        cleanup_temp_file(&temp_file, &e);
        return Err(write_err(e));
    }

    if let Err(e) = fs::rename(&temp_file, path) {
        cleanup_temp_file(&temp_file, &e);
        return Err(write_err(e));
    }

    tracing::info!(
        event = "core.session.document_written",
        path = %path.display(),
        entries = document.len()
    );

    Ok(())
}

pub fn read_document(source: &DocumentPath) -> Result<SessionDocument, SessionError> {
    let read_err = |e| SessionError::DocumentRead {
        path: source.to_string(),
        source: e,
    };

    let content = match source {
        DocumentPath::Stdio => {
            let mut content = String::new();
            std::io::stdin()
                .lock()
                .read_to_string(&mut content)
                .map_err(read_err)?;
            content
        }
        DocumentPath::File(path) => fs::read_to_string(path).map_err(read_err)?,
    };

    parse_document(&content, &source.to_string())
}

pub fn parse_document(content: &str, origin: &str) -> Result<SessionDocument, SessionError> {
    let document: SessionDocument =
        serde_json::from_str(content).map_err(|e| SessionError::DocumentParse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;

    if let Some(index) = document
        .entries
        .iter()
        .position(|e| e.command.argv.is_empty())
    {
        return Err(SessionError::DocumentParse {
            path: origin.to_string(),
            message: format!("entry {} has an empty argv", index),
        });
    }

    Ok(document)
}

/// Rename a restored session file to `<name>.<timestamp>` and return the
/// new path.
pub fn mark_document(path: &Path, now: DateTime<Utc>) -> Result<PathBuf, SessionError> {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(format!(".{}", now.format("%Y%m%dT%H%M%SZ")));
    let marked = path.with_file_name(name);

    fs::rename(path, &marked).map_err(|e| SessionError::DocumentWrite {
        path: path.display().to_string(),
        source: e,
    })?;

    tracing::info!(
        event = "core.session.document_marked",
        path = %path.display(),
        marked = %marked.display()
    );

    Ok(marked)
}

pub fn remove_document(path: &Path) -> Result<(), SessionError> {
    fs::remove_file(path).map_err(|e| SessionError::DocumentWrite {
        path: path.display().to_string(),
        source: e,
    })?;

    tracing::info!(event = "core.session.document_removed", path = %path.display());
    Ok(())
}

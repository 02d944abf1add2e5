//! Re-export facade for session operations.
//!
//! The CLI calls these; the pieces they are built from live in focused
//! modules next to this one.

pub use super::capture::capture_session;
pub use super::persistence::{mark_document, read_document, remove_document, write_document};
pub use super::reopen::{dispose_document, load_document, restore_document};
pub use super::restore::restore_session;
pub use super::save::save_session;

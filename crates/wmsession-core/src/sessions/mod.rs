pub mod capture;
pub mod errors;
pub mod handler;
pub mod persistence;
pub mod reopen;
pub mod restore;
pub mod save;
pub mod types;

pub use capture::capture_session;
pub use errors::SessionError;
pub use restore::restore_session;

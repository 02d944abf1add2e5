//! Command resolution: captured window → launchable command.

pub mod errors;
pub mod operations;
pub mod types;

pub use errors::ResolutionFailure;
pub use operations::{CommandResolver, ResolveOptions};
pub use types::{CommandSource, ResolvedCommand};

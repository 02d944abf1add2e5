pub mod errors;
pub mod launch;
pub mod operations;
pub mod traits;

pub use errors::LaunchError;
pub use launch::DetachedLauncher;
pub use operations::{SysinfoProcessInspector, normalize_cmdline};
pub use traits::{Launcher, ProcessInspector};

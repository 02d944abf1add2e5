use clap::ArgMatches;
use tracing::error;

use wmsession_core::events;

pub mod helpers;

mod restore;
mod save;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    match matches.subcommand() {
        Some(("save", sub_matches)) => save::handle_save_command(sub_matches),
        Some(("restore", sub_matches)) => restore::handle_restore_command(sub_matches),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, value_parser};

fn file_arg(help: &'static str) -> Arg {
    Arg::new("file")
        .long("file")
        .short('f')
        .value_name("PATH")
        .help(help)
        .required(true)
}

pub fn build_cli() -> Command {
    Command::new("wmsession")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Save and restore the open windows of a desktop session")
        .long_about("wmsession records which applications have windows open and where those windows sit, then relaunches the applications and moves their new windows back into place. It talks to a GNOME Shell extension over D-Bus.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Config file applied on top of the user config")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("system")
                .long("system")
                .help("Talk to the window manager over the system bus")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("dbus-address")
                .long("dbus-address")
                .value_name("ADDRESS")
                .help("Talk to the window manager over the bus at this address")
                .conflicts_with("system")
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("save")
                .about("Capture the current windows and write them to a session file")
                .arg(file_arg("Session file to write ('-' for stdout)")),
        )
        .subcommand(
            Command::new("restore")
                .about("Relaunch the applications in a session file and restore their windows")
                .arg(file_arg("Session file to read ('-' for stdin)"))
                .arg(
                    Arg::new("timeout")
                        .long("timeout")
                        .value_name("MS")
                        .help("How long to wait for windows to appear, in milliseconds (overrides config)")
                        .value_parser(value_parser!(u64)),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the restore report as JSON")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("rm")
                        .long("rm")
                        .help("Delete the session file after restoring")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("mark")
                        .long("mark")
                        .help("Rename the session file with a UTC timestamp suffix after restoring")
                        .action(ArgAction::SetTrue),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_build() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_save_requires_file() {
        let result = build_cli().try_get_matches_from(vec!["wmsession", "save"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_save_file_short_flag() {
        let matches = build_cli()
            .try_get_matches_from(vec!["wmsession", "save", "-f", "-"])
            .unwrap();
        let sub = matches.subcommand_matches("save").unwrap();
        assert_eq!(sub.get_one::<String>("file").unwrap(), "-");
    }

    #[test]
    fn test_restore_flags() {
        let matches = build_cli()
            .try_get_matches_from(vec![
                "wmsession",
                "restore",
                "--file",
                "/tmp/session.json",
                "--timeout",
                "3000",
                "--json",
                "--rm",
                "--mark",
            ])
            .unwrap();
        let sub = matches.subcommand_matches("restore").unwrap();

        assert_eq!(sub.get_one::<u64>("timeout").copied(), Some(3000));
        assert!(sub.get_flag("json"));
        assert!(sub.get_flag("rm"));
        assert!(sub.get_flag("mark"));
    }

    #[test]
    fn test_timeout_must_be_a_number() {
        let result = build_cli().try_get_matches_from(vec![
            "wmsession",
            "restore",
            "-f",
            "s.json",
            "--timeout",
            "soon",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let matches = build_cli()
            .try_get_matches_from(vec![
                "wmsession",
                "restore",
                "-f",
                "s.json",
                "-v",
                "--config",
                "/tmp/wm.toml",
                "--system",
            ])
            .unwrap();
        let sub = matches.subcommand_matches("restore").unwrap();

        assert!(sub.get_flag("verbose"));
        assert!(sub.get_flag("system"));
        assert_eq!(
            sub.get_one::<PathBuf>("config"),
            Some(&PathBuf::from("/tmp/wm.toml"))
        );
    }

    #[test]
    fn test_system_conflicts_with_address() {
        let result = build_cli().try_get_matches_from(vec![
            "wmsession",
            "--system",
            "--dbus-address",
            "unix:path=/tmp/bus",
            "save",
            "-f",
            "-",
        ]);
        assert!(result.is_err());
    }
}

use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

use nautilus_test_fixtures::FixturePaths;

pub struct CliArgs {
    pub config_path: Option<PathBuf>,
    pub payer_path: Option<PathBuf>,
    pub workspace_root: PathBuf,
    pub verify_programs: bool,
}

impl CliArgs {
    pub fn fixture_paths(&self) -> FixturePaths {
        FixturePaths {
            payer: self.payer_path.clone(),
            workspace_root: self.workspace_root.clone(),
        }
    }
}

fn command() -> Command {
    Command::new("fixtures")
        .about("Loads the nautilus test fixtures and reports what the test suite will use")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("CONFIG_PATH")
                .env("SOLANA_CLI_CONFIG")
                .value_parser(value_parser!(PathBuf))
                .help("Path to the Solana CLI config (default: ~/.config/solana/cli/config.yml)"),
        )
        .arg(
            Arg::new("payer")
                .long("payer")
                .value_name("KEYPAIR_PATH")
                .env("PAYER_KEYPAIR_PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Payer keypair (default: keypair_path from the CLI config, then ~/.config/solana/id.json)"),
        )
        .arg(
            Arg::new("workspace-root")
                .long("workspace-root")
                .value_name("DIR")
                .default_value(".")
                .value_parser(value_parser!(PathBuf))
                .help("Directory containing programs/<name>/target/deploy"),
        )
        .arg(
            Arg::new("verify-programs")
                .long("verify-programs")
                .action(ArgAction::SetTrue)
                .help("Check over RPC that every program is deployed"),
        )
}

pub fn parse_args() -> CliArgs {
    parse_from(std::env::args_os())
}

fn parse_from<I, T>(args: I) -> CliArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = command().get_matches_from(args);

    CliArgs {
        config_path: matches.get_one::<PathBuf>("config").cloned(),
        payer_path: matches.get_one::<PathBuf>("payer").cloned(),
        workspace_root: matches
            .get_one::<PathBuf>("workspace-root")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(".")),
        verify_programs: matches.get_flag("verify-programs"),
    }
}

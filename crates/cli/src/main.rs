mod api;
mod logging;
mod options;

use std::process::ExitCode;

use crate::logging::Logging;
use crate::options::UsageError;

const COMMANDS_HELP: &str = "\
Usage: src <command> [args...]

Commands:
  api <METHOD> <PATH>   Call a REST endpoint and print the JSON reply
  version               Print the version
  help                  Show this help

Environment:
  SRC_API_URL           API base URL (default: https://api.sourcecraft.tech)
  SRC_TOKEN             Personal access token sent as a bearer token
  RUST_LOG              Log filter (default: warn, -v: debug)

Use \"src <command> --help\" for command-specific options.";

fn main() -> ExitCode {
    // A missing .env is fine; a malformed one would silently drop settings.
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            eprintln!("error: invalid .env: {err}");
            return ExitCode::from(1);
        }
    }
    let logging = Logging::init();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, rest)) = argv.split_first() else {
        eprintln!("{COMMANDS_HELP}");
        return ExitCode::from(2);
    };

    let result = match command.as_str() {
        "--help" | "-h" | "help" => {
            println!("{COMMANDS_HELP}");
            return ExitCode::SUCCESS;
        }
        "--version" | "-V" | "version" => {
            println!("src {}", env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        "api" => api::run(rest, &logging),
        other => {
            eprintln!("unknown command: {other}\n");
            eprintln!("{COMMANDS_HELP}");
            return ExitCode::from(1);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<UsageError>() {
            Some(usage) => {
                eprintln!("error: {}\n", usage.message);
                eprintln!("{}", usage.help);
                ExitCode::from(2)
            }
            None => {
                eprintln!("error: {err:#}");
                ExitCode::from(1)
            }
        },
    }
}

//! happiscope CLI.

use clap::Parser;
use happi_cli::logging::init_logging;
use tracing::error;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, RunArgs};
use crate::commands::{run, run_countries, run_validate};
use crate::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(err) = init_logging(&cli.log_config()) {
        eprintln!("error: failed to initialize logging: {err}");
        std::process::exit(1);
    }
    let config_path = cli.config.as_deref();
    let default_command = Command::Run(RunArgs::default());
    let outcome = match cli.command.as_ref().unwrap_or(&default_command) {
        Command::Run(args) => run(args, config_path).map(|result| print_summary(&result)),
        Command::Validate(args) => {
            run_validate(args, config_path).map(|result| print_summary(&result))
        }
        Command::Countries(args) => run_countries(args, config_path),
    };
    if let Err(err) = outcome {
        error!(error = %format!("{err:#}"), "run failed");
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

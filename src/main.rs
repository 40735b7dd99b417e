mod check_cmd;
mod cli;
mod config;
mod convert;
mod generate_cmd;
mod logging;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

/// Exit code when every step ran but some check failed.
const EXIT_CHECK_FAILED: i32 = 2;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli.command) {
        Ok(true) => {}
        Ok(false) => process::exit(EXIT_CHECK_FAILED),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when the command ran to completion but a check failed.
fn run(command: Command) -> Result<bool> {
    match command {
        Command::Check(args) => check_cmd::run(args),
        Command::Generate(args) => generate_cmd::run(args).map(|()| true),
    }
}

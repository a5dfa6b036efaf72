//! crudwright CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use console::style;
use crudwright::observability::{self, LogFormat};
use crudwright_cli_lib::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let format = if cli.json_logs { LogFormat::Json } else { LogFormat::Compact };
    if let Err(e) = observability::init(cli.verbose, format) {
        eprintln!("{} {e}", style("warning:").yellow().bold());
    }

    match cli.run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e:#}", style("error:").red().bold());
            ExitCode::FAILURE
        }
    }
}

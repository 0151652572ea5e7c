mod cli;
mod config;
mod convert;
mod cwt_cmd;
mod filter_cmd;
mod hilbert_cmd;
mod io;
mod logging;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Filter(args) => filter_cmd::run(args),
        Command::Hilbert(args) => hilbert_cmd::run(args),
        Command::Cwt(args) => cwt_cmd::run(args),
    }
}

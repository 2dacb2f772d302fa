use std::io::stdout;
use std::process::ExitCode;

use argdump_cli::cli_args::Args;
use argdump_cli::commands::execute;
use clap::Parser;
use log::debug;

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match execute(args.command, &mut stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("{e:?}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

use std::process::ExitCode;

use clap::Parser;
use route_lookup::{cli::initialize_logging, Args};

fn main() -> ExitCode {
    let args = Args::parse();
    if args.log {
        if let Err(e) = initialize_logging() {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    }

    match route_lookup::run(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

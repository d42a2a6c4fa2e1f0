//! The route-lookup command line program.
//!
//! Reads a routing table and a list of destination addresses, resolves every
//! address with [`route_lookup_core`] and writes one report line per address
//! plus a closing summary.

pub mod cli;
pub mod error;
pub mod parsing;
pub mod report;
pub mod sources;

use std::io::{self, Write};

use route_lookup_core::{Session, Summary};

pub use cli::Args;
pub use error::{Error, Location};
use report::OutputReporter;
use sources::{QuerySource, RouteSource};

/// Runs the program for `args`, printing the summary to stdout.
pub fn run(args: &Args) -> Result<Summary, Error> {
    run_with(args, io::stdout())
}

/// Runs the program for `args`, writing the summary to `summary`.
///
/// Both inputs are opened before the report file is created, so a missing
/// input leaves nothing behind.
pub fn run_with<S: Write>(args: &Args, summary: S) -> Result<Summary, Error> {
    let routes = RouteSource::open(&args.routing_table)?;
    let queries = QuerySource::open(&args.input_packets)?;

    let mut reporter = OutputReporter::create(&args.output_path(), summary)?;

    let result = Session::run(args.session_config(), routes, queries, &mut reporter)?;
    reporter.into_inner()?;
    Ok(result)
}

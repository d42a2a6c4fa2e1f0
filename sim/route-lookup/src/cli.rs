//! Parses the command line arguments.
//!
//! Basic usage, with logging on:
//!
//! ```text
//! route-lookup routing_table.txt packets.txt --log
//! ```

use std::{
    fs::{create_dir_all, OpenOptions},
    path::PathBuf,
    sync::Arc,
};

use clap::Parser;
use route_lookup_core::SessionConfig;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::error::Error;

/// Resolves every address in INPUT_PACKETS against the routes in
/// ROUTING_TABLE.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(version)]
pub struct Args {
    /// Routing table file, one `address/length interface` per line
    pub routing_table: PathBuf,
    /// Input packet file, one destination address per line
    pub input_packets: PathBuf,
    /// Where to write the per-packet report. Defaults to INPUT_PACKETS
    /// with `.out` appended
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Fail on a route that is less specific than one loaded before it
    #[arg(long)]
    pub strict_order: bool,
    /// Logging flag. Used to turn logging on or off.
    #[arg(short, long)]
    pub log: bool,
}

impl Args {
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let mut name = self.input_packets.clone().into_os_string();
            name.push(".out");
            PathBuf::from(name)
        })
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            strict_order: self.strict_order,
        }
    }
}

/// Sends every event to a fresh json log file under `./logs`. Only call once.
pub fn initialize_logging() -> Result<(), Error> {
    let main_path = "./logs";
    create_dir_all(main_path)
        .map_err(|e| Error::Logging(format!("cannot create {main_path}: {e}")))?;
    let file_path = format!(
        "{}/debug-{}.log",
        main_path,
        chrono::offset::Local::now().format("%y-%m-%d_%H-%M-%S")
    );
    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(&file_path)
        .map_err(|e| Error::Logging(format!("cannot open {file_path}: {e}")))?;
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_writer(Arc::new(file))
        .json()
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Logging(e.to_string()))
}

use std::{
    fmt::{self, Display},
    io,
    path::PathBuf,
};

use route_lookup_core::{RangeError, SessionError};

/// A line in one of the input files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: PathBuf,
    /// 1-based.
    pub line: usize,
}

impl Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path.display(), self.line)
    }
}

/// Everything that can end a run early.
///
/// Wrong command lines never get here: clap reports them and exits with
/// status 2 before anything is opened.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cannot open '{}': {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Could not read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{location}: expected {expected} in '{text}'")]
    Format {
        location: Location,
        text: String,
        expected: &'static str,
    },
    #[error("{location}: {source}")]
    Range {
        location: Location,
        #[source]
        source: RangeError,
    },
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("Cannot create '{}': {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Could not write the lookup report: {0}")]
    Report(#[from] csv::Error),
    #[error("Could not write the summary: {0}")]
    Summary(#[source] io::Error),
    #[error("Could not set up logging: {0}")]
    Logging(String),
}

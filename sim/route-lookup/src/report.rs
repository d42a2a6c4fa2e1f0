//! Writes lookup results and the closing summary.

use std::{
    borrow::Cow,
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use route_lookup_core::{Interface, LookupRecord, Reporter, Summary};
use serde::Serialize;

use crate::error::Error;

/// One line of the lookup report.
#[derive(Serialize, Debug)]
struct LookupLine {
    address: String,
    interface: Cow<'static, str>,
    elapsed_ns: u64,
    accesses: u32,
}

impl From<&LookupRecord> for LookupLine {
    fn from(record: &LookupRecord) -> Self {
        Self {
            address: record.address.to_string(),
            interface: interface_label(record.interface),
            elapsed_ns: u64::try_from(record.elapsed.as_nanos()).unwrap_or(u64::MAX),
            accesses: record.accesses,
        }
    }
}

fn interface_label(interface: Interface) -> Cow<'static, str> {
    if interface.is_miss() {
        Cow::Borrowed("MISS")
    } else {
        Cow::Owned(interface.to_string())
    }
}

/// Writes one `;`-separated line per lookup to `lookups` and the summary to
/// `summary`.
pub struct OutputReporter<W: Write, S: Write> {
    lookups: csv::Writer<W>,
    summary: S,
}

impl<S: Write> OutputReporter<BufWriter<File>, S> {
    /// Creates (or truncates) the report file at `path`.
    pub fn create(path: &Path, summary: S) -> Result<Self, Error> {
        let file = File::create(path).map_err(|source| Error::Output {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufWriter::new(file), summary))
    }
}

impl<W: Write, S: Write> OutputReporter<W, S> {
    pub fn new(lookups: W, summary: S) -> Self {
        let lookups = csv::WriterBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .from_writer(lookups);
        Self { lookups, summary }
    }

    /// Flushes the lookup report and hands back both writers.
    pub fn into_inner(mut self) -> Result<(W, S), Error> {
        self.lookups.flush().map_err(csv::Error::from)?;
        let lookups = self
            .lookups
            .into_inner()
            .map_err(|e| Error::Report(csv::Error::from(e.into_error())))?;
        Ok((lookups, self.summary))
    }
}

impl<W: Write, S: Write> Reporter for OutputReporter<W, S> {
    type Error = Error;

    fn report_lookup(&mut self, record: &LookupRecord) -> Result<(), Error> {
        self.lookups.serialize(LookupLine::from(record))?;
        Ok(())
    }

    fn report_summary(&mut self, summary: &Summary) -> Result<(), Error> {
        // every lookup line is on disk before the run is declared done
        self.lookups.flush().map_err(csv::Error::from)?;
        write_summary(&mut self.summary, summary).map_err(Error::Summary)
    }
}

fn write_summary(out: &mut impl Write, summary: &Summary) -> io::Result<()> {
    writeln!(out, "Packets processed= {}", summary.total_queries)?;
    writeln!(out, "Average table accesses= {:.2}", summary.average_accesses)?;
    writeln!(
        out,
        "Average packet processing time (nsecs)= {:.2}",
        summary.average_elapsed_ns
    )?;
    writeln!(out, "Aux blocks allocated= {}", summary.aux_blocks)?;
    writeln!(out, "Forwarding table memory (bytes)= {}", summary.table_bytes)?;
    out.flush()
}

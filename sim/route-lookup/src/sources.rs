//! Line-oriented readers for the routing table and input packet files.
//!
//! Both sources are iterators. Running out of lines ends the iteration; a
//! line that does not parse is yielded as an `Err` so the session can tell a
//! broken file apart from a finished one. Blank lines are skipped.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use route_lookup_core::{Ipv4Address, Route};

use crate::{
    error::{Error, Location},
    parsing::{address_line, route_line},
};

/// Numbered, non-blank lines of a file.
struct Lines<R> {
    path: PathBuf,
    reader: R,
    buf: Vec<u8>,
    number: usize,
}

impl<R: BufRead> Lines<R> {
    fn new(path: PathBuf, reader: R) -> Self {
        Self {
            path,
            reader,
            buf: Vec::new(),
            number: 0,
        }
    }

    fn location(&self) -> Location {
        Location {
            path: self.path.clone(),
            line: self.number,
        }
    }

    fn format_error(&self, text: &str, expected: &'static str) -> Error {
        Error::Format {
            location: self.location(),
            text: text.trim().to_string(),
            expected,
        }
    }
}

impl<R: BufRead> Iterator for Lines<R> {
    type Item = Result<String, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(source) => {
                    return Some(Err(Error::Read {
                        path: self.path.clone(),
                        source,
                    }))
                }
            }
            self.number += 1;

            let line = match std::str::from_utf8(&self.buf) {
                Ok(line) => line,
                Err(_) => {
                    let text = String::from_utf8_lossy(&self.buf).into_owned();
                    return Some(Err(self.format_error(&text, "UTF-8 text")));
                }
            };
            if !line.trim().is_empty() {
                return Some(Ok(line.to_string()));
            }
        }
    }
}

fn open(path: &Path) -> Result<BufReader<File>, Error> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| Error::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })
}

/// Yields the routes of a routing table file, in file order.
pub struct RouteSource<R = BufReader<File>> {
    lines: Lines<R>,
}

impl RouteSource {
    pub fn open(path: &Path) -> Result<Self, Error> {
        Ok(Self::from_reader(path, open(path)?))
    }
}

impl<R: BufRead> RouteSource<R> {
    /// `name` is only used to point at the offending line in errors.
    pub fn from_reader(name: impl Into<PathBuf>, reader: R) -> Self {
        Self {
            lines: Lines::new(name.into(), reader),
        }
    }
}

impl<R: BufRead> Iterator for RouteSource<R> {
    type Item = Result<Route, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = match self.lines.next()? {
            Ok(line) => line,
            Err(e) => return Some(Err(e)),
        };
        let route = route_line(&line)
            .map_err(|expected| self.lines.format_error(&line, expected))
            .and_then(|entry| {
                Route::new(entry.address, entry.prefix_len, entry.interface).map_err(|source| {
                    Error::Range {
                        location: self.lines.location(),
                        source,
                    }
                })
            });
        Some(route)
    }
}

/// Yields the destination addresses of an input packet file, in file order.
pub struct QuerySource<R = BufReader<File>> {
    lines: Lines<R>,
}

impl QuerySource {
    pub fn open(path: &Path) -> Result<Self, Error> {
        Ok(Self::from_reader(path, open(path)?))
    }
}

impl<R: BufRead> QuerySource<R> {
    /// `name` is only used to point at the offending line in errors.
    pub fn from_reader(name: impl Into<PathBuf>, reader: R) -> Self {
        Self {
            lines: Lines::new(name.into(), reader),
        }
    }
}

impl<R: BufRead> Iterator for QuerySource<R> {
    type Item = Result<Ipv4Address, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = match self.lines.next()? {
            Ok(line) => line,
            Err(e) => return Some(Err(e)),
        };
        Some(address_line(&line).map_err(|expected| self.lines.format_error(&line, expected)))
    }
}

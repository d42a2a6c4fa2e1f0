use crate::{fib::Route, Ipv4Address};

/// A value that cannot be represented in the forwarding table.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    #[error("Prefix length {0} is outside 0..=32")]
    PrefixLength(u32),
    /// Interfaces share their 16-bit slot with the indirect flag, so anything
    /// above 15 bits would be read back as a block index.
    #[error("Interface {0} does not fit in 15 bits (0..=32767)")]
    Interface(u32),
}

/// Why a route could not be written into the table.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum InsertError {
    #[error(transparent)]
    Range(#[from] RangeError),
    #[error("No aux block left for the bucket of {address}: all {blocks} block indices are in use")]
    TableFull { address: Ipv4Address, blocks: usize },
}

/// Failures raised by a [`Session`](crate::Session) itself, as opposed to
/// failures of the sources and reporter it drives.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("Could not insert route {route}: {source}")]
    Insert {
        route: Route,
        #[source]
        source: InsertError,
    },
    #[error("Route {route} arrived after a longer /{previous} route")]
    OutOfOrder { route: Route, previous: u32 },
    #[error("Routes cannot be added once the query phase has started")]
    RoutesAfterQueries,
}

//! Longest-prefix-match route lookup over a two-level forwarding table.
//!
//! This crate holds the data plane of the route-lookup simulator: the table
//! a router would consult for every packet, the algorithm that loads routes
//! into it, and the algorithm that answers lookups while counting how many
//! table reads each one needed.
//!
//! # Organization
//! - [`Ipv4Address`] and [`subnetting`] describe addresses and prefixes
//! - [`ForwardingTable`] is the table itself, with
//!   [`add_route`](ForwardingTable::add_route) for loading and
//!   [`resolve`](ForwardingTable::resolve) for lookups
//! - [`Session`] runs the build phase and then the query phase, timing every
//!   lookup and passing results to a [`Reporter`]
//!
//! # Table layout
//!
//! The top 24 bits of an address index a main table with one 16-bit slot per
//! bucket. A slot either holds an interface (one access) or, with its top bit
//! set, the index of a 256-entry aux block that the low 8 bits of the address
//! index into (two accesses). Routes of length 24 or less only ever touch the
//! main table; longer routes give their bucket an aux block.
//!
//! Loading is order sensitive: the table stores the last interface written
//! for each address, so routes have to be loaded from shortest to longest
//! prefix for lookups to return the longest match.
//!
//! ```
//! # use route_lookup_core::{ForwardingTable, Ipv4Address};
//! let mut table = ForwardingTable::new();
//! table.add(Ipv4Address::new([10, 0, 0, 0]), 8, 1).unwrap();
//! table.add(Ipv4Address::new([10, 1, 2, 128]), 25, 3).unwrap();
//!
//! let found = table.resolve(Ipv4Address::new([10, 1, 2, 200]));
//! assert_eq!(found.interface.get(), 3);
//! assert_eq!(found.accesses, 2);
//! ```

mod error;
pub use error::{InsertError, RangeError, SessionError};

mod logging;

mod ipv4_address;
pub use ipv4_address::{AddressParseError, Ipv4Address};

pub mod subnetting;

pub mod fib;
pub use fib::{ForwardingTable, Interface, Resolution, Route};

pub mod session;
pub use session::{LookupRecord, Reporter, Session, SessionConfig, Summary};

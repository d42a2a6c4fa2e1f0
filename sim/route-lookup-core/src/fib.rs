//! The two-level forwarding table.
//!
//! An address is split into a 24-bit bucket and an 8-bit host octet. The
//! bucket indexes a main table of 2^24 slots; a slot either names the output
//! interface directly or points at a 256-slot aux block indexed by the host
//! octet. Lookups therefore cost one or two table reads.

mod insert;
mod resolve;
mod slot;
mod table;

pub use insert::Route;
pub use resolve::Resolution;
pub use slot::{BlockIndex, Interface, Slot};
pub use table::{AuxBlock, ForwardingTable, AUX_BLOCK_SLOTS, BUCKET_BITS, MAIN_TABLE_SLOTS};

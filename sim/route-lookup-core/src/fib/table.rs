use std::{fmt, mem};

use super::slot::{BlockIndex, Interface, Slot};
use crate::Ipv4Address;

/// Number of address bits that index the main table.
pub const BUCKET_BITS: u32 = 24;

/// One main-table slot for every possible 24-bit prefix.
pub const MAIN_TABLE_SLOTS: usize = 1 << BUCKET_BITS;

/// One aux slot for every value of an address's low 8 bits.
pub const AUX_BLOCK_SLOTS: usize = 1 << (32 - BUCKET_BITS);

/// The second level of the table: the interfaces for every host address in
/// a single 24-bit bucket.
pub type AuxBlock = [Interface; AUX_BLOCK_SLOTS];

/// A forwarding table answering longest-prefix-match lookups in at most two
/// memory accesses.
///
/// The main table holds one packed [`Slot`] per 24-bit prefix. Buckets that
/// only routes of length 24 or less touch resolve directly from it. A bucket
/// that a longer route lands in is moved into its own aux block, and its main
/// slot points at that block from then on.
///
/// Aux blocks are only ever appended, so a [`BlockIndex`] stays valid for the
/// whole life of the table. Dropping the table releases both levels.
pub struct ForwardingTable {
    pub(super) main: Box<[u16]>,
    pub(super) aux: Vec<AuxBlock>,
}

impl ForwardingTable {
    /// Creates a table where every address resolves to [`Interface::MISS`]
    /// in one access.
    pub fn new() -> Self {
        Self {
            main: vec![Slot::default().encode(); MAIN_TABLE_SLOTS].into_boxed_slice(),
            aux: Vec::new(),
        }
    }

    /// Number of aux blocks allocated so far.
    pub fn block_count(&self) -> usize {
        self.aux.len()
    }

    /// The decoded main-table slot for the bucket `address` falls into.
    pub fn main_slot(&self, address: Ipv4Address) -> Slot {
        Slot::decode(self.main[address.bucket()])
    }

    pub fn aux_block(&self, index: BlockIndex) -> Option<&AuxBlock> {
        self.aux.get(index.get())
    }

    /// Bytes held by both levels of the table.
    pub fn memory_footprint(&self) -> usize {
        mem::size_of_val(&*self.main) + self.aux.len() * mem::size_of::<AuxBlock>()
    }
}

impl Default for ForwardingTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ForwardingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForwardingTable")
            .field("main_slots", &self.main.len())
            .field("aux_blocks", &self.aux.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let table = ForwardingTable::new();
        assert_eq!(table.block_count(), 0);
        assert_eq!(table.main.len(), MAIN_TABLE_SLOTS);
        assert!(table.main.iter().all(|&raw| raw == 0));
        assert_eq!(
            table.main_slot(Ipv4Address::BROADCAST),
            Slot::Direct(Interface::MISS)
        );
        assert!(table.aux_block(BlockIndex::next_after(0).unwrap()).is_none());
    }

    #[test]
    fn footprint_counts_both_levels() {
        let mut table = ForwardingTable::new();
        assert_eq!(table.memory_footprint(), MAIN_TABLE_SLOTS * 2);

        table.aux.push([Interface::MISS; AUX_BLOCK_SLOTS]);
        assert_eq!(
            table.memory_footprint(),
            MAIN_TABLE_SLOTS * 2 + AUX_BLOCK_SLOTS * 2
        );
    }

    #[test]
    fn debug_does_not_dump_slots() {
        let table = ForwardingTable::new();
        assert_eq!(
            format!("{table:?}"),
            "ForwardingTable { main_slots: 16777216, aux_blocks: 0 }"
        );
    }
}

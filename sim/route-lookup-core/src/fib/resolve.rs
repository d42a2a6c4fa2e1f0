use super::{
    slot::{Interface, Slot},
    table::ForwardingTable,
};
use crate::Ipv4Address;

/// The answer to a single lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub interface: Interface,
    /// Table reads the lookup needed: 1 for a direct bucket, 2 when the
    /// bucket has an aux block.
    pub accesses: u32,
}

impl ForwardingTable {
    /// Finds the interface for `address`.
    ///
    /// Every address has an entry, so this never fails. Addresses no route
    /// covers come back as [`Interface::MISS`].
    #[inline]
    pub fn resolve(&self, address: Ipv4Address) -> Resolution {
        match Slot::decode(self.main[address.bucket()]) {
            Slot::Direct(interface) => Resolution {
                interface,
                accesses: 1,
            },
            Slot::Indirect(block) => Resolution {
                interface: self.aux[block.get()][address.host_octet()],
                accesses: 2,
            },
        }
    }
}

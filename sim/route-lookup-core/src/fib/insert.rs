use std::fmt::{self, Display};

use super::{
    slot::{BlockIndex, Interface, Slot},
    table::{AuxBlock, ForwardingTable, AUX_BLOCK_SLOTS, BUCKET_BITS},
};
use crate::{
    logging::{aux_block_event, route_event},
    subnetting::{Ipv4Net, MAX_PREFIX_LEN},
    InsertError, Ipv4Address, RangeError,
};

/// A prefix and the interface that addresses under it leave through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Route {
    prefix: Ipv4Net,
    interface: Interface,
}

impl Route {
    /// Checks that both values fit the table before building the route.
    ///
    /// Host bits set in `address` past `prefix_len` are ignored, the same way
    /// [`Ipv4Net::new`] ignores them.
    pub fn new(address: Ipv4Address, prefix_len: u32, interface: u32) -> Result<Self, RangeError> {
        if prefix_len > MAX_PREFIX_LEN {
            return Err(RangeError::PrefixLength(prefix_len));
        }
        Ok(Self {
            prefix: Ipv4Net::new_short(address, prefix_len),
            interface: Interface::try_from(interface)?,
        })
    }

    pub fn prefix(&self) -> Ipv4Net {
        self.prefix
    }

    pub fn prefix_len(&self) -> u32 {
        self.prefix.prefix_len()
    }

    pub fn interface(&self) -> Interface {
        self.interface
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.prefix, self.interface)
    }
}

impl ForwardingTable {
    /// Validates the raw values and inserts the resulting route.
    pub fn add(
        &mut self,
        address: Ipv4Address,
        prefix_len: u32,
        interface: u32,
    ) -> Result<(), InsertError> {
        let route = Route::new(address, prefix_len, interface)?;
        self.add_route(&route)
    }

    /// Writes `route` over every address it covers.
    ///
    /// The table keeps only the winning interface per address, not the
    /// prefixes that produced it. Whatever is written last wins, so routes
    /// must be added in non-decreasing prefix length for lookups to return
    /// the longest match.
    ///
    /// Routes of length 24 or less overwrite a run of main-table slots.
    /// Longer routes write into the aux block of their bucket, creating the
    /// block first if the bucket does not have one yet. Loaded in order, a
    /// bucket never gets more than one aux block. Out of order it can: a
    /// short route over a bucket with a block points the bucket back at an
    /// interface, and the next long route there allocates a fresh block
    /// while the old one stays allocated.
    pub fn add_route(&mut self, route: &Route) -> Result<(), InsertError> {
        let id = route.prefix().id();
        let len = route.prefix_len();
        let bucket = id.bucket();

        if len <= BUCKET_BITS {
            let count = 1usize << (BUCKET_BITS - len);
            let direct = Slot::Direct(route.interface()).encode();
            self.main[bucket..bucket + count].fill(direct);
        } else {
            let start = id.host_octet();
            let hosts = start..start + (1usize << (MAX_PREFIX_LEN - len));

            match Slot::decode(self.main[bucket]) {
                Slot::Indirect(block) => {
                    self.aux[block.get()][hosts].fill(route.interface());
                }
                Slot::Direct(current) => {
                    let block = BlockIndex::next_after(self.aux.len()).ok_or(
                        InsertError::TableFull {
                            address: id,
                            blocks: self.aux.len(),
                        },
                    )?;

                    // the rest of the bucket keeps resolving to whatever
                    // shorter route covered it
                    let mut hosts_in_bucket: AuxBlock = [current; AUX_BLOCK_SLOTS];
                    hosts_in_bucket[hosts].fill(route.interface());
                    self.aux.push(hosts_in_bucket);

                    // only point at the block once it is complete
                    self.main[bucket] = Slot::Indirect(block).encode();
                    aux_block_event(id, block);
                }
            }
        }

        route_event(route);
        Ok(())
    }
}

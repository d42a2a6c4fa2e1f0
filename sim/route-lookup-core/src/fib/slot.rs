//! The 16-bit slot format of the main table.
//!
//! Bit 15 tells the two kinds of slot apart. When it is clear, bits 0-14 are
//! the output interface and a lookup ends after one access. When it is set,
//! bits 0-14 are the index of an aux block and the lookup needs a second
//! access into that block.

use std::fmt::{self, Display};

use crate::RangeError;

const INDIRECT_FLAG: u16 = 0x8000;
const VALUE_MASK: u16 = 0x7FFF;

/// An output interface. Only 15 bits are available for it in a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Interface(u16);

impl Interface {
    /// The value every slot starts out with. Addresses that no route
    /// covers resolve to it.
    pub const MISS: Self = Self(0);

    /// The largest interface a slot can hold.
    pub const MAX: Self = Self(VALUE_MASK);

    /// Returns `None` if `value` needs the 16th bit.
    pub const fn new(value: u16) -> Option<Self> {
        if value & INDIRECT_FLAG == 0 {
            Some(Self(value))
        } else {
            None
        }
    }

    pub const fn get(self) -> u16 {
        self.0
    }

    pub const fn is_miss(self) -> bool {
        self.0 == Self::MISS.0
    }
}

impl TryFrom<u32> for Interface {
    type Error = RangeError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        u16::try_from(value)
            .ok()
            .and_then(Interface::new)
            .ok_or(RangeError::Interface(value))
    }
}

impl From<Interface> for u16 {
    fn from(interface: Interface) -> Self {
        interface.0
    }
}

impl Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The position of an aux block in the table's block list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockIndex(u16);

impl BlockIndex {
    /// How many aux blocks a table can address.
    pub const LIMIT: usize = VALUE_MASK as usize + 1;

    /// The index the next block gets when `count` blocks already exist,
    /// or `None` once every index is taken.
    pub fn next_after(count: usize) -> Option<Self> {
        if count < Self::LIMIT {
            Some(Self(count as u16))
        } else {
            None
        }
    }

    pub const fn get(self) -> usize {
        self.0 as usize
    }
}

/// A decoded main-table slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Resolves in one access.
    Direct(Interface),
    /// Resolves in a second access into the given aux block.
    Indirect(BlockIndex),
}

impl Slot {
    /// Packs the slot into the 16 bits stored in the main table.
    pub const fn encode(self) -> u16 {
        match self {
            Slot::Direct(interface) => interface.0,
            Slot::Indirect(block) => block.0 | INDIRECT_FLAG,
        }
    }

    /// Unpacks a stored slot. Every `u16` is a valid slot.
    pub const fn decode(raw: u16) -> Self {
        if raw & INDIRECT_FLAG == 0 {
            Slot::Direct(Interface(raw))
        } else {
            Slot::Indirect(BlockIndex(raw & VALUE_MASK))
        }
    }
}

impl Default for Slot {
    fn default() -> Self {
        Slot::Direct(Interface::MISS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interface_range() {
        assert_eq!(Interface::try_from(0u32), Ok(Interface::MISS));
        assert_eq!(Interface::try_from(32767u32), Ok(Interface::MAX));
        assert_eq!(
            Interface::try_from(32768u32),
            Err(RangeError::Interface(32768))
        );
        assert_eq!(
            Interface::try_from(70000u32),
            Err(RangeError::Interface(70000))
        );
        assert!(Interface::new(0x8000).is_none());
        assert!(Interface::MISS.is_miss());
        assert!(!Interface::MAX.is_miss());
    }

    #[test]
    fn block_index_limit() {
        assert_eq!(BlockIndex::next_after(0).map(BlockIndex::get), Some(0));
        assert_eq!(
            BlockIndex::next_after(BlockIndex::LIMIT - 1).map(BlockIndex::get),
            Some(32767)
        );
        assert_eq!(BlockIndex::next_after(BlockIndex::LIMIT), None);
    }

    #[test]
    fn zero_is_a_direct_miss() {
        assert_eq!(Slot::decode(0), Slot::Direct(Interface::MISS));
        assert_eq!(Slot::default().encode(), 0);
    }

    #[test]
    fn flag_bit_selects_the_variant() {
        let direct = Slot::Direct(Interface::MAX);
        assert_eq!(direct.encode(), 0x7FFF);

        let indirect = Slot::Indirect(BlockIndex(5));
        assert_eq!(indirect.encode(), 0x8005);
        assert_eq!(Slot::decode(0x8005), indirect);

        // block 0 still has the flag set, so it never looks like a miss
        assert_eq!(Slot::Indirect(BlockIndex(0)).encode(), 0x8000);
    }

    #[test]
    fn encoding_round_trips() {
        for value in [0u16, 1, 2, 255, 256, 0x1234, 0x7FFE, 0x7FFF] {
            let direct = Slot::Direct(Interface(value));
            let indirect = Slot::Indirect(BlockIndex(value));
            assert_eq!(Slot::decode(direct.encode()), direct);
            assert_eq!(Slot::decode(indirect.encode()), indirect);
        }
        // and every raw value survives decode then encode
        for raw in (0..=u16::MAX).step_by(97) {
            assert_eq!(Slot::decode(raw).encode(), raw);
        }
    }
}

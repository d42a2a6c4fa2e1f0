//! Prefixes in CIDR notation (`address/length`).
//!
//! A prefix only ever stores its network id: host bits past the prefix
//! length are cleared when it is built, so every address a prefix reports
//! lies inside its own range.

use std::{num::ParseIntError, str::FromStr};

use crate::Ipv4Address;

/// The longest prefix a route can carry.
pub const MAX_PREFIX_LEN: u32 = 32;

/// The leading-ones mask of a prefix length.
#[derive(Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Ipv4Mask(u32);

impl std::fmt::Debug for Ipv4Mask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Ipv4Mask")
            .field(&Ipv4Address::from(self.0))
            .finish()
    }
}

impl Ipv4Mask {
    /// Lengths past 32 give the /32 mask.
    ///
    /// ```
    /// # use route_lookup_core::subnetting::Ipv4Mask;
    /// assert_eq!(Ipv4Mask::from_bitcount(20).to_u32(), 0xFF_FF_F0_00);
    /// ```
    pub const fn from_bitcount(len: u32) -> Ipv4Mask {
        match len {
            0 => Ipv4Mask(0),
            1..=MAX_PREFIX_LEN => Ipv4Mask(u32::MAX << (MAX_PREFIX_LEN - len)),
            _ => Ipv4Mask(u32::MAX),
        }
    }

    pub const fn prefix_len(self) -> u32 {
        self.0.count_ones()
    }

    pub const fn to_u32(self) -> u32 {
        self.0
    }
}

/// A route prefix: a network id and its mask.
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ipv4Net {
    id: Ipv4Address,
    mask: Ipv4Mask,
}

impl Ipv4Net {
    /// Clears any host bits of `address` that fall outside `mask`.
    pub fn new(address: Ipv4Address, mask: Ipv4Mask) -> Self {
        Self {
            id: Ipv4Address::from(address.to_u32() & mask.to_u32()),
            mask,
        }
    }

    /// Same as [`Ipv4Net::new`] with a mask length, clamped to 32.
    ///
    /// ```
    /// # use route_lookup_core::subnetting::Ipv4Net;
    /// let net = Ipv4Net::new_short([192, 168, 7, 99], 24);
    /// assert_eq!(net.to_string(), "192.168.7.0/24");
    /// ```
    pub fn new_short(address: impl Into<Ipv4Address>, len: u32) -> Ipv4Net {
        Ipv4Net::new(address.into(), Ipv4Mask::from_bitcount(len))
    }

    /// Parses `a.b.c.d/len`. Unlike [`Ipv4Net::new_short`], a length over
    /// 32 is an error.
    ///
    /// ```
    /// # use route_lookup_core::{subnetting::Ipv4Net, Ipv4Address};
    /// let net = Ipv4Net::from_cidr("10.0.0.119/24").unwrap();
    /// assert_eq!(net.id(), Ipv4Address::from([10, 0, 0, 0]));
    ///
    /// assert!(Ipv4Net::from_cidr("5.6.7.8").is_err());
    /// assert!(Ipv4Net::from_cidr("5.6.7.8/33").is_err());
    /// ```
    pub fn from_cidr(cidr: &str) -> Result<Ipv4Net, CidrParseError> {
        let (address, len) = cidr.split_once('/').ok_or(CidrParseError::Ipv4)?;
        let address = Ipv4Address::from_str(address).map_err(|_| CidrParseError::Ipv4)?;
        let len = u32::from_str(len)?;
        if len > MAX_PREFIX_LEN {
            return Err(CidrParseError::MaskLength(len));
        }
        Ok(Ipv4Net::new_short(address, len))
    }

    /// The first address covered.
    pub fn id(&self) -> Ipv4Address {
        self.id
    }

    /// The last address covered.
    pub fn broadcast(&self) -> Ipv4Address {
        Ipv4Address::from(self.id.to_u32() | !self.mask.to_u32())
    }

    pub fn mask(&self) -> Ipv4Mask {
        self.mask
    }

    pub fn prefix_len(&self) -> u32 {
        self.mask.prefix_len()
    }

    pub fn contains(&self, address: Ipv4Address) -> bool {
        address.to_u32() & self.mask.to_u32() == self.id.to_u32()
    }
}

impl std::fmt::Debug for Ipv4Net {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ipv4Net {{{self}}}")
    }
}

impl std::fmt::Display for Ipv4Net {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.id, self.prefix_len())
    }
}

#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum CidrParseError {
    #[error("Failed to parse the address part of a CIDR string")]
    Ipv4,
    #[error("Failed to parse the prefix length of a CIDR string")]
    Mask(#[from] ParseIntError),
    #[error("Prefix length {0} is longer than 32 bits")]
    MaskLength(u32),
}

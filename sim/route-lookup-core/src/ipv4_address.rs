use std::{
    fmt::{self, Display},
    net::Ipv4Addr,
    str::FromStr,
};

/// An IPv4 address as seen by the forwarding table.
///
/// The table never looks at the address as anything other than a `u32`:
/// the top 24 bits pick a main-table bucket and the low 8 bits pick a slot
/// inside that bucket's aux block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Ipv4Address([u8; 4]);

impl Ipv4Address {
    /// The address `0.0.0.0`.
    pub const CURRENT_NETWORK: Self = Self([0u8, 0, 0, 0]);

    /// The address `255.255.255.255`.
    pub const BROADCAST: Self = Self([255u8, 255, 255, 255]);

    /// Creates a new address from its four octets, most significant first.
    pub const fn new(address: [u8; 4]) -> Self {
        Self(address)
    }

    /// Gets the address as a `u32`.
    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    /// Gets the address as a `[u8; 4]`.
    pub const fn to_bytes(self) -> [u8; 4] {
        self.0
    }

    /// The main-table bucket this address falls into (its top 24 bits).
    pub const fn bucket(self) -> usize {
        (self.to_u32() >> 8) as usize
    }

    /// The slot inside an aux block this address selects (its low 8 bits).
    pub const fn host_octet(self) -> usize {
        self.0[3] as usize
    }
}

impl Display for Ipv4Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.0;
        write!(f, "{}.{}.{}.{}", bytes[0], bytes[1], bytes[2], bytes[3])
    }
}

impl From<u32> for Ipv4Address {
    fn from(n: u32) -> Self {
        Self::from(n.to_be_bytes())
    }
}

impl From<[u8; 4]> for Ipv4Address {
    fn from(n: [u8; 4]) -> Self {
        Self(n)
    }
}

impl From<Ipv4Address> for u32 {
    fn from(address: Ipv4Address) -> Self {
        address.to_u32()
    }
}

impl From<Ipv4Address> for [u8; 4] {
    fn from(address: Ipv4Address) -> Self {
        address.0
    }
}

impl From<Ipv4Addr> for Ipv4Address {
    fn from(address: Ipv4Addr) -> Self {
        Self(address.octets())
    }
}

#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
#[error("'{0}' is not a dotted-quad IPv4 address")]
pub struct AddressParseError(pub String);

impl FromStr for Ipv4Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ipv4Addr::from_str(s)
            .map(Ipv4Address::from)
            .or(Err(AddressParseError(s.to_string())))
    }
}

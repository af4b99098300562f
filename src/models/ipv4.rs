//! IPv4 network and CIDR notation utilities.
//!
//! Provides [`Ipv4Net`] for representing normalized IPv4 networks, along with
//! the containment and overlap tests the reconciler is built on.

use crate::error::NetError;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Maximum length for an IPv4 prefix (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use combine_net::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, NetError> {
    if len > MAX_LENGTH {
        Err(NetError::parse(len.to_string(), "Network length is too long"))
    } else {
        let right_len = MAX_LENGTH - len;
        let all_bits = u32::MAX as u64;

        let mask = (all_bits >> right_len) << right_len;

        Ok(mask as u32)
    }
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, NetError> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4Addr::from(u32::from(addr) & mask))
}

/// Prefix length of a contiguous netmask such as `255.255.254.0`.
pub fn prefix_from_netmask(mask: Ipv4Addr) -> Option<u8> {
    let bits = u32::from(mask);
    if bits.leading_ones() + bits.trailing_zeros() == MAX_LENGTH as u32 {
        Some(bits.leading_ones() as u8)
    } else {
        None
    }
}

/// Prefix length of a contiguous hostmask such as `0.0.1.255`.
pub fn prefix_from_hostmask(mask: Ipv4Addr) -> Option<u8> {
    prefix_from_netmask(Ipv4Addr::from(!u32::from(mask)))
}

/// Parse a dotted-quad IPv4 address, rejecting IPv6 literals explicitly.
pub fn parse_addr(address: &str) -> Result<Ipv4Addr, NetError> {
    let address = address.trim();
    match Ipv4Addr::from_str(address) {
        Ok(addr) => Ok(addr),
        Err(_) if Ipv6Addr::from_str(address).is_ok() => {
            Err(NetError::UnsupportedAddressFamily(address.to_string()))
        }
        Err(_) => Err(NetError::parse(address, "invalid IPv4 address")),
    }
}

/// Parse either a dotted-quad netmask (or hostmask) or a prefix length.
pub fn parse_prefix(mask_or_prefix: &str) -> Result<u8, NetError> {
    let raw = mask_or_prefix.trim();
    if raw.contains('.') {
        let mask = Ipv4Addr::from_str(raw)
            .map_err(|_| NetError::parse(raw, "invalid netmask"))?;
        prefix_from_netmask(mask)
            .or_else(|| prefix_from_hostmask(mask))
            .ok_or_else(|| NetError::parse(raw, "non-contiguous netmask"))
    } else {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(NetError::parse(raw, "invalid prefix length"));
        }
        let len: u8 = raw
            .parse()
            .map_err(|_| NetError::parse(raw, "prefix length out of range"))?;
        if len > MAX_LENGTH {
            return Err(NetError::parse(raw, "Network length is too long"));
        }
        Ok(len)
    }
}

/// Parse an address plus netmask or prefix length into a normalized network.
///
/// Host bits are cleared silently, so `10.0.0.7` with `/24` yields
/// `10.0.0.0/24`.
pub fn parse(address: &str, mask_or_prefix: &str) -> Result<Ipv4Net, NetError> {
    let addr = parse_addr(address)?;
    let prefix = parse_prefix(mask_or_prefix)?;
    Ipv4Net::new(addr, prefix)
}

/// Normalized IPv4 network.
///
/// The address always has its host bits cleared. Ordering is by network
/// address, then by prefix length, so a wider network sorts before a
/// narrower one starting at the same address.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Ipv4Net {
    addr: Ipv4Addr,
    prefix: u8,
}

impl Serialize for Ipv4Net {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Ipv4Net {
    fn deserialize<D>(deserializer: D) -> Result<Ipv4Net, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv4Net::from_str(&s).map_err(de::Error::custom)
    }
}

impl Ipv4Net {
    /// Create a network, masking off any host bits.
    pub fn new(addr: Ipv4Addr, prefix: u8) -> Result<Ipv4Net, NetError> {
        Ok(Ipv4Net {
            addr: cut_addr(addr, prefix)?,
            prefix,
        })
    }

    /// A single-address `/32` network.
    pub fn host(addr: Ipv4Addr) -> Ipv4Net {
        Ipv4Net {
            addr,
            prefix: MAX_LENGTH,
        }
    }

    /// The prefix length (0-32).
    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// Get the lowest (network) address in the subnet.
    pub fn lo(&self) -> Ipv4Addr {
        self.addr
    }

    /// Get the highest (broadcast) address in the subnet.
    pub fn hi(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) | !self.mask_bits())
    }

    /// The dotted-quad netmask, e.g. `255.255.255.0` for a `/24`.
    pub fn netmask(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.mask_bits())
    }

    fn mask_bits(&self) -> u32 {
        // prefix is validated at construction
        get_cidr_mask(self.prefix).unwrap_or(u32::MAX)
    }

    /// True if the whole range of `self` lies inside `other`, equality included.
    pub fn is_subnet_of(&self, other: &Ipv4Net) -> bool {
        other.lo() <= self.lo() && self.hi() <= other.hi()
    }

    /// True if the two inclusive address ranges share at least one address.
    pub fn overlaps(&self, other: &Ipv4Net) -> bool {
        self.lo() <= other.hi() && other.lo() <= self.hi()
    }

    /// Membership test against an address of either family.
    ///
    /// An IPv6 address is a [`NetError::VersionMismatch`], not a `false`.
    pub fn contains_ip(&self, ip: IpAddr) -> Result<bool, NetError> {
        match ip {
            IpAddr::V4(v4) => Ok(self.lo() <= v4 && v4 <= self.hi()),
            IpAddr::V6(v6) => Err(NetError::VersionMismatch {
                a: self.to_string(),
                b: v6.to_string(),
            }),
        }
    }
}

impl FromStr for Ipv4Net {
    type Err = NetError;

    /// Parse `addr/prefix` or `addr/netmask`; a bare address is a `/32`.
    fn from_str(addr_cidr: &str) -> Result<Self, Self::Err> {
        let addr_cidr = addr_cidr.trim();
        match addr_cidr.split_once('/') {
            Some((addr, mask)) => parse(addr, mask),
            None => parse_addr(addr_cidr).map(Ipv4Net::host),
        }
    }
}

impl std::fmt::Display for Ipv4Net {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix)
    }
}

//! Raw address/mask pairs as scraped from text sources.

use super::ipv4::{parse, Ipv4Net};
use crate::error::NetError;

/// Netmask used for single hosts coming out of DNS or PAC proxy entries.
pub const HOST_NETMASK: &str = "255.255.255.255";

/// Transient `(address, mask)` pair, converted into an [`Ipv4Net`] on ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub address: String,
    /// Dotted-quad netmask or prefix length.
    pub mask: String,
}

impl RawRecord {
    pub fn new(address: impl Into<String>, mask: impl Into<String>) -> RawRecord {
        RawRecord {
            address: address.into(),
            mask: mask.into(),
        }
    }

    /// A `/32` record for a single host address.
    pub fn host(address: impl Into<String>) -> RawRecord {
        RawRecord::new(address, HOST_NETMASK)
    }

    /// Loopback (`127.*`) and unspecified (`0.0.0.0`) addresses are never routed.
    pub fn is_ignored(&self) -> bool {
        let address = self.address.trim();
        address.starts_with("127.") || address == "0.0.0.0"
    }

    pub fn to_network(&self) -> Result<Ipv4Net, NetError> {
        parse(&self.address, &self.mask)
    }
}

impl std::fmt::Display for RawRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}, {}", self.address, self.mask)
    }
}

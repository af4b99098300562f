//! Domain models for network combining.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Ipv4Net`] - normalized IPv4 network with containment and overlap tests
//! - [`NetworkSet`] - reconciled set of networks and [`InsertOutcome`]
//! - [`RawRecord`] - address/mask pair before parsing
//! - [`Diagnostics`] - messages returned alongside results

mod diagnostic;
mod ipv4;
mod network_set;
mod record;

// Re-export public types
pub use diagnostic::{Diagnostic, Diagnostics, Severity};
pub use ipv4::{
    cut_addr, get_cidr_mask, parse, parse_addr, parse_prefix,
    prefix_from_hostmask, prefix_from_netmask, Ipv4Net, MAX_LENGTH,
};
pub use network_set::{InsertOutcome, NetworkSet};
pub use record::{RawRecord, HOST_NETMASK};

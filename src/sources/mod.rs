//! Input sources for networks.
//!
//! - [`net_file`] - `address, netmask` list files
//! - [`pac`] - proxy auto-config scripts
//! - [`dns`] - hostname resolution for PAC entries

pub mod dns;
mod net_file;
mod pac;

// Re-export public types and functions
pub use dns::{Resolve, StaticResolver, SystemResolver};
pub use net_file::{ingest_net_text, parse_net_line, read_net_file};
pub use pac::{collect_pac_networks, parse_pac, parse_pac_line, PacDirective, PacDomain, PacScript};

//! Output formatting for network sets.
//!
//! This module handles formatting and outputting reconciled networks:
//! - [`net_file`] - `address, netmask` text files
//! - [`terminal`] - Terminal summary with colors

mod net_file;
mod terminal;

pub use net_file::{format_net_line, serialize, write_net_file};
pub use terminal::{format_field, print_summary, summary_lines};

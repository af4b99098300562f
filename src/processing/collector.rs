//! Accumulates networks from any text source.
//!
//! Loopback and unspecified addresses are dropped before parsing and lines
//! that fail to parse are skipped. Every skip leaves a diagnostic.

use crate::models::{Diagnostics, Ipv4Net, RawRecord};

/// Ordered buffer of parsed networks waiting to be reconciled.
#[derive(Debug, Default)]
pub struct NetworkCollector {
    networks: Vec<Ipv4Net>,
    diagnostics: Diagnostics,
}

impl NetworkCollector {
    pub fn new() -> NetworkCollector {
        NetworkCollector::default()
    }

    /// Parse and queue one address/mask pair.
    ///
    /// Returns the queued network, or `None` when the pair was filtered or
    /// failed to parse.
    pub fn add(
        &mut self,
        raw_address: &str,
        raw_mask: &str,
        source_label: &str,
    ) -> Option<Ipv4Net> {
        self.add_record(&RawRecord::new(raw_address, raw_mask), source_label)
    }

    pub fn add_record(&mut self, record: &RawRecord, source_label: &str) -> Option<Ipv4Net> {
        if record.is_ignored() {
            self.diagnostics
                .debug(source_label, format!("ignore address: {record}"));
            return None;
        }
        match record.to_network() {
            Ok(net) => {
                self.networks.push(net);
                Some(net)
            }
            // IPv6 noise is skipped like any other malformed line
            Err(e) => {
                self.diagnostics
                    .warn(source_label, format!("{e}, skipped '{record}'"));
                None
            }
        }
    }

    /// Record a debug trace for a line that carried no address at all.
    pub fn note_ignored_line(&mut self, source_label: &str, line_no: usize, line: &str) {
        self.diagnostics
            .debug(source_label, format!("ignore text line {line_no}: {line}"));
    }

    /// Number of queued networks.
    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    /// Take every queued network in arrival order, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<Ipv4Net> {
        std::mem::take(&mut self.networks)
    }

    /// Shared diagnostics channel for sources feeding this collector.
    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    /// Take the diagnostics recorded so far.
    pub fn take_diagnostics(&mut self) -> Diagnostics {
        std::mem::take(&mut self.diagnostics)
    }
}

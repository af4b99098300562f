//! Reading `address, netmask` network list files.

use crate::models::RawRecord;
use crate::processing::NetworkCollector;
use lazy_static::lazy_static;
use regex::Regex;
use std::error::Error;
use std::path::Path;

lazy_static! {
    static ref NET_LINE: Regex = Regex::new(r"^\s*(\d+\.\d+\.\d+\.\d+),\s*(\d+\.\d+\.\d+\.\d+)")
        .expect("Invalid Regex?");
}

/// Extract the address/netmask pair from one line, if it has that shape.
pub fn parse_net_line(line: &str) -> Option<RawRecord> {
    NET_LINE
        .captures(line)
        .map(|caps| RawRecord::new(&caps[1], &caps[2]))
}

/// Feed every matching line of `text` to the collector.
///
/// Returns the number of networks queued.
pub fn ingest_net_text(collector: &mut NetworkCollector, text: &str, source: &str) -> usize {
    let mut added = 0;
    for (index, line) in text.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        match parse_net_line(line) {
            Some(record) => {
                let label = format!("{source} line {}", index + 1);
                if collector.add_record(&record, &label).is_some() {
                    added += 1;
                }
            }
            None => collector.note_ignored_line(source, index + 1, line),
        }
    }
    added
}

/// Read a network list file into the collector.
pub fn read_net_file(
    collector: &mut NetworkCollector,
    path: &str,
) -> Result<usize, Box<dyn Error>> {
    if !Path::new(path).exists() {
        return Err(format!("Network file does not exist: {path}").into());
    }
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Error reading network file {path}: {e}"))?;
    let added = ingest_net_text(collector, &text, path);
    log::info!("Read {added} networks from {path}");
    Ok(added)
}

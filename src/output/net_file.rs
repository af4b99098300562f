//! `address, netmask` output, the same shape the net file reader accepts.

use crate::models::{Ipv4Net, NetworkSet};
use std::error::Error;

/// Render one network as `network, netmask`.
pub fn format_net_line(net: &Ipv4Net) -> String {
    format!("{}, {}", net.lo(), net.netmask())
}

/// One newline-terminated line per network, in sorted order.
pub fn serialize(set: &NetworkSet) -> Vec<String> {
    set.sorted()
        .iter()
        .map(|n| format!("{}\n", format_net_line(n)))
        .collect()
}

/// Write the set to `path` as ASCII text.
pub fn write_net_file(path: &str, set: &NetworkSet) -> Result<(), Box<dyn Error>> {
    let text: String = serialize(set).concat();
    if !text.is_ascii() {
        return Err(format!("Refusing to write non-ASCII output to {path}").into());
    }
    std::fs::write(path, text).map_err(|e| format!("Error writing network file {path}: {e}"))?;
    log::info!("Wrote {} networks to {path}", set.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::reconcile_pass;

    #[test]
    fn test_serialize_sorted() {
        let nets: Vec<Ipv4Net> = ["192.168.1.0/24", "10.0.0.0/8", "10.200.0.7/32"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        let set = reconcile_pass(&nets).set;
        assert_eq!(
            serialize(&set),
            vec![
                "10.0.0.0, 255.0.0.0\n",
                "192.168.1.0, 255.255.255.0\n",
            ]
        );
    }

    #[test]
    fn test_write_net_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.network");
        let path = path.to_str().unwrap();
        let net: Ipv4Net = "172.16.0.0/12".parse().unwrap();
        let set = reconcile_pass(&[net]).set;
        write_net_file(path, &set).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "172.16.0.0, 255.240.0.0\n");
    }
}

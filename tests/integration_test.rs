//! Integration tests for combine-net
//!
//! These tests run the PAC and combine stages against the fixture files.

use combine_net::config::Settings;
use combine_net::models::{Ipv4Net, Severity};
use combine_net::output::{serialize, write_net_file};
use combine_net::processing::{reconcile_to_fixpoint, NetworkCollector};
use combine_net::sources::{ingest_net_text, StaticResolver};
use combine_net::{combine_net_files, extract_pac_networks};
use std::net::Ipv4Addr;

const TEST_DATA: &str = "src/tests/test_data";

fn fixture(name: &str) -> String {
    format!("{TEST_DATA}/{name}")
}

fn nets(cidrs: &[&str]) -> Vec<Ipv4Net> {
    cidrs.iter().map(|c| c.parse().unwrap()).collect()
}

fn corp_resolver() -> StaticResolver {
    StaticResolver::new()
        .with("wiki.corp.example", &[Ipv4Addr::new(172, 31, 0, 1)])
        .with("build.corp.example", &[Ipv4Addr::new(192, 168, 20, 5)])
        .with("proxy.corp.example", &[Ipv4Addr::new(10, 9, 9, 10)])
}

#[tokio::test]
async fn test_pac_stage() {
    let result = extract_pac_networks(&fixture("sample.pac"), &corp_resolver(), 4)
        .await
        .expect("Failed to extract PAC networks");

    assert!(result.converged);
    assert_eq!(result.passes, 2);
    assert_eq!(
        result.sorted(),
        nets(&["10.9.9.9/32", "10.9.9.10/32", "172.31.0.1/32", "192.168.0.0/16"])
    );

    // serialized output matches the checked-in pacnet fixture
    let expected = std::fs::read_to_string(fixture("pacnet.txt")).unwrap();
    assert_eq!(serialize(&result.set).concat(), expected);

    // unresolvable name is a warning, not a failure
    assert!(result
        .diagnostics
        .iter()
        .any(|d| d.severity == Severity::Warning && d.message.contains("gone.corp.example")));
}

#[tokio::test]
async fn test_pac_stage_rejects_unknown_direct() {
    let err = extract_pac_networks(&fixture("bad.pac"), &corp_resolver(), 4)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("line 3 unknown format which return DIRECT"));
}

#[test]
fn test_combine_stage() {
    let files = vec![fixture("pacnet.txt"), fixture("intranet.txt")];
    let result = combine_net_files(&files, 4).expect("Failed to combine network files");

    assert!(result.converged);
    assert_eq!(
        result.sorted(),
        nets(&["10.0.0.0/8", "100.64.3.0/24", "172.16.0.0/12", "192.168.0.0/16"])
    );
    assert!(result
        .diagnostics
        .iter()
        .any(|d| d.severity == Severity::Warning && d.message.contains("10.1.1.1, 255.0.255.0")));
}

#[test]
fn test_combine_stage_missing_file() {
    let files = vec![fixture("intranet.txt"), fixture("missing.txt")];
    assert!(combine_net_files(&files, 4).is_err());
}

#[test]
fn test_output_round_trip() {
    let result = combine_net_files(&[fixture("intranet.txt")], 4).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("intranet.network");
    let path = path.to_str().unwrap();
    write_net_file(path, &result.set).unwrap();

    let again = combine_net_files(&[path.to_string()], 4).unwrap();
    assert_eq!(again.sorted(), result.sorted());
    assert_eq!(again.passes, 1, "a fixpoint set needs no further changes");
}

#[test]
fn test_serialized_order_is_non_decreasing() {
    let text = std::fs::read_to_string(fixture("intranet.txt")).unwrap();
    let mut collector = NetworkCollector::new();
    ingest_net_text(&mut collector, &text, "intranet.txt");
    let result = reconcile_to_fixpoint(collector.drain(), 4);
    let lines = serialize(&result.set);

    let addrs: Vec<u32> = lines
        .iter()
        .map(|l| u32::from(l.split(',').next().unwrap().parse::<Ipv4Addr>().unwrap()))
        .collect();
    assert!(addrs.windows(2).all(|w| w[0] <= w[1]), "{lines:?}");
    assert!(lines.iter().all(|l| !l.starts_with("127.") && !l.starts_with("0.0.0.0")));
}

#[test]
fn test_settings_fixture_points_at_fixtures() {
    let settings = Settings::read(&fixture("combine_net.json")).unwrap();
    for file in &settings.net_files {
        assert!(std::path::Path::new(file).exists(), "missing {file}");
    }
}

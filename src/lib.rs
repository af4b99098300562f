//! Combine IPv4 networks from PAC scripts and network list files into a
//! minimal, sorted list of non-redundant CIDR blocks.

pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;
pub mod sources;

use config::Settings;
use processing::{reconcile_to_fixpoint, NetworkCollector, Reconciled};
use sources::{collect_pac_networks, parse_pac, read_net_file, Resolve, SystemResolver};
use std::error::Error;
use std::time::Duration;

fn finish(mut collector: NetworkCollector, max_passes: usize) -> Reconciled {
    let mut result = reconcile_to_fixpoint(collector.drain(), max_passes);
    let mut diagnostics = collector.take_diagnostics();
    diagnostics.extend(result.diagnostics);
    result.diagnostics = diagnostics;
    result
}

/// Extract and reconcile the networks a PAC script routes `DIRECT` or via proxy.
pub async fn extract_pac_networks<R: Resolve>(
    pac_file: &str,
    resolver: &R,
    max_passes: usize,
) -> Result<Reconciled, Box<dyn Error>> {
    let text = std::fs::read_to_string(pac_file)
        .map_err(|e| format!("Error reading PAC file {pac_file}: {e}"))?;
    let script = parse_pac(&text).map_err(|e| format!("{pac_file}: {e}"))?;
    log::info!(
        "PAC {pac_file}: {} nets, {} domains, {} proxies",
        script.nets.len(),
        script.domains.len(),
        script.proxies.len()
    );

    let mut collector = NetworkCollector::new();
    collect_pac_networks(&script, resolver, &mut collector, pac_file)
        .await
        .map_err(|e| format!("{pac_file}: {e}"))?;
    Ok(finish(collector, max_passes))
}

/// Read every network file in order and reconcile the union.
pub fn combine_net_files(paths: &[String], max_passes: usize) -> Result<Reconciled, Box<dyn Error>> {
    let mut collector = NetworkCollector::new();
    for path in paths {
        read_net_file(&mut collector, path)?;
    }
    Ok(finish(collector, max_passes))
}

/// Run the PAC stage (when configured) and the combine stage, writing both outputs.
pub async fn run(settings: &Settings) -> Result<Reconciled, Box<dyn Error>> {
    if let Some(pac_file) = &settings.pac_file {
        let resolver = SystemResolver::new(Duration::from_millis(settings.dns_timeout_ms));
        let pac = extract_pac_networks(pac_file, &resolver, settings.max_passes).await?;
        pac.diagnostics.log_all();
        output::write_net_file(&settings.pac_output, &pac.set)?;
        output::print_summary("pac", &pac);
    }

    let combined = combine_net_files(&settings.net_files, settings.max_passes)?;
    combined.diagnostics.log_all();
    output::write_net_file(&settings.output, &combined.set)?;
    output::print_summary("combined", &combined);
    Ok(combined)
}

//! Hostname resolution for PAC hosts and proxies.
//!
//! Each resolved IPv4 address becomes a `/32` record. A failed lookup is
//! reported and does not stop the remaining names.

use crate::models::RawRecord;
use crate::processing::NetworkCollector;
use itertools::Itertools;
use std::collections::HashMap;
use std::error::Error;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

pub type ResolveError = Box<dyn Error + Send + Sync>;

/// Something that turns a hostname into IPv4 addresses.
#[allow(async_fn_in_trait)]
pub trait Resolve {
    async fn resolve_v4(&self, name: &str) -> Result<Vec<Ipv4Addr>, ResolveError>;
}

/// Resolver backed by the operating system, bounded by a timeout.
#[derive(Debug, Clone)]
pub struct SystemResolver {
    timeout: Duration,
}

impl SystemResolver {
    pub fn new(timeout: Duration) -> SystemResolver {
        SystemResolver { timeout }
    }
}

impl Resolve for SystemResolver {
    async fn resolve_v4(&self, name: &str) -> Result<Vec<Ipv4Addr>, ResolveError> {
        let lookup = tokio::net::lookup_host((name, 0));
        let addrs = tokio::time::timeout(self.timeout, lookup)
            .await
            .map_err(|_| format!("lookup timed out after {:?}", self.timeout))??;
        // A records only
        Ok(addrs
            .filter_map(|a| match a {
                SocketAddr::V4(v4) => Some(*v4.ip()),
                SocketAddr::V6(_) => None,
            })
            .unique()
            .collect())
    }
}

/// Fixed name table, for tests and offline runs.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    names: HashMap<String, Vec<Ipv4Addr>>,
}

impl StaticResolver {
    pub fn new() -> StaticResolver {
        StaticResolver::default()
    }

    pub fn with(mut self, name: &str, addrs: &[Ipv4Addr]) -> StaticResolver {
        self.names.insert(name.to_string(), addrs.to_vec());
        self
    }
}

impl Resolve for StaticResolver {
    async fn resolve_v4(&self, name: &str) -> Result<Vec<Ipv4Addr>, ResolveError> {
        self.names
            .get(name)
            .cloned()
            .ok_or_else(|| format!("The DNS query name does not exist: {name}").into())
    }
}

/// Resolve `name` and queue each address as a host route.
///
/// Returns the number of networks queued; lookup failures return 0.
pub async fn resolve_into<R: Resolve>(
    resolver: &R,
    name: &str,
    collector: &mut NetworkCollector,
    source: &str,
) -> usize {
    match resolver.resolve_v4(name).await {
        Ok(addrs) => {
            collector.diagnostics_mut().debug(
                source,
                format!("{name}: {}", addrs.iter().map(|a| a.to_string()).join(" ")),
            );
            addrs
                .iter()
                .filter_map(|a| collector.add_record(&RawRecord::host(a.to_string()), source))
                .count()
        }
        Err(e) => {
            collector
                .diagnostics_mut()
                .warn(source, format!("Error for {name}: {e}"));
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;

    #[tokio::test]
    async fn test_static_resolver() {
        let resolver = StaticResolver::new().with("intranet.corp", &[Ipv4Addr::new(10, 1, 1, 1)]);
        assert_eq!(
            resolver.resolve_v4("intranet.corp").await.unwrap(),
            vec![Ipv4Addr::new(10, 1, 1, 1)]
        );
        assert!(resolver.resolve_v4("missing.corp").await.is_err());
    }

    #[tokio::test]
    async fn test_resolve_into_continues_after_failure() {
        let resolver = StaticResolver::new().with(
            "wiki.corp",
            &[Ipv4Addr::new(10, 2, 0, 5), Ipv4Addr::new(127, 0, 0, 1)],
        );
        let mut collector = NetworkCollector::new();
        assert_eq!(resolve_into(&resolver, "gone.corp", &mut collector, "pac").await, 0);
        assert_eq!(resolve_into(&resolver, "wiki.corp", &mut collector, "pac").await, 1);
        assert_eq!(collector.drain()[0].to_string(), "10.2.0.5/32");

        let diags = collector.take_diagnostics();
        assert_eq!(diags.count(Severity::Warning), 1);
        assert!(diags.iter().any(|d| d.message == "wiki.corp: 10.2.0.5 127.0.0.1"));
    }

    #[tokio::test]
    async fn test_system_resolver_address_literal() {
        let resolver = SystemResolver::new(Duration::from_secs(5));
        // literals resolve without a nameserver
        let addrs = resolver.resolve_v4("10.9.9.9").await.unwrap();
        assert_eq!(addrs, vec![Ipv4Addr::new(10, 9, 9, 9)]);

        let addrs = resolver.resolve_v4("::1").await.unwrap();
        assert!(addrs.is_empty());
    }
}

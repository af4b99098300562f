//! Proxy auto-config (PAC) script extraction.
//!
//! Only `return` statements matter. A `DIRECT` return must be guarded by a
//! `dnsDomainIs` or `isInNet` condition, a `PROXY` return names the proxy host.
//! Anything else is an error: a routing rule we do not understand must not be
//! dropped from the route list.

use super::dns::{resolve_into, Resolve};
use crate::error::NetError;
use crate::models::{parse_addr, RawRecord};
use crate::processing::NetworkCollector;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref COMMENT: Regex = Regex::new(r"^\s*//").expect("Invalid Regex?");
    static ref RETURN: Regex = Regex::new(r"return\s+(.+)$").expect("Invalid Regex?");
    static ref DIRECT: Regex = Regex::new(r#""DIRECT"\s*;"#).expect("Invalid Regex?");
    static ref DNS_DOMAIN_IS: Regex =
        Regex::new(r#"dnsDomainIs\(.+,\s+"([^"]+)"\)"#).expect("Invalid Regex?");
    static ref IS_IN_NET: Regex =
        Regex::new(r#"isInNet\(.+,\s+"([^"]+)",\s+"([^"]+)"\)"#).expect("Invalid Regex?");
    static ref PROXY: Regex =
        Regex::new(r#"^PROXY\s+([^\s:;"]+):(\d+)$"#).expect("Invalid Regex?");
}

/// A `DIRECT` domain from `dnsDomainIs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacDomain {
    /// Name to resolve, leading dot removed.
    pub name: String,
    /// The PAC name started with a dot and matches every host below it.
    pub wildcard: bool,
}

impl PacDomain {
    fn new(raw: &str) -> PacDomain {
        match raw.strip_prefix('.') {
            Some(rest) => PacDomain {
                name: rest.to_string(),
                wildcard: true,
            },
            None => PacDomain {
                name: raw.to_string(),
                wildcard: false,
            },
        }
    }
}

/// One routing fact taken from a PAC line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PacDirective {
    /// `dnsDomainIs(host, "name")`.
    DomainSuffix(PacDomain),
    /// `isInNet(host, "address", "mask")`.
    Net(RawRecord),
    /// `"PROXY host:port"`.
    Proxy { host: String, port: u16 },
}

/// Everything routable found in a PAC script, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PacScript {
    pub domains: Vec<PacDomain>,
    pub nets: Vec<RawRecord>,
    /// Distinct proxy hosts with the first port seen for each.
    pub proxies: Vec<(String, u16)>,
}

impl PacScript {
    fn push(&mut self, directive: PacDirective) {
        match directive {
            PacDirective::DomainSuffix(domain) => self.domains.push(domain),
            PacDirective::Net(record) => self.nets.push(record),
            PacDirective::Proxy { host, port } => {
                if !self.proxies.iter().any(|(h, _)| *h == host) {
                    self.proxies.push((host, port));
                }
            }
        }
    }
}

fn unrecognized(line: usize, reason: &str, text: &str) -> NetError {
    NetError::UnrecognizedDirective {
        line,
        reason: reason.to_string(),
        text: text.to_string(),
    }
}

/// Parse one PAC line; `line_no` is 1-based and only used in errors.
///
/// Lines without a `return` statement yield no directives.
pub fn parse_pac_line(line_no: usize, line: &str) -> Result<Vec<PacDirective>, NetError> {
    if COMMENT.is_match(line) {
        return Ok(Vec::new());
    }
    let returned = match RETURN.captures(line) {
        Some(caps) => caps[1].trim().to_string(),
        None => return Ok(Vec::new()),
    };
    if !returned.ends_with(';') {
        return Err(unrecognized(line_no, "not end with ';'", line));
    }

    if DIRECT.is_match(&returned) {
        if let Some(caps) = DNS_DOMAIN_IS.captures(line) {
            return Ok(vec![PacDirective::DomainSuffix(PacDomain::new(&caps[1]))]);
        }
        if let Some(caps) = IS_IN_NET.captures(line) {
            return Ok(vec![PacDirective::Net(RawRecord::new(&caps[1], &caps[2]))]);
        }
        return Err(unrecognized(line_no, "unknown format which return DIRECT", line));
    }

    // every element of the returned string must be a proxy
    let quoted = returned.trim_end_matches(';').trim();
    let elements = quoted
        .strip_prefix('"')
        .and_then(|q| q.strip_suffix('"'))
        .ok_or_else(|| unrecognized(line_no, "unknown return statement", line))?;
    let mut proxies = Vec::new();
    for element in elements.split(';').map(str::trim).filter(|e| !e.is_empty()) {
        let caps = PROXY
            .captures(element)
            .ok_or_else(|| unrecognized(line_no, "unknown return statement", line))?;
        let port = caps[2]
            .parse::<u16>()
            .map_err(|_| unrecognized(line_no, "invalid proxy port", line))?;
        proxies.push(PacDirective::Proxy {
            host: caps[1].to_string(),
            port,
        });
    }
    if proxies.is_empty() {
        return Err(unrecognized(line_no, "unknown return statement", line));
    }
    Ok(proxies)
}

/// Parse a whole PAC script, stopping at the first unrecognized statement.
pub fn parse_pac(text: &str) -> Result<PacScript, NetError> {
    let mut script = PacScript::default();
    for (index, line) in text.lines().enumerate() {
        for directive in parse_pac_line(index + 1, line)? {
            script.push(directive);
        }
    }
    Ok(script)
}

/// Turn a parsed script into queued networks.
///
/// Nets go in first, then proxies, then domains. IPv4 proxy literals are
/// host routes; IPv6 proxy literals halt with
/// [`NetError::UnsupportedAddressFamily`]; other proxy names are resolved.
pub async fn collect_pac_networks<R: Resolve>(
    script: &PacScript,
    resolver: &R,
    collector: &mut NetworkCollector,
    source: &str,
) -> Result<(), NetError> {
    for record in &script.nets {
        collector.add_record(record, source);
    }

    for (host, _port) in &script.proxies {
        match parse_addr(host) {
            Ok(_) => {
                collector.add_record(&RawRecord::host(host.as_str()), source);
            }
            Err(e @ NetError::UnsupportedAddressFamily(_)) => return Err(e),
            Err(_) => {
                resolve_into(resolver, host, collector, source).await;
            }
        }
    }

    for domain in &script.domains {
        if domain.wildcard {
            collector.diagnostics_mut().info(
                source,
                format!("*.{}: only the domain itself is resolved", domain.name),
            );
        }
        resolve_into(resolver, &domain.name, collector, source).await;
    }
    Ok(())
}

//! Target specification types with CIDR and hostname support.
//!
//! Supports:
//! - Single IP addresses (IPv4 and IPv6)
//! - CIDR notation (192.168.1.0/24)
//! - Hostnames (example.com)

use ipnetwork::IpNetwork;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;
use tracing::warn;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

use crate::error::InputError;

/// A single host to scan.
///
/// Carries the original user input alongside the resolved address. A
/// hostname that could not be resolved up front is kept unresolved and each
/// probe resolves it on connect, so a dead name degrades to an empty scan
/// instead of an error.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScanTarget {
    original: String,
    addr: Option<IpAddr>,
}

impl ScanTarget {
    /// Target for a literal IP address.
    pub fn from_ip(ip: IpAddr) -> Self {
        Self {
            original: ip.to_string(),
            addr: Some(ip),
        }
    }

    /// Target for a hostname resolved to `ip`.
    pub fn resolved(original: impl Into<String>, ip: IpAddr) -> Self {
        Self {
            original: original.into(),
            addr: Some(ip),
        }
    }

    /// Target for a hostname that each probe resolves on connect.
    pub fn named(original: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            addr: None,
        }
    }

    /// The host identifier as the user supplied it.
    pub fn host(&self) -> &str {
        &self.original
    }

    /// The resolved address, if resolution has happened.
    pub fn addr(&self) -> Option<IpAddr> {
        self.addr
    }
}

impl fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.addr {
            Some(ip) if self.original != ip.to_string() => {
                write!(f, "{} ({})", self.original, ip)
            }
            _ => write!(f, "{}", self.original),
        }
    }
}

/// A parsed target specification.
///
/// A target string containing `/` is a subnet; anything else is a single
/// host, either a literal IP or a resolvable name.
#[derive(Debug, Clone)]
pub enum TargetSpec {
    /// A single IP address.
    Single(IpAddr),
    /// A CIDR network range.
    Cidr(IpNetwork),
    /// A hostname to be resolved.
    Hostname(String),
}

impl TargetSpec {
    /// Maximum number of addresses allowed in a CIDR range.
    pub const MAX_CIDR_HOSTS: u128 = 65536; // /16 for IPv4

    /// Parse a target specification from a string.
    pub fn parse(s: &str) -> Result<Self, InputError> {
        let s = s.trim();

        if let Ok(ip) = s.parse::<IpAddr>() {
            return Ok(Self::Single(ip));
        }

        if s.contains('/') {
            let network: IpNetwork = s
                .parse()
                .map_err(|_| InputError::InvalidCidr(s.to_string()))?;

            let host_count = address_count(&network);
            if host_count > Self::MAX_CIDR_HOSTS {
                return Err(InputError::CidrTooLarge(host_count, Self::MAX_CIDR_HOSTS));
            }

            return Ok(Self::Cidr(network));
        }

        if is_valid_hostname(s) {
            return Ok(Self::Hostname(s.to_string()));
        }

        Err(InputError::InvalidTarget(s.to_string()))
    }

    /// Resolve this specification to a list of scan targets.
    ///
    /// CIDR ranges expand to their usable host addresses. Hostname
    /// resolution failure is not fatal: the name is carried unresolved and
    /// every probe against it will fail individually, yielding an empty
    /// result for that host.
    pub async fn resolve(&self) -> Vec<ScanTarget> {
        match self {
            Self::Single(ip) => vec![ScanTarget::from_ip(*ip)],

            Self::Cidr(network) => usable_hosts(network)
                .into_iter()
                .map(ScanTarget::from_ip)
                .collect(),

            Self::Hostname(hostname) => {
                let resolver =
                    TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default());

                match resolver.lookup_ip(hostname.as_str()).await {
                    Ok(response) => match response.iter().next() {
                        Some(ip) => vec![ScanTarget::resolved(hostname.clone(), ip)],
                        None => {
                            warn!(host = %hostname, "no addresses found, resolving per probe");
                            vec![ScanTarget::named(hostname.clone())]
                        }
                    },
                    Err(e) => {
                        warn!(host = %hostname, error = %e, "resolution failed, resolving per probe");
                        vec![ScanTarget::named(hostname.clone())]
                    }
                }
            }
        }
    }
}

impl FromStr for TargetSpec {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(ip) => write!(f, "{}", ip),
            Self::Cidr(network) => write!(f, "{}", network),
            Self::Hostname(hostname) => write!(f, "{}", hostname),
        }
    }
}

/// Enumerate the addresses of `network` that identify hosts.
///
/// IPv4 network and broadcast identifiers are excluded for prefixes shorter
/// than /31; /31 and /32 ranges keep every address.
pub fn usable_hosts(network: &IpNetwork) -> Vec<IpAddr> {
    network
        .iter()
        .filter(|ip| {
            if let (IpNetwork::V4(net), IpAddr::V4(addr)) = (network, ip) {
                if net.prefix() < 31 {
                    return *addr != net.network() && *addr != net.broadcast();
                }
            }
            true
        })
        .collect()
}

fn address_count(network: &IpNetwork) -> u128 {
    match network {
        IpNetwork::V4(net) => net.size() as u128,
        IpNetwork::V6(net) => {
            let prefix = net.prefix() as u32;
            if prefix >= 128 {
                1
            } else {
                1u128 << (128 - prefix)
            }
        }
    }
}

/// Check if a string is a valid hostname.
fn is_valid_hostname(s: &str) -> bool {
    if s.is_empty() || s.len() > 253 {
        return false;
    }

    // Each label must be 1-63 chars, alphanumeric plus interior hyphens.
    for label in s.split('.') {
        if label.is_empty() || label.len() > 63 {
            return false;
        }
        if !label.chars().next().map_or(false, |c| c.is_alphanumeric()) {
            return false;
        }
        if !label.chars().last().map_or(false, |c| c.is_alphanumeric()) {
            return false;
        }
        if !label.chars().all(|c| c.is_alphanumeric() || c == '-') {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_parse_ipv4() {
        let spec = TargetSpec::parse("192.168.1.1").unwrap();
        assert!(matches!(spec, TargetSpec::Single(IpAddr::V4(_))));
    }

    #[test]
    fn test_parse_ipv6() {
        let spec = TargetSpec::parse("::1").unwrap();
        assert!(matches!(spec, TargetSpec::Single(IpAddr::V6(_))));
    }

    #[test]
    fn test_parse_cidr() {
        let spec = TargetSpec::parse("192.168.1.0/24").unwrap();
        if let TargetSpec::Cidr(network) = spec {
            assert_eq!(network.prefix(), 24);
        } else {
            panic!("expected CIDR");
        }
    }

    #[test]
    fn test_slash_means_subnet() {
        // Anything with a slash must parse as CIDR or fail, never fall
        // through to hostname handling.
        let err = TargetSpec::parse("not-a-network/33").unwrap_err();
        assert!(matches!(err, InputError::InvalidCidr(_)));
    }

    #[test]
    fn test_parse_hostname() {
        let spec = TargetSpec::parse("example.com").unwrap();
        assert!(matches!(spec, TargetSpec::Hostname(_)));
    }

    #[test]
    fn test_cidr_too_large() {
        let err = TargetSpec::parse("10.0.0.0/8").unwrap_err();
        assert!(matches!(err, InputError::CidrTooLarge(_, _)));
    }

    #[test]
    fn test_usable_hosts_slash_30() {
        let network: IpNetwork = "203.0.113.0/30".parse().unwrap();
        let hosts = usable_hosts(&network);
        assert_eq!(
            hosts,
            vec![
                IpAddr::V4(Ipv4Addr::new(203, 0, 113, 1)),
                IpAddr::V4(Ipv4Addr::new(203, 0, 113, 2)),
            ]
        );
    }

    #[test]
    fn test_usable_hosts_point_to_point() {
        // /31 and /32 keep every address.
        let network: IpNetwork = "203.0.113.0/31".parse().unwrap();
        assert_eq!(usable_hosts(&network).len(), 2);

        let network: IpNetwork = "203.0.113.5/32".parse().unwrap();
        assert_eq!(
            usable_hosts(&network),
            vec![IpAddr::V4(Ipv4Addr::new(203, 0, 113, 5))]
        );
    }

    #[test]
    fn test_valid_hostname() {
        assert!(is_valid_hostname("example.com"));
        assert!(is_valid_hostname("sub.example.com"));
        assert!(is_valid_hostname("my-server"));
        assert!(!is_valid_hostname(""));
        assert!(!is_valid_hostname("-invalid.com"));
    }

    #[test]
    fn test_target_display() {
        let ip = ScanTarget::from_ip("203.0.113.5".parse().unwrap());
        assert_eq!(ip.to_string(), "203.0.113.5");

        let named = ScanTarget::resolved("example.com", "203.0.113.5".parse().unwrap());
        assert_eq!(named.to_string(), "example.com (203.0.113.5)");
    }

    #[tokio::test]
    async fn test_resolve_single() {
        let spec = TargetSpec::parse("203.0.113.5").unwrap();
        let targets = spec.resolve().await;
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].host(), "203.0.113.5");
        assert!(targets[0].addr().is_some());
    }

    #[tokio::test]
    async fn test_resolve_cidr_expands() {
        let spec = TargetSpec::parse("203.0.113.0/29").unwrap();
        let targets = spec.resolve().await;
        // 8 addresses minus network and broadcast
        assert_eq!(targets.len(), 6);
        assert_eq!(targets[0].host(), "203.0.113.1");
    }
}

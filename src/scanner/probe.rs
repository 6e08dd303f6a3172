//! Single-port TCP reachability probing.
//!
//! A probe attempts one TCP connection to `(host, port)` within a bounded
//! time and classifies the outcome as open or not open. Every transport
//! failure collapses uniformly into "not open"; the distinction between
//! failure causes exists only as trace-level diagnostics.

use async_trait::async_trait;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{lookup_host, TcpStream};
use tokio::time::timeout;
use tracing::trace;

use crate::report::PortResult;
use crate::types::ScanTarget;

/// Reachability classification of a single `(host, port)` pair.
///
/// Implementations must never fail: any error is folded into a closed
/// result. This keeps the scheduling engine free of per-port error paths
/// and makes the seam easy to stub in tests.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, target: &ScanTarget, port: u16) -> PortResult;
}

/// Why a connection attempt did not produce an open port.
///
/// Diagnostic only; never escapes the probe.
#[derive(Debug)]
enum ProbeFailure {
    Timeout,
    Refused,
    HostUnreachable,
    NetworkUnreachable,
    Resolution(io::Error),
    NoAddresses,
    Other(io::Error),
}

impl ProbeFailure {
    fn classify(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::ConnectionRefused => Self::Refused,
            io::ErrorKind::HostUnreachable => Self::HostUnreachable,
            io::ErrorKind::NetworkUnreachable => Self::NetworkUnreachable,
            io::ErrorKind::TimedOut => Self::Timeout,
            _ => Self::Other(err),
        }
    }
}

/// Real TCP connect probe.
///
/// Uses the operating system's connect path via tokio, bounded by the
/// configured timeout. The stream is dropped the moment the handshake
/// completes, so no probe holds a socket beyond its own scope on any exit
/// path.
pub struct TcpProbe {
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    async fn attempt(target: &ScanTarget, port: u16) -> Result<TcpStream, ProbeFailure> {
        match target.addr() {
            Some(ip) => TcpStream::connect(SocketAddr::new(ip, port))
                .await
                .map_err(ProbeFailure::classify),
            None => {
                // Unresolved name: resolve on every probe, the way a plain
                // connect-by-name would.
                let mut addrs = lookup_host((target.host(), port))
                    .await
                    .map_err(ProbeFailure::Resolution)?;
                let addr = addrs.next().ok_or(ProbeFailure::NoAddresses)?;
                TcpStream::connect(addr).await.map_err(ProbeFailure::classify)
            }
        }
    }
}

#[async_trait]
impl Probe for TcpProbe {
    async fn probe(&self, target: &ScanTarget, port: u16) -> PortResult {
        match timeout(self.timeout, Self::attempt(target, port)).await {
            Ok(Ok(stream)) => {
                // Reachability is all we want; close immediately.
                drop(stream);
                PortResult::open(port)
            }
            Ok(Err(failure)) => {
                trace!(host = target.host(), port, ?failure, "probe failed");
                PortResult::closed(port)
            }
            Err(_) => {
                trace!(host = target.host(), port, "probe timed out");
                PortResult::closed(port)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_open_port_detected() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let probe = TcpProbe::new(Duration::from_secs(1));
        let target = ScanTarget::from_ip(addr.ip());
        let result = probe.probe(&target, addr.port()).await;

        assert!(result.open);
        assert_eq!(result.port, addr.port());
        drop(listener);
    }

    #[tokio::test]
    async fn test_closed_port_detected() {
        // Bind and drop to find a port that is very likely closed.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let probe = TcpProbe::new(Duration::from_millis(250));
        let target = ScanTarget::from_ip(addr.ip());
        let result = probe.probe(&target, addr.port()).await;

        assert!(!result.open);
    }

    #[tokio::test]
    async fn test_unroutable_host_times_out_quietly() {
        let probe = TcpProbe::new(Duration::from_millis(100));
        let target = ScanTarget::from_ip(IpAddr::V4(Ipv4Addr::new(203, 0, 113, 1)));

        let start = std::time::Instant::now();
        let result = probe.probe(&target, 80).await;

        assert!(!result.open);
        // Bounded by the timeout, with scheduling slack.
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_unresolvable_name_is_closed() {
        let probe = TcpProbe::new(Duration::from_millis(500));
        let target = ScanTarget::named("host.invalid");
        let result = probe.probe(&target, 80).await;

        assert!(!result.open);
    }
}

//! Sequential subnet sweeps.

use ipnetwork::IpNetwork;
use tracing::debug;

use super::HostScanner;
use crate::report::ScanReport;
use crate::types::{usable_hosts, PortRange, ScanTarget};

/// Scans every usable host of a network, one host at a time.
///
/// Hosts are visited strictly sequentially; the per-host worker pool is the
/// only source of concurrency, which keeps the number of outbound
/// connection attempts bounded by the pool size alone.
pub struct SubnetScanner {
    scanner: HostScanner,
}

impl SubnetScanner {
    pub fn new(scanner: HostScanner) -> Self {
        Self { scanner }
    }

    /// Sweep `range` across every usable host address of `network`.
    ///
    /// Hosts with no open ports are omitted from the report. Cancellation
    /// is honored between hosts as well as inside each host scan.
    pub async fn scan_subnet(&self, network: IpNetwork, range: PortRange) -> ScanReport {
        let mut report = ScanReport::new();

        for addr in usable_hosts(&network) {
            if self.scanner.cancel_token().is_cancelled() {
                break;
            }

            let target = ScanTarget::from_ip(addr);
            let result = self.scanner.scan(&target, range).await;
            debug!(host = %target, open = result.open_ports.len(), "host swept");
            report.insert(result);
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanConfig;
    use crate::report::PortResult;
    use crate::scanner::{CancelToken, Probe};
    use crate::types::ScanTarget;
    use async_trait::async_trait;
    use std::collections::{HashMap, HashSet};
    use std::sync::{Arc, Mutex};

    struct SubnetProbe {
        open: HashSet<(String, u16)>,
        calls: Mutex<Vec<(String, u16)>>,
    }

    impl SubnetProbe {
        fn new(open: &[(&str, u16)]) -> Self {
            Self {
                open: open.iter().map(|(h, p)| (h.to_string(), *p)).collect(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Probe for SubnetProbe {
        async fn probe(&self, target: &ScanTarget, port: u16) -> PortResult {
            let key = (target.host().to_string(), port);
            self.calls.lock().unwrap().push(key.clone());
            PortResult {
                port,
                open: self.open.contains(&key),
            }
        }
    }

    fn subnet_scanner(probe: Arc<dyn Probe>) -> SubnetScanner {
        let config = ScanConfig::new(0.5, 8, 0.0).unwrap();
        SubnetScanner::new(HostScanner::new(probe, config, CancelToken::new()))
    }

    #[tokio::test]
    async fn test_subnet_end_to_end() {
        let probe = Arc::new(SubnetProbe::new(&[("203.0.113.1", 80)]));
        let network: IpNetwork = "203.0.113.0/30".parse().unwrap();

        let report = subnet_scanner(probe as Arc<dyn Probe>)
            .scan_subnet(network, PortRange::single(80))
            .await;

        assert_eq!(report.len(), 1);
        assert_eq!(report.get("203.0.113.1"), Some(&[80][..]));
        assert_eq!(
            serde_json::to_string(&report).unwrap(),
            r#"{"203.0.113.1":[80]}"#
        );
    }

    #[tokio::test]
    async fn test_every_host_and_port_swept_once() {
        let probe = Arc::new(SubnetProbe::new(&[]));
        let network: IpNetwork = "203.0.113.0/29".parse().unwrap();

        subnet_scanner(Arc::clone(&probe) as Arc<dyn Probe>)
            .scan_subnet(network, PortRange::new(80, 81).unwrap())
            .await;

        // 6 usable hosts, 2 ports each, no address probed twice and no
        // network/broadcast identifier probed at all.
        let calls = probe.calls.lock().unwrap();
        assert_eq!(calls.len(), 12);

        let mut counts: HashMap<&(String, u16), usize> = HashMap::new();
        for call in calls.iter() {
            *counts.entry(call).or_insert(0) += 1;
        }
        assert!(counts.values().all(|&c| c == 1));
        assert!(!calls.iter().any(|(h, _)| h == "203.0.113.0"));
        assert!(!calls.iter().any(|(h, _)| h == "203.0.113.7"));
    }

    #[tokio::test]
    async fn test_hosts_without_open_ports_omitted() {
        let probe = Arc::new(SubnetProbe::new(&[
            ("203.0.113.1", 22),
            ("203.0.113.2", 22),
        ]));
        let network: IpNetwork = "203.0.113.0/29".parse().unwrap();

        let report = subnet_scanner(probe as Arc<dyn Probe>)
            .scan_subnet(network, PortRange::single(22))
            .await;

        assert_eq!(report.len(), 2);
        assert_eq!(report.get("203.0.113.3"), None);
    }

    #[tokio::test]
    async fn test_cancelled_sweep_stops_between_hosts() {
        let token = CancelToken::new();
        token.cancel();

        let probe = Arc::new(SubnetProbe::new(&[("203.0.113.1", 22)]));
        let config = ScanConfig::new(0.5, 8, 0.0).unwrap();
        let scanner = SubnetScanner::new(HostScanner::new(
            Arc::clone(&probe) as Arc<dyn Probe>,
            config,
            token,
        ));

        let network: IpNetwork = "203.0.113.0/29".parse().unwrap();
        let report = scanner.scan_subnet(network, PortRange::single(22)).await;

        assert!(report.is_empty());
        assert_eq!(probe.calls.lock().unwrap().len(), 0);
    }
}

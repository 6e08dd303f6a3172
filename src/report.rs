//! Scan result aggregation.
//!
//! `PortResult` is the ephemeral outcome of one probe; `HostResult` folds a
//! host's probes into an ordered open-port list; `ScanReport` maps host
//! identifiers to open ports and is the final deliverable, serialized
//! directly as the JSON artifact.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::ScanTarget;

/// Outcome of probing a single port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortResult {
    pub port: u16,
    pub open: bool,
}

impl PortResult {
    pub const fn open(port: u16) -> Self {
        Self { port, open: true }
    }

    pub const fn closed(port: u16) -> Self {
        Self { port, open: false }
    }
}

/// All open ports found on one host, in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostResult {
    pub host: ScanTarget,
    pub open_ports: Vec<u16>,
}

impl HostResult {
    pub fn new(host: ScanTarget, open_ports: Vec<u16>) -> Self {
        Self { host, open_ports }
    }

    /// True when no port on the host accepted a connection.
    pub fn is_empty(&self) -> bool {
        self.open_ports.is_empty()
    }
}

/// Final deliverable: host identifier mapped to its open ports.
///
/// Hosts without open ports are dropped on insert. Keys are unique and kept
/// in sorted order so serialization is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanReport {
    hosts: BTreeMap<String, Vec<u16>>,
}

impl ScanReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a host outcome, discarding hosts with no open ports.
    pub fn insert(&mut self, result: HostResult) {
        if !result.is_empty() {
            self.hosts
                .insert(result.host.host().to_string(), result.open_ports);
        }
    }

    /// Open ports recorded for `host`, if any.
    pub fn get(&self, host: &str) -> Option<&[u16]> {
        self.hosts.get(host).map(Vec::as_slice)
    }

    /// Number of hosts with at least one open port.
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Total open ports across all hosts.
    pub fn total_open_ports(&self) -> usize {
        self.hosts.values().map(Vec::len).sum()
    }

    /// Iterate hosts in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u16])> {
        self.hosts.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

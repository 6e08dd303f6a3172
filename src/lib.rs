//! # Sounder - A Concurrent TCP Reachability Probe
//!
//! Sounder determines which ports on a host or subnet accept a TCP
//! connection within a bounded time, across a pool of concurrent probes,
//! with an optional per-worker rate throttle.
//!
//! ## Features
//!
//! - **Bounded concurrency**: a fixed worker pool drains the port range,
//!   never exceeding the configured number of in-flight connections
//! - **Fault tolerant**: unreachable hosts and ports degrade to empty
//!   results instead of errors
//! - **Flexible targeting**: single IPs, hostnames, and CIDR ranges
//! - **Deterministic output**: open ports reported in ascending order
//!   regardless of completion order
//! - **Result persistence**: a timestamp-named JSON report per invocation
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use sounder::{CancelToken, HostScanner, PortRange, ScanConfig, ScanTarget, TcpProbe};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ScanConfig::default();
//!     let probe = Arc::new(TcpProbe::new(config.timeout()));
//!     let scanner = HostScanner::new(probe, config, CancelToken::new());
//!
//!     let target = ScanTarget::from_ip("192.168.1.1".parse().unwrap());
//!     let range = PortRange::new(1, 1024).unwrap();
//!
//!     let result = scanner.scan(&target, range).await;
//!     println!("open ports: {:?}", result.open_ports);
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Target and port range parsing and validation
//! - [`config`] - Validated scan configuration
//! - [`scanner`] - The probe seam and the scan scheduling engine
//! - [`report`] - Result aggregation
//! - [`storage`] - JSON report persistence
//! - [`services`] - Well-known port annotation
//! - [`error`] - Error types
//! - [`output`] - Console presentation
//! - [`cli`] - Command-line surface

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod report;
pub mod scanner;
pub mod services;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use config::ScanConfig;
pub use error::{InputError, ScanError, StorageError};
pub use report::{HostResult, PortResult, ScanReport};
pub use scanner::{CancelToken, HostScanner, Probe, SubnetScanner, TcpProbe};
pub use storage::ReportStore;
pub use types::{PortRange, ScanTarget, TargetSpec};

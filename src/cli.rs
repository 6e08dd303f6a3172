//! Command-line interface for sounder.
//!
//! Uses `clap` derive macros for declarative argument parsing. The CLI is a
//! thin wrapper around the scan engine: parse, validate, scan, persist,
//! summarize.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::output;
use crate::report::ScanReport;
use crate::scanner::{CancelToken, HostScanner, SubnetScanner, TcpProbe};
use crate::storage::ReportStore;
use crate::types::{PortRange, TargetSpec};

/// A concurrent TCP reachability probe for hosts and subnets.
#[derive(Parser, Debug)]
#[command(name = "sounder")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A concurrent TCP reachability probe", long_about = None)]
pub struct Args {
    /// Target to scan: IP address, hostname, or CIDR subnet
    /// (e.g. 192.168.1.1, example.com, 192.168.1.0/24)
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Ports to scan, a single port or an inclusive range (e.g. "22", "1-1024")
    #[arg(short, long, default_value = "1-65535")]
    pub ports: String,

    /// Per-probe connect timeout in seconds
    #[arg(short, long, default_value = "0.5")]
    pub timeout: f64,

    /// Maximum number of concurrent probes
    #[arg(short, long, default_value = "100")]
    pub concurrency: usize,

    /// Pause after each probe within a worker, in seconds (0 = unthrottled).
    /// The delay is per worker, so total throughput is roughly
    /// concurrency / rate-delay probes per second.
    #[arg(short, long, default_value = "0")]
    pub rate_delay: f64,

    /// Directory the JSON report is written into
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Suppress progress and status output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute a full scan invocation.
pub async fn run(args: Args) -> anyhow::Result<()> {
    // All input validation happens before any network activity.
    let config = ScanConfig::new(args.timeout, args.concurrency, args.rate_delay)?;
    let range: PortRange = args.ports.parse()?;
    let spec = TargetSpec::parse(&args.target)?;

    let cancel = CancelToken::new();
    {
        // Ctrl-C flips the cooperative stop flag; workers notice it before
        // their next claim.
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    let probe = Arc::new(TcpProbe::new(config.timeout()));
    let scanner = HostScanner::new(probe, config, cancel.clone()).with_progress(!args.quiet);

    if !args.quiet {
        output::print_scan_header(&args.target, range)?;
    }

    let report = match spec {
        TargetSpec::Cidr(network) => {
            SubnetScanner::new(scanner).scan_subnet(network, range).await
        }
        single => {
            let mut report = ScanReport::new();
            for target in single.resolve().await {
                let result = scanner.scan(&target, range).await;
                if !args.quiet {
                    output::print_host_result(&result)?;
                }
                report.insert(result);
            }
            report
        }
    };

    // Persist whatever completed, interrupted or not.
    let store = ReportStore::new(args.output_dir);
    let path = store.save(&report)?;

    if !args.quiet {
        output::print_report_summary(&report, &path)?;
    }

    if cancel.is_cancelled() {
        output::print_warning("scan interrupted, partial results saved");
        return Err(ScanError::Interrupted.into());
    }

    Ok(())
}

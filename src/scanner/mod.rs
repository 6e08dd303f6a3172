//! Scan scheduling engine.
//!
//! Drives many concurrent single-port probes against one host through a
//! fixed-size worker pool, with optional per-worker pacing and cooperative
//! cancellation.

pub mod probe;
pub mod subnet;

pub use probe::{Probe, TcpProbe};
pub use subnet::SubnetScanner;

use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::ScanConfig;
use crate::report::HostResult;
use crate::services;
use crate::types::{PortRange, ScanTarget};

/// Cooperative stop signal shared by every worker of a scan.
///
/// Workers check the flag before claiming another port, so cancellation
/// halts new dispatch within one scheduling tick; probes already in flight
/// run out against their own timeout.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Scans every port of a range against a single host.
pub struct HostScanner {
    probe: Arc<dyn Probe>,
    config: ScanConfig,
    cancel: CancelToken,
    show_progress: bool,
}

impl HostScanner {
    pub fn new(probe: Arc<dyn Probe>, config: ScanConfig, cancel: CancelToken) -> Self {
        Self {
            probe,
            config,
            cancel,
            show_progress: false,
        }
    }

    /// Enable or disable the terminal progress bar.
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// The stop signal this scanner observes.
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Probe every port in `range` and fold the open ones into a
    /// [`HostResult`], sorted ascending.
    ///
    /// Each port is claimed exactly once from a shared atomic counter, the
    /// single piece of state workers share. Workers accumulate open ports
    /// locally and the results are merged after all workers have joined.
    pub async fn scan(&self, target: &ScanTarget, range: PortRange) -> HostResult {
        let total = range.len();
        let workers = self.config.max_concurrency().min(total);

        let progress = self.show_progress.then(|| {
            let pb = ProgressBar::new(total as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                    .unwrap()
                    .progress_chars("=>-"),
            );
            pb
        });

        let next = Arc::new(AtomicU32::new(u32::from(range.start())));
        let end = u32::from(range.end());

        let mut handles = Vec::with_capacity(workers);
        for _ in 0..workers {
            let probe = Arc::clone(&self.probe);
            let next = Arc::clone(&next);
            let cancel = self.cancel.clone();
            let target = target.clone();
            let rate_delay = self.config.rate_delay();
            let progress = progress.clone();

            handles.push(tokio::spawn(async move {
                let mut open = Vec::new();
                loop {
                    if cancel.is_cancelled() {
                        break;
                    }
                    let claimed = next.fetch_add(1, Ordering::SeqCst);
                    if claimed > end {
                        break;
                    }
                    let port = claimed as u16;

                    let result = probe.probe(&target, port).await;
                    if let Some(pb) = &progress {
                        pb.inc(1);
                    }
                    if result.open {
                        let service = services::describe(port);
                        info!(host = %target, port, service, "open port");
                        if let Some(pb) = &progress {
                            pb.set_message(format!("{} open ({})", port, service));
                        }
                        open.push(port);
                    }

                    if let Some(delay) = rate_delay {
                        if cancel.is_cancelled() {
                            break;
                        }
                        tokio::time::sleep(delay).await;
                    }
                }
                open
            }));
        }

        let mut open_ports = Vec::new();
        for joined in join_all(handles).await {
            match joined {
                Ok(mut found) => open_ports.append(&mut found),
                Err(e) => warn!(error = %e, "scan worker aborted"),
            }
        }

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        // Completion order is nondeterministic; sort for reproducible output.
        open_ports.sort_unstable();
        open_ports.dedup();

        HostResult::new(target.clone(), open_ports)
    }
}

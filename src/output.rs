//! Human-readable status output.
//!
//! Presentation only: everything here reads finished results. The scan
//! engine never depends on this module.

use console::style;
use std::io::{self, Write};
use std::path::Path;

use crate::report::{HostResult, ScanReport};
use crate::services;
use crate::types::PortRange;

/// Print the header line before a scan starts.
pub fn print_scan_header(target: &str, range: PortRange) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(
        out,
        "{} scanning {} (ports {})",
        style("sounder").cyan().bold(),
        style(target).bold(),
        range
    )
}

/// Print the per-host outcome with service annotations.
pub fn print_host_result(result: &HostResult) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "\nscan of {} finished", style(&result.host).bold())?;
    if result.is_empty() {
        writeln!(out, "  no open ports found")?;
    } else {
        for &port in &result.open_ports {
            writeln!(
                out,
                "  {} port {} ({}) open",
                style("[+]").green().bold(),
                style(port).green(),
                services::describe(port)
            )?;
        }
    }
    Ok(())
}

/// Print the final summary and where the report was written.
pub fn print_report_summary(report: &ScanReport, path: &Path) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out)?;
    if report.is_empty() {
        writeln!(out, "no hosts with open ports")?;
    } else {
        writeln!(
            out,
            "{} host(s) with open ports, {} open port(s) total",
            style(report.len()).green().bold(),
            style(report.total_open_ports()).green()
        )?;
        for (host, ports) in report.iter() {
            let ports: Vec<String> = ports.iter().map(u16::to_string).collect();
            writeln!(out, "  {}: {}", style(host).bold(), ports.join(", "))?;
        }
    }
    writeln!(out, "report saved to {}", style(path.display()).dim())
}

/// Print a warning message to stderr.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", style("warning:").yellow().bold(), message);
}

/// Print an error message to stderr.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("error:").red().bold(), message);
}

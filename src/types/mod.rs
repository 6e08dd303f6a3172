//! Core type definitions.
//!
//! Parsing and validation live here so that by the time the scan engine
//! runs, every value it sees is already well formed.

mod port;
mod target;

pub use port::PortRange;
pub use target::{usable_hosts, ScanTarget, TargetSpec};

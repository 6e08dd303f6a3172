//! Scan report persistence.
//!
//! Each invocation writes a single timestamp-named JSON document into the
//! configured output directory. That file is the sole durable artifact.

use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::report::ScanReport;

/// Writes scan reports into an output directory.
pub struct ReportStore {
    out_dir: PathBuf,
}

impl ReportStore {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// The directory reports are written into.
    pub fn dir(&self) -> &Path {
        &self.out_dir
    }

    /// Write `report` to a fresh `scan_results_<timestamp>.json`, creating
    /// the output directory if absent. Returns the path written.
    pub fn save(&self, report: &ScanReport) -> Result<PathBuf, StorageError> {
        fs::create_dir_all(&self.out_dir).map_err(|e| StorageError::CreateDir {
            path: self.out_dir.clone(),
            source: e,
        })?;

        let now = Utc::now();
        // Nanosecond stamps run out in 2262; fall back to microseconds.
        let stamp = now
            .timestamp_nanos_opt()
            .unwrap_or_else(|| now.timestamp_micros());
        let path = self.out_dir.join(format!("scan_results_{}.json", stamp));

        let content = serde_json::to_string_pretty(report)?;
        fs::write(&path, content).map_err(|e| StorageError::WriteFailed {
            path: path.clone(),
            source: e,
        })?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::HostResult;
    use crate::types::ScanTarget;

    fn sample_report() -> ScanReport {
        let mut report = ScanReport::new();
        report.insert(HostResult::new(
            ScanTarget::from_ip("203.0.113.1".parse().unwrap()),
            vec![22, 80],
        ));
        report
    }

    #[test]
    fn test_save_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path());

        let path = store.save(&sample_report()).unwrap();
        assert!(path.exists());
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("scan_results_"));

        let content = fs::read_to_string(&path).unwrap();
        let parsed: ScanReport = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, sample_report());
    }

    #[test]
    fn test_save_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("reports").join("latest");
        let store = ReportStore::new(&nested);

        let path = store.save(&sample_report()).unwrap();
        assert!(nested.is_dir());
        assert!(path.starts_with(&nested));
    }

    #[test]
    fn test_save_empty_report() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path());

        let path = store.save(&ScanReport::new()).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim(), "{}");
    }
}

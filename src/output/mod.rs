pub mod writer_csv;
pub mod writer_json;
pub mod writer_txt;

use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

pub use writer_csv::{dns_csv, write_dns_csv};
pub use writer_json::write_json;
pub use writer_txt::write_bucket;

use crate::error::{FinderError, Result};
use crate::findings::{Findings, CATALOG};
use crate::pipeline::Report;

pub const MAIL_FILE: &str = "mailsecuritylist.json";
pub const DNS_JSON_FILE: &str = "dnsrecords.json";
pub const DNS_CSV_FILE: &str = "dnsrecords.csv";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub written: Vec<PathBuf>,
    pub failed: usize,
    pub removed: Vec<PathBuf>,
}

impl WriteSummary {
    fn record(&mut self, outcome: Result<PathBuf>) {
        match outcome {
            Ok(path) => self.written.push(path),
            Err(e) => {
                error!(error = %e, "failed to write artifact");
                self.failed += 1;
            }
        }
    }
}

/// Write every artifact of `report` into `dir`, one after another.
/// Empty buckets were already dropped by the aggregator, so each bucket here
/// becomes a file; a category file left over from an earlier run is removed
/// when its bucket is now absent. One failed artifact does not stop the others.
pub async fn write_report(dir: &Path, report: &Report) -> Result<WriteSummary> {
    crate::utils::ensure_dir(dir)?;
    let mut summary = WriteSummary::default();

    if let Some(findings) = &report.findings {
        for bucket in &findings.buckets {
            summary.record(write_bucket(dir, bucket).await);
        }
        for path in stale_category_files(dir, findings) {
            match remove_stale(&path).await {
                Ok(true) => {
                    debug!(path = %path.display(), "removed category file with no results");
                    summary.removed.push(path);
                }
                Ok(false) => {}
                Err(e) => {
                    error!(error = %e, "failed to remove stale artifact");
                    summary.failed += 1;
                }
            }
        }
    }

    if let Some(mail) = &report.mail {
        let path = dir.join(MAIL_FILE);
        let outcome = write_json(&path, mail).await;
        summary.record(outcome.map(|_| path));
    }

    if let Some(dns) = &report.dns {
        let path = dir.join(DNS_JSON_FILE);
        let outcome = write_json(&path, dns).await;
        summary.record(outcome.map(|_| path));

        let path = dir.join(DNS_CSV_FILE);
        let outcome = write_dns_csv(&path, dns).await;
        summary.record(outcome.map(|_| path));
    }

    info!(
        written = summary.written.len(),
        removed = summary.removed.len(),
        failed = summary.failed,
        dir = %dir.display(),
        "Report written"
    );
    Ok(summary)
}

fn stale_category_files<'a>(dir: &'a Path, findings: &'a Findings) -> impl Iterator<Item = PathBuf> + 'a {
    CATALOG
        .iter()
        .filter(|entry| findings.get(entry.name).is_none())
        .map(move |entry| dir.join(entry.file))
}

/// Returns false when there was nothing to remove.
async fn remove_stale(path: &Path) -> Result<bool> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(FinderError::Write { path: path.to_path_buf(), source }),
    }
}

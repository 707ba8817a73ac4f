use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::{RunConfig, Source};
use crate::correlate::{correlate_dns, correlate_mail, DnsRecord, MailRecord};
use crate::document::{parse_jsonl, Document};
use crate::error::{FinderError, Result};
use crate::findings::{aggregate, Findings};
use crate::utils::read_input;

/// Everything a run computed, ready for the report writer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub findings: Option<Findings>,
    pub mail: Option<Vec<MailRecord>>,
    pub dns: Option<Vec<DnsRecord>>,
}

/// Load one JSONL feed into a document.
pub fn load_document(path: &Path) -> Result<Document> {
    load_documents(&[path.to_path_buf()], false)
}

/// Load several feeds into one document, records kept in file then line order.
/// With `skip_missing`, absent files are skipped as long as one exists.
pub fn load_documents(paths: &[PathBuf], skip_missing: bool) -> Result<Document> {
    let mut records = Vec::new();
    let mut loaded = 0usize;

    for path in paths {
        if skip_missing && !path.exists() {
            warn!(path = %path.display(), "input file does not exist, skipping");
            continue;
        }
        let text = read_input(path)?;
        let parsed = parse_jsonl(&text).map_err(|source| FinderError::FatalInput { path: path.clone(), source })?;
        info!(path = %path.display(), records = parsed.len(), "Loaded input");
        records.extend(parsed);
        loaded += 1;
    }

    if loaded == 0 {
        let path = paths.first().cloned().unwrap_or_default();
        return Err(FinderError::Read {
            path,
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no input file exists"),
        });
    }

    let doc = Document::from_records(records);
    debug!(records = doc.records().len(), nodes = doc.node_count(), "document built");
    for anomaly in doc.record_anomalies() {
        anomaly.report();
    }
    Ok(doc)
}

/// Run every view selected in `config`. Input errors abort the run; problems
/// inside single records or categories are logged and skipped.
pub fn run(config: &RunConfig) -> Result<Report> {
    let mut report = Report::default();

    if config.views.findings {
        let skip_missing = config.source == Source::All && !config.input_override;
        let doc = load_documents(&config.web_inputs, skip_missing)?;
        let findings = aggregate(&doc);
        if findings.is_empty() {
            info!("No findings in the selected input");
        }
        report.findings = Some(findings);
    }

    if config.views.mail || config.views.dns {
        let mail_doc = if config.views.mail { Some(load_document(&config.mail_input)?) } else { None };

        if let Some(doc) = &mail_doc {
            let records = correlate_mail(doc);
            info!("{} Mail security records have been found", records.len());
            report.mail = Some(records);
        }

        if config.views.dns {
            let records = match &mail_doc {
                Some(doc) if config.dns_input == config.mail_input => correlate_dns(doc),
                _ => correlate_dns(&load_document(&config.dns_input)?),
            };
            info!("{} DNS records have been found", records.len());
            report.dns = Some(records);
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_feeds_are_skipped_only_when_asked() {
        let tmp = TempDir::new().unwrap();
        let present = tmp.path().join("ips.json");
        fs::write(&present, "{\"url\":\"https://1.2.3.4\"}\n").unwrap();
        let missing = tmp.path().join("domains.json");

        let doc = load_documents(&[missing.clone(), present.clone()], true).unwrap();
        assert_eq!(doc.records().len(), 1);

        let err = load_documents(&[missing.clone(), present], false).unwrap_err();
        assert!(matches!(err, FinderError::Read { ref path, .. } if *path == missing));

        let err = load_documents(&[missing], true).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn malformed_feed_is_fatal_input() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.json");
        fs::write(&path, "{\"url\":\"https://a\"}\n{\"url\":\n").unwrap();
        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, FinderError::FatalInput { .. }));
        assert!(err.to_string().contains("broken.json"));
    }
}

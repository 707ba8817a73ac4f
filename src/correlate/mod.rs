pub mod dns;
pub mod mail;
pub mod models;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::document::{Document, NodeId};
use crate::error::RecordAnomaly;

pub use dns::correlate_dns;
pub use mail::correlate_mail;
pub use models::{DnsRecord, MailRecord};

static DNS_ARTIFACT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^_dmarc\.|_domainkey\.").expect("valid artifact pattern"));

/// Hosts that only carry protocol metadata (`_dmarc.*`, `*._domainkey.*`).
/// They enrich other hosts and never become entities of their own.
pub fn is_dns_artifact(host: &str) -> bool {
    DNS_ARTIFACT.is_match(host)
}

/// First `host` value of a record, or the anomaly explaining why there is none.
pub(crate) fn record_host<'d>(doc: &'d Document, node: NodeId, view: &'static str) -> Result<&'d str, RecordAnomaly> {
    match doc.string_values(node, "host").first() {
        Some(host) => Ok(*host),
        None if doc.field(node, "host").is_some() => Err(RecordAnomaly::NonStringField { field: "host".into() }),
        None => Err(RecordAnomaly::MissingHost { view }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_hosts() {
        assert!(is_dns_artifact("_dmarc.example.com"));
        assert!(is_dns_artifact("_DMARC.example.com"));
        assert!(is_dns_artifact("selector1._domainkey.example.com"));
        assert!(!is_dns_artifact("example.com"));
        assert!(!is_dns_artifact("mail._dmarc.example.com"));
        assert!(!is_dns_artifact("dmarc.example.com"));
    }
}

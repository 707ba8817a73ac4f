use ahash::AHashMap;
use tracing::{debug, error, warn};

use crate::correlate::models::{merge_unique, MailRecord};
use crate::correlate::{is_dns_artifact, record_host};
use crate::document::{Document, NodeId};
use crate::query::Predicate;

/// Build one MailRecord per host from every record carrying `mx`.
///
/// SPF comes from the host's own `txt` values, DMARC from the companion
/// `_dmarc.<host>` record and DKIM from every `<selector>._domainkey.<host>`
/// record. Once SPF or DMARC is set for a host it is never replaced.
pub fn correlate_mail(doc: &Document) -> Vec<MailRecord> {
    let candidates = match doc.query(&Predicate::key_exists("mx")) {
        Ok(nodes) => nodes,
        Err(e) => {
            error!(error = %e, "mx query failed");
            return Vec::new();
        }
    };

    let mut records: Vec<MailRecord> = Vec::new();
    let mut by_host: AHashMap<String, usize> = AHashMap::new();

    for node in candidates {
        let host = match record_host(doc, node, "mail") {
            Ok(host) => host,
            Err(anomaly) => {
                anomaly.report();
                continue;
            }
        };
        if is_dns_artifact(host) {
            debug!(host, "DNS artifact host, only used for enrichment");
            continue;
        }

        let slot = match by_host.get(host) {
            Some(&slot) => slot,
            None => {
                let mut record = MailRecord::new(host);
                record.dmarc_entry = lookup_dmarc(doc, host);
                record.dkim_entries = lookup_dkim(doc, host);
                records.push(record);
                by_host.insert(host.to_string(), records.len() - 1);
                records.len() - 1
            }
        };

        let record = &mut records[slot];
        merge_unique(&mut record.mx_records, doc.string_values(node, "mx"));
        if record.spf_entry.is_none() {
            record.spf_entry = find_spf(&doc.string_values(node, "txt"));
        } else {
            debug!(host, "SPF entry already set, keeping the first one");
        }
    }

    records
}

/// First TXT value mentioning SPF, case-insensitive.
pub fn find_spf(txt: &[&str]) -> Option<String> {
    txt.iter()
        .find(|entry| entry.to_lowercase().contains("spf"))
        .map(|entry| entry.to_string())
}

/// Records whose host satisfies `accept`. Host names compare case-insensitively,
/// the same way artifact hosts are recognised.
fn companion_records(doc: &Document, accept: impl Fn(&str) -> bool) -> Vec<NodeId> {
    match doc.query(&Predicate::key_exists("host")) {
        Ok(nodes) => nodes
            .into_iter()
            .filter(|node| match record_host(doc, *node, "mail") {
                Ok(h) => accept(h.to_ascii_lowercase().as_str()),
                Err(_) => false,
            })
            .collect(),
        Err(e) => {
            warn!(error = %e, "host lookup failed");
            Vec::new()
        }
    }
}

/// First TXT value of the `_dmarc.<host>` record.
fn lookup_dmarc(doc: &Document, host: &str) -> Option<String> {
    let name = format!("_dmarc.{}", host.to_ascii_lowercase());
    let entry = companion_records(doc, |h| h == name)
        .into_iter()
        .find_map(|node| doc.string_values(node, "txt").first().map(|txt| txt.to_string()));
    if entry.is_some() {
        debug!(host, "DMARC entry found");
    }
    entry
}

/// One entry per `*._domainkey.<host>` record: its TXT values joined without separator.
fn lookup_dkim(doc: &Document, host: &str) -> Vec<String> {
    let needle = format!("_domainkey.{}", host.to_ascii_lowercase());
    companion_records(doc, |h| h.contains(&needle))
        .into_iter()
        .map(|node| doc.string_values(node, "txt").concat())
        .filter(|entry| !entry.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spf_is_first_case_insensitive_match() {
        assert_eq!(
            find_spf(&["google-site-verification=x", "v=SPF1 -all", "v=spf1 mx -all"]),
            Some("v=SPF1 -all".to_string())
        );
        assert_eq!(find_spf(&["nothing here"]), None);
        assert_eq!(find_spf(&[]), None);
    }

    #[test]
    fn companion_hosts_match_any_case() {
        use serde_json::json;

        let doc = Document::from_records(vec![
            json!({"host": "_DMARC.example.com", "mx": [], "txt": ["v=DMARC1; p=none"]}),
            json!({"host": "S1._DomainKey.Example.com", "txt": ["v=DKIM1; ", "k=rsa"]}),
            json!({"host": "example.com", "mx": ["mail.example.com"]}),
        ]);
        let records = correlate_mail(&doc);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].host, "example.com");
        assert_eq!(records[0].dmarc_entry.as_deref(), Some("v=DMARC1; p=none"));
        assert_eq!(records[0].dkim_entries, ["v=DKIM1; k=rsa"]);
    }
}

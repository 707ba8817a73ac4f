use ahash::AHashMap;
use tracing::{debug, error};

use crate::correlate::models::{merge_unique, DnsRecord};
use crate::correlate::{is_dns_artifact, record_host};
use crate::document::Document;
use crate::query::Predicate;

/// Build one DnsRecord per host. A host can show up several times in a feed
/// with partial answers; `a` and `aaaa` values are unioned over all of them.
pub fn correlate_dns(doc: &Document) -> Vec<DnsRecord> {
    let candidates = match doc.query(&Predicate::key_exists("host")) {
        Ok(nodes) => nodes,
        Err(e) => {
            error!(error = %e, "host query failed");
            return Vec::new();
        }
    };

    let mut records: Vec<DnsRecord> = Vec::new();
    let mut by_host: AHashMap<String, usize> = AHashMap::new();

    for node in candidates {
        let host = match record_host(doc, node, "dns") {
            Ok(host) => host,
            Err(anomaly) => {
                anomaly.report();
                continue;
            }
        };
        if is_dns_artifact(host) {
            debug!(host, "DNS artifact host skipped");
            continue;
        }

        let slot = *by_host.entry(host.to_string()).or_insert_with(|| {
            records.push(DnsRecord::new(host));
            records.len() - 1
        });
        let record = &mut records[slot];
        merge_unique(&mut record.ipv4_addresses, doc.string_values(node, "a"));
        merge_unique(&mut record.ipv6_addresses, doc.string_values(node, "aaaa"));
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn addresses_are_unioned_per_host() {
        let doc = Document::from_records(vec![
            json!({"host": "a.example.com", "a": ["1.1.1.1"]}),
            json!({"host": "b.example.com", "a": ["2.2.2.2"], "aaaa": ["2001:db8::2"]}),
            json!({"host": "a.example.com", "a": ["1.1.1.1", "1.1.1.2"], "aaaa": ["2001:db8::1"]}),
        ]);
        let records = correlate_dns(&doc);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].host, "a.example.com");
        assert_eq!(records[0].ipv4_addresses, ["1.1.1.1", "1.1.1.2"]);
        assert_eq!(records[0].ipv6_addresses, ["2001:db8::1"]);
        assert_eq!(records[1].host, "b.example.com");
    }

    #[test]
    fn artifacts_and_bad_hosts_are_skipped() {
        let doc = Document::from_records(vec![
            json!({"host": "_dmarc.example.com", "txt": ["v=DMARC1"]}),
            json!({"host": "s1._domainkey.example.com", "txt": ["v=DKIM1"]}),
            json!({"host": 12, "a": ["9.9.9.9"]}),
            json!({"host": "example.com"}),
        ]);
        let records = correlate_dns(&doc);
        assert_eq!(records, vec![DnsRecord::new("example.com")]);
    }
}

use serde::{Deserialize, Serialize};

/// Mail security posture of one host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailRecord {
    pub host: String,
    pub mx_records: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spf_entry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dmarc_entry: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dkim_entries: Vec<String>,
}

impl MailRecord {
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into(), ..Default::default() }
    }
}

/// Addresses a host resolved to across every record that mentions it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    pub host: String,
    pub ipv4_addresses: Vec<String>,
    pub ipv6_addresses: Vec<String>,
}

impl DnsRecord {
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into(), ..Default::default() }
    }
}

/// Append values not yet present, keeping first-seen order.
pub(crate) fn merge_unique<'a>(into: &mut Vec<String>, values: impl IntoIterator<Item = &'a str>) {
    for value in values {
        if !into.iter().any(|existing| existing == value) {
            into.push(value.to_string());
        }
    }
}

use std::path::Path;

use csv::Writer;

use crate::correlate::DnsRecord;
use crate::error::{FinderError, Result};

/// CSV rendering of DNS records: host, ipv4, ipv6 with `;`-joined address lists.
pub fn dns_csv(items: &[DnsRecord]) -> Result<Vec<u8>> {
    let mut w = Writer::from_writer(Vec::new());
    w.write_record(["host", "ipv4", "ipv6"])?;
    for it in items {
        w.write_record([
            it.host.as_str(),
            it.ipv4_addresses.join(";").as_str(),
            it.ipv6_addresses.join(";").as_str(),
        ])?;
    }
    w.flush().map_err(|e| FinderError::Csv(e.into()))?;
    w.into_inner().map_err(|e| FinderError::Csv(e.into_error().into()))
}

pub async fn write_dns_csv(path: &Path, items: &[DnsRecord]) -> Result<()> {
    let data = dns_csv(items)?;
    tokio::fs::write(path, data)
        .await
        .map_err(|source| FinderError::Write { path: path.to_path_buf(), source })
}

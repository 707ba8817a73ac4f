use crate::document::{Document, NodeId, NodeKind, Scalar};
use crate::error::RecordAnomaly;
use crate::extract::dedup::OrderedSet;
use crate::extract::url_reduce::reduce_url;

/// Extract `target_key` from every matched object into a deduplicated list.
///
/// * `url` values are reduced to `scheme://host[:port]`.
/// * other string values are decorated with the record's `url` when it has
///   one: `"<value> (<url>)"`.
/// * list values contribute each string element.
///
/// A matched object without `target_key` is resolved through its ancestors,
/// so a match inside a nested object (`tls.self_signed`) still yields the
/// record's `url`.
pub fn extract_values(doc: &Document, matched: &[NodeId], target_key: &str) -> OrderedSet {
    let mut out = OrderedSet::new();
    for &node in matched {
        let Some((owner, value)) = doc.nearest_field(node, target_key) else {
            continue;
        };
        match doc.kind(value) {
            Some(NodeKind::Scalar(Scalar::String(s))) => {
                out.insert(decorate(doc, owner, target_key, s));
            }
            Some(NodeKind::Array(items)) => {
                for item in items {
                    if let Some(s) = doc.as_str(*item) {
                        out.insert(decorate_element(target_key, s));
                    }
                }
            }
            _ => RecordAnomaly::NonStringField { field: target_key.to_string() }.report(),
        }
    }
    out
}

fn decorate(doc: &Document, owner: NodeId, target_key: &str, value: &str) -> String {
    if target_key == "url" {
        return reduce_url(value);
    }
    match doc.str_field(owner, "url") {
        Some(url) => format!("{} ({})", value, url),
        None => value.to_string(),
    }
}

fn decorate_element(target_key: &str, value: &str) -> String {
    if target_key == "url" {
        reduce_url(value)
    } else {
        value.to_string()
    }
}

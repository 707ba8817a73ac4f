use ahash::AHashSet;

use crate::document::{Document, NodeId};
use crate::query::predicate::{MatchKind, Predicate, PredicateError};

/// Run `predicate` over every object in the document.
///
/// Returns the objects that own a matching field, in document order and
/// without duplicates. Contains queries are evaluated once per operand, in
/// operand order, and the per-operand results are concatenated before
/// deduplication.
pub fn evaluate(doc: &Document, predicate: &Predicate<'_>) -> Result<Vec<NodeId>, PredicateError> {
    predicate.validate()?;
    let key = predicate.match_key;

    let mut matched = Vec::new();
    match predicate.kind {
        MatchKind::ContainsAnyOf(operands) => {
            for operand in operands {
                collect(doc, key, |text| text.contains(*operand), &mut matched);
            }
        }
        MatchKind::EqualsBool(expected) => {
            let literal = if expected { "true" } else { "false" };
            collect(doc, key, |text| text == literal, &mut matched);
        }
        MatchKind::KeyExists => collect_present(doc, key, &mut matched),
    }

    let mut seen = AHashSet::with_capacity(matched.len());
    matched.retain(|id| seen.insert(*id));
    Ok(matched)
}

fn collect(doc: &Document, key: &str, test: impl Fn(&str) -> bool, out: &mut Vec<NodeId>) {
    for value in field_nodes(doc, key) {
        if test(&doc.text(value)) {
            push_owner(doc, value, out);
        }
    }
}

fn collect_present(doc: &Document, key: &str, out: &mut Vec<NodeId>) {
    for value in field_nodes(doc, key) {
        push_owner(doc, value, out);
    }
}

/// Value nodes of every `key` field, in document order.
fn field_nodes<'d>(doc: &'d Document, key: &'d str) -> impl Iterator<Item = NodeId> + 'd {
    doc.objects().filter_map(move |object| doc.field(object, key))
}

/// The match is the object holding the field; anything else is dropped.
fn push_owner(doc: &Document, value: NodeId, out: &mut Vec<NodeId>) {
    match doc.parent(value) {
        Some(owner) if doc.as_object_fields(owner).is_some() => out.push(owner),
        _ => tracing::debug!(node = value, "matched field without an owning object, dropped"),
    }
}

impl Document {
    /// Objects matching `predicate`, see [`evaluate`].
    pub fn query(&self, predicate: &Predicate<'_>) -> Result<Vec<NodeId>, PredicateError> {
        evaluate(self, predicate)
    }
}

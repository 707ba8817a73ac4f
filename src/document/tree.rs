use serde_json::{Number, Value};

use crate::error::RecordAnomaly;

/// Index of a node inside a [`Document`] arena. Ids follow document order.
pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl Scalar {
    /// String form used for matching: booleans become "true"/"false".
    pub fn text(&self) -> String {
        match self {
            Scalar::Null => String::new(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Number(n) => n.to_string(),
            Scalar::String(s) => s.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Object(Vec<(String, NodeId)>),
    Array(Vec<NodeId>),
    Scalar(Scalar),
}

/// Read-only JSON tree stored as an arena.
///
/// Every node except the root records its parent in a separate index. Parent
/// links are only used to look up sibling and ancestor fields; they never own
/// anything and are fixed once the document is built.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeKind>,
    parents: Vec<Option<NodeId>>,
    /// False for nodes inside a top-level record that is not an object
    scanned: Vec<bool>,
    root: NodeId,
}

impl Document {
    pub fn from_value(value: Value) -> Self {
        let mut doc = Document { nodes: Vec::new(), parents: Vec::new(), scanned: Vec::new(), root: 0 };
        doc.root = doc.insert(value, None);
        doc.scanned = vec![true; doc.nodes.len()];
        let skipped: Vec<NodeId> = doc
            .records()
            .iter()
            .copied()
            .filter(|id| doc.as_object_fields(*id).is_none())
            .collect();
        for record in skipped {
            doc.exclude_subtree(record);
        }
        doc
    }

    fn exclude_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            self.scanned[node] = false;
            match &self.nodes[node] {
                NodeKind::Array(items) => stack.extend(items.iter().copied()),
                NodeKind::Object(fields) => stack.extend(fields.iter().map(|(_, c)| *c)),
                NodeKind::Scalar(_) => {}
            }
        }
    }

    /// Build a document whose root array holds `records` in order.
    pub fn from_records(records: Vec<Value>) -> Self {
        Self::from_value(Value::Array(records))
    }

    fn insert(&mut self, value: Value, parent: Option<NodeId>) -> NodeId {
        let id = self.nodes.len();
        // placeholder keeps ids in pre-order; replaced once children exist
        self.nodes.push(NodeKind::Scalar(Scalar::Null));
        self.parents.push(parent);

        let kind = match value {
            Value::Object(map) => {
                let mut fields = Vec::with_capacity(map.len());
                for (key, child) in map {
                    let child_id = self.insert(child, Some(id));
                    fields.push((key, child_id));
                }
                NodeKind::Object(fields)
            }
            Value::Array(items) => {
                NodeKind::Array(items.into_iter().map(|v| self.insert(v, Some(id))).collect())
            }
            Value::String(s) => NodeKind::Scalar(Scalar::String(s)),
            Value::Number(n) => NodeKind::Scalar(Scalar::Number(n)),
            Value::Bool(b) => NodeKind::Scalar(Scalar::Bool(b)),
            Value::Null => NodeKind::Scalar(Scalar::Null),
        };
        self.nodes[id] = kind;
        id
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.nodes.get(id)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(id).copied().flatten()
    }

    /// Top-level records. A document whose root is a single object is one record.
    pub fn records(&self) -> &[NodeId] {
        match &self.nodes[self.root] {
            NodeKind::Array(items) => items.as_slice(),
            NodeKind::Object(_) => std::slice::from_ref(&self.root),
            NodeKind::Scalar(_) => &[],
        }
    }

    /// Top-level records that are not objects.
    pub fn record_anomalies(&self) -> Vec<RecordAnomaly> {
        self.records()
            .iter()
            .enumerate()
            .filter(|(_, id)| self.as_object_fields(**id).is_none())
            .map(|(index, _)| RecordAnomaly::NotAnObject { index })
            .collect()
    }

    /// Fields of `id` if it is an object, `None` for any other shape.
    pub fn as_object_fields(&self, id: NodeId) -> Option<&[(String, NodeId)]> {
        match self.nodes.get(id)? {
            NodeKind::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// Object nodes in document order, leaving out everything inside a
    /// top-level record that is not an object.
    pub fn objects(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(id, kind)| self.scanned[*id] && matches!(kind, NodeKind::Object(_)))
            .map(|(id, _)| id)
    }

    pub fn field(&self, object: NodeId, key: &str) -> Option<NodeId> {
        self.as_object_fields(object)?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| *v)
    }

    pub fn as_str(&self, id: NodeId) -> Option<&str> {
        match self.nodes.get(id)? {
            NodeKind::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn str_field(&self, object: NodeId, key: &str) -> Option<&str> {
        self.as_str(self.field(object, key)?)
    }

    /// String values of `key`: the string itself, or every string element of a list.
    pub fn string_values(&self, object: NodeId, key: &str) -> Vec<&str> {
        let Some(value) = self.field(object, key) else {
            return Vec::new();
        };
        match &self.nodes[value] {
            NodeKind::Scalar(Scalar::String(s)) => vec![s.as_str()],
            NodeKind::Array(items) => items.iter().filter_map(|id| self.as_str(*id)).collect(),
            _ => Vec::new(),
        }
    }

    /// Text of a node: scalars stringified, containers as the concatenation of
    /// their descendant scalars in document order.
    pub fn text(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id] {
            NodeKind::Scalar(s) => out.push_str(&s.text()),
            NodeKind::Array(items) => items.iter().for_each(|c| self.collect_text(*c, out)),
            NodeKind::Object(fields) => fields.iter().for_each(|(_, c)| self.collect_text(*c, out)),
        }
    }

    /// Nearest object at or above `start` that carries `key`, with the value node.
    pub fn nearest_field(&self, start: NodeId, key: &str) -> Option<(NodeId, NodeId)> {
        let mut current = Some(start);
        while let Some(id) = current {
            if let Some(value) = self.field(id, key) {
                return Some((id, value));
            }
            current = self.parent(id);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parents_point_back_up() {
        let doc = Document::from_records(vec![json!({"url": "https://a", "tls": {"self_signed": true}})]);
        let record = doc.records()[0];
        let tls = doc.field(record, "tls").unwrap();
        let flag = doc.field(tls, "self_signed").unwrap();
        assert_eq!(doc.parent(flag), Some(tls));
        assert_eq!(doc.parent(tls), Some(record));
        assert_eq!(doc.parent(record), Some(doc.root()));
        assert_eq!(doc.parent(doc.root()), None);
        assert_eq!(doc.nearest_field(tls, "url").map(|(o, _)| o), Some(record));
    }

    #[test]
    fn ids_follow_document_order() {
        let doc = Document::from_records(vec![json!({"a": {"b": 1}}), json!({"c": 2})]);
        let objects: Vec<_> = doc.objects().collect();
        assert_eq!(objects.len(), 3);
        assert!(objects.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(objects[2], doc.records()[1]);
    }

    #[test]
    fn non_object_records_are_not_scanned() {
        let doc = Document::from_records(vec![
            json!({"url": "https://a.example.com"}),
            json!([{"url": "https://b.example.com"}]),
            json!("bare"),
        ]);
        let objects: Vec<_> = doc.objects().collect();
        assert_eq!(objects, vec![doc.records()[0]]);
        assert_eq!(
            doc.record_anomalies(),
            vec![RecordAnomaly::NotAnObject { index: 1 }, RecordAnomaly::NotAnObject { index: 2 }]
        );
    }

    #[test]
    fn text_and_string_values() {
        let doc = Document::from_records(vec![json!({"tech": ["PHP", "Nginx"], "port": 80, "ok": false})]);
        let r = doc.records()[0];
        assert_eq!(doc.text(doc.field(r, "tech").unwrap()), "PHPNginx");
        assert_eq!(doc.text(doc.field(r, "port").unwrap()), "80");
        assert_eq!(doc.text(doc.field(r, "ok").unwrap()), "false");
        assert_eq!(doc.string_values(r, "tech"), vec!["PHP", "Nginx"]);
        assert!(doc.string_values(r, "port").is_empty());
        assert!(doc.string_values(r, "missing").is_empty());
    }

    #[test]
    fn scalar_records_are_anomalies() {
        let doc = Document::from_records(vec![json!({"a": 1}), json!(42), json!("x")]);
        assert_eq!(
            doc.record_anomalies(),
            vec![RecordAnomaly::NotAnObject { index: 1 }, RecordAnomaly::NotAnObject { index: 2 }]
        );
        assert!(doc.as_object_fields(doc.records()[1]).is_none());
    }
}

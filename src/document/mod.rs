pub mod jsonl;
pub mod tree;

pub use jsonl::{normalize_jsonl, parse_jsonl};
pub use tree::{Document, NodeId, NodeKind, Scalar};

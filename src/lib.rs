pub mod config;
pub mod correlate;
pub mod document;
pub mod error;
pub mod extract;
pub mod findings;
pub mod output;
pub mod pipeline;
pub mod query;
pub mod utils;

// re-export modules used in tests
pub use crate::document::Document;
pub use crate::error::{FinderError, RecordAnomaly, Result};
pub use crate::query::{MatchKind, Predicate};

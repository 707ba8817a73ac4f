//! Error types for the finder pipeline

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using FinderError
pub type Result<T> = std::result::Result<T, FinderError>;

#[derive(Error, Debug)]
pub enum FinderError {
    // === Input Errors ===
    #[error("Reading input file {} failed: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input file {} is not well-formed JSONL: {source}", .path.display())]
    FatalInput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // === Query Errors ===
    #[error("Query for category {category} failed: {reason}")]
    Query { category: String, reason: String },

    // === Configuration Errors ===
    #[error("Invalid settings file {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },

    // === Output Errors ===
    #[error("Writing {} failed: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl FinderError {
    /// Fatal errors abort the run; everything else is isolated to one category or artifact.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            FinderError::Read { .. } | FinderError::FatalInput { .. } | FinderError::Config { .. }
        )
    }
}

/// A single record that does not have the shape a view expects.
/// Anomalies are logged and the record is skipped; they never abort a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordAnomaly {
    NotAnObject { index: usize },
    MissingHost { view: &'static str },
    NonStringField { field: String },
}

impl fmt::Display for RecordAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordAnomaly::NotAnObject { index } => {
                write!(f, "record #{} is not a JSON object", index)
            }
            RecordAnomaly::MissingHost { view } => {
                write!(f, "{} record without host value", view)
            }
            RecordAnomaly::NonStringField { field } => {
                write!(f, "field '{}' is not a string", field)
            }
        }
    }
}

impl RecordAnomaly {
    pub fn report(&self) {
        tracing::warn!(anomaly = %self, "skipping record");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_classification() {
        let read = FinderError::Read {
            path: PathBuf::from("in.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(read.is_fatal());
        assert!(read.to_string().contains("in.json"));

        let query = FinderError::Query { category: "errors".into(), reason: "no operands".into() };
        assert!(!query.is_fatal());
    }

    #[test]
    fn anomaly_messages() {
        assert_eq!(RecordAnomaly::NotAnObject { index: 3 }.to_string(), "record #3 is not a JSON object");
        assert_eq!(
            RecordAnomaly::MissingHost { view: "mail" }.to_string(),
            "mail record without host value"
        );
    }
}

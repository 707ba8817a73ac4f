use tracing::{debug, error, info};

use crate::document::Document;
use crate::error::{FinderError, Result};
use crate::extract::{extract_values, OrderedSet};
use crate::findings::catalog::{CatalogEntry, CATALOG};

/// Non-empty result of one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub name: &'static str,
    pub file: &'static str,
    pub description: &'static str,
    pub values: OrderedSet,
}

/// All non-empty buckets of a run, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Findings {
    pub buckets: Vec<Bucket>,
}

impl Findings {
    pub fn get(&self, name: &str) -> Option<&Bucket> {
        self.buckets.iter().find(|b| b.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }
}

/// Evaluate a single catalog entry against the document.
pub fn run_entry(doc: &Document, entry: &CatalogEntry) -> Result<OrderedSet> {
    let matched = doc.query(&entry.predicate()).map_err(|e| FinderError::Query {
        category: entry.name.to_string(),
        reason: e.to_string(),
    })?;
    debug!(category = entry.name, matched = matched.len(), "query evaluated");
    Ok(extract_values(doc, &matched, entry.target_key))
}

pub fn aggregate(doc: &Document) -> Findings {
    aggregate_with(doc, CATALOG)
}

/// Run every entry independently. Empty categories and failed queries produce
/// no bucket; neither affects the other entries.
pub fn aggregate_with(doc: &Document, entries: &[CatalogEntry]) -> Findings {
    let mut findings = Findings::default();
    for entry in entries {
        match run_entry(doc, entry) {
            Ok(values) if values.is_empty() => {
                debug!(category = entry.name, "no results, category omitted");
            }
            Ok(values) => {
                info!("Found {} {}", values.len(), entry.description);
                findings.buckets.push(Bucket {
                    name: entry.name,
                    file: entry.file,
                    description: entry.description,
                    values,
                });
            }
            Err(e) => error!(error = %e, "category treated as empty"),
        }
    }
    findings
}

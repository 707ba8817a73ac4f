pub mod aggregator;
pub mod catalog;

pub use aggregator::{aggregate, aggregate_with, run_entry, Bucket, Findings};
pub use catalog::{find_entry, CatalogEntry, CATALOG};

//! Deduplication of annotated SNV calls across batches.
//!
//! The combined record set is split into kept rows (first occurrence of each
//! duplicate key) and an audit set holding every member of every duplicate
//! group. A [`DedupReport`] summarizes what remains per origin file.

pub mod dedup;
pub mod report;

pub use dedup::{DedupKey, DedupOutcome, UNKNOWN_ORIGIN, remove_duplicate_mutations};
pub use report::{DedupReport, OriginSummary};

//! # Input/Output utilities for variant-call tables.
//!
//! Reads variant-caller CSV exports (plain or gzipped) into [`VariantTable`]s,
//! keeping only substitution rows, and writes annotated tables back out: one
//! per batch, plus the combined master and duplicate-audit tables. Annotated
//! tables can be read back in so deduplication can run on earlier output.
//!
pub mod annotated;
pub mod consts;
pub mod error;
pub mod variants;

// re-expose core functions
pub use annotated::*;
pub use consts::*;
pub use error::*;
pub use variants::{VariantTable, read_variant_table, read_variant_table_from_reader, strip_chrom_suffix};

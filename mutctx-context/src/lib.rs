//! # Genomic context annotation
//!
//! Attaches the reference bases around each SNV call:
//!
//! - position coercion with row-accurate errors
//! - one batch query per call table through [`mutctx_core::ContextLookup`]
//! - contract checks on the lookup answer before it is zipped onto rows
//! - optional filtering down to full-width contexts

pub mod annotate;
pub mod errors;
pub mod fetch;

pub use annotate::{annotate_genomic_context, coerce_position, coerce_positions, filter_full_context};
pub use errors::{ContextError, Result};
pub use fetch::fetch_context;

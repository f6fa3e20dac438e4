//! # Core types for mutctx
//!
//! Shared data model for the annotation pipeline: raw variant rows as read from a
//! batch, the sequence context attached to them, and the annotated rows that flow
//! into signature classification and deduplication. Also home to the
//! [`ContextLookup`] seam between the annotator and whatever serves reference
//! sequence, and to the pipeline configuration.
pub mod config;
pub mod errors;
pub mod lookup;
pub mod models;
pub mod utils;

// re-exports
pub use config::PipelineConfig;
pub use lookup::ContextLookup;
pub use models::{
    AnnotatedBatch, AnnotatedVariant, ContextAnnotation, FlankingContext, VariantRecord,
    combine_batches,
};

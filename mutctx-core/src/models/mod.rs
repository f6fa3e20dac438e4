pub mod annotated;
pub mod context;
pub mod variant;

// re-export for cleaner imports
pub use self::annotated::{AnnotatedBatch, AnnotatedVariant, combine_batches};
pub use self::context::{ContextAnnotation, FlankingContext};
pub use self::variant::VariantRecord;

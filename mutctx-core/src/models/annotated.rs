use std::fmt::{self, Display};

use crate::models::context::ContextAnnotation;
use crate::models::variant::VariantRecord;

///
/// A variant with its coerced position, sequence context and signature flag.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct AnnotatedVariant {
    pub chrom: String,
    pub pos: u64,
    pub variant_type: String,
    pub reference: String,
    pub allele: String,
    pub context: ContextAnnotation,

    /// Set by signature classification; `false` until then.
    pub signature_context: bool,

    /// Batch the row came from. Assigned after per-batch annotation.
    pub origin_file: Option<String>,

    pub rest: Vec<(String, String)>,
}

impl AnnotatedVariant {
    pub fn new(record: VariantRecord, pos: u64, context: ContextAnnotation) -> Self {
        AnnotatedVariant {
            chrom: record.chrom,
            pos,
            variant_type: record.variant_type,
            reference: record.reference,
            allele: record.allele,
            context,
            signature_context: false,
            origin_file: None,
            rest: record.rest,
        }
    }

    pub fn passthrough(&self, column: &str) -> Option<&str> {
        self.rest
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }
}

impl Display for AnnotatedVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} {}>{} [{}]",
            self.chrom, self.pos, self.reference, self.allele, self.context.sequence
        )
    }
}

///
/// All annotated rows of one input batch.
///
/// `columns` is the batch's original header, used to write rows back out in
/// the order they came in.
///
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedBatch {
    pub origin: String,
    pub columns: Vec<String>,
    pub variants: Vec<AnnotatedVariant>,
}

impl AnnotatedBatch {
    pub fn new(origin: &str, columns: Vec<String>, variants: Vec<AnnotatedVariant>) -> Self {
        AnnotatedBatch {
            origin: origin.to_string(),
            columns,
            variants,
        }
    }

    ///
    /// Tag every row with this batch's origin
    ///
    pub fn tag_origin(&mut self) {
        for variant in self.variants.iter_mut() {
            variant.origin_file = Some(self.origin.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn signature_count(&self) -> usize {
        self.variants.iter().filter(|v| v.signature_context).count()
    }
}

///
/// Combine batches into one row set, in batch order.
///
/// Returns the union of the batches' headers (first-seen order) alongside the
/// rows. Each row is tagged with its batch origin.
///
pub fn combine_batches(batches: Vec<AnnotatedBatch>) -> (Vec<String>, Vec<AnnotatedVariant>) {
    let total: usize = batches.iter().map(|b| b.len()).sum();
    let mut columns: Vec<String> = Vec::new();
    let mut variants = Vec::with_capacity(total);

    for mut batch in batches {
        for column in &batch.columns {
            if !columns.contains(column) {
                columns.push(column.clone());
            }
        }
        batch.tag_origin();
        variants.append(&mut batch.variants);
    }

    (columns, variants)
}

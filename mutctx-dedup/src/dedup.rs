//! Cross-batch duplicate removal.
//!
//! Two rows are duplicates when they agree on chromosome, position, reference
//! base, allele base, context sequence and signature flag. The origin file and
//! passthrough columns play no part in identity.

use fxhash::{FxHashMap, FxHashSet};
use log::warn;

use mutctx_core::models::AnnotatedVariant;

use crate::report::{DedupReport, OriginSummary};

pub const UNKNOWN_ORIGIN: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DedupKey<'a> {
    pub chrom: &'a str,
    pub pos: u64,
    pub reference: &'a str,
    pub allele: &'a str,
    pub sequence: &'a str,
    pub signature_context: bool,
}

impl<'a> From<&'a AnnotatedVariant> for DedupKey<'a> {
    fn from(v: &'a AnnotatedVariant) -> Self {
        DedupKey {
            chrom: &v.chrom,
            pos: v.pos,
            reference: &v.reference,
            allele: &v.allele,
            sequence: &v.context.sequence,
            signature_context: v.signature_context,
        }
    }
}

///
/// Result of [`remove_duplicate_mutations`].
///
#[derive(Debug, Clone)]
pub struct DedupOutcome {
    /// First occurrence of every key, in input order.
    pub kept: Vec<AnnotatedVariant>,

    /// Every member of every key group with more than one row, in input order.
    pub duplicates: Vec<AnnotatedVariant>,

    pub report: DedupReport,
}

fn origin_of(v: &AnnotatedVariant) -> &str {
    v.origin_file.as_deref().unwrap_or(UNKNOWN_ORIGIN)
}

fn summarize(input: &[AnnotatedVariant], kept: &[AnnotatedVariant]) -> DedupReport {
    // origin order follows the input, so origins that lost every row still show up
    let mut order: Vec<&str> = Vec::new();
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for v in input {
        let origin = origin_of(v);
        if seen.insert(origin) {
            order.push(origin);
        }
    }

    let mut tallies: FxHashMap<&str, (usize, usize)> = FxHashMap::default();
    for v in kept {
        let tally = tallies.entry(origin_of(v)).or_insert((0, 0));
        tally.0 += 1;
        if v.signature_context {
            tally.1 += 1;
        }
    }

    let origins: Vec<OriginSummary> = order
        .into_iter()
        .map(|origin| {
            let (count, sig) = tallies.get(origin).copied().unwrap_or((0, 0));
            OriginSummary::new(origin, count, sig)
        })
        .collect();

    for origin in origins.iter().filter(|o| o.is_empty()) {
        warn!("{}: no rows remain after deduplication", origin.origin);
    }

    DedupReport {
        input_rows: input.len(),
        removed: input.len() - kept.len(),
        remaining: kept.len(),
        origins,
    }
}

///
/// Split a combined, classified record set into kept rows and the
/// duplicate audit set, and summarize the result per origin file.
///
/// # Arguments
/// - `variants`: rows of all batches, already tagged with their origin
///
/// # Returns
/// A [`DedupOutcome`]. Running this again on `kept` removes nothing.
///
pub fn remove_duplicate_mutations(variants: &[AnnotatedVariant]) -> DedupOutcome {
    let mut group_sizes: FxHashMap<DedupKey, usize> = FxHashMap::default();
    for v in variants {
        *group_sizes.entry(DedupKey::from(v)).or_insert(0) += 1;
    }

    let mut kept = Vec::with_capacity(group_sizes.len());
    let mut duplicates = Vec::new();
    let mut emitted: FxHashSet<DedupKey> = FxHashSet::default();

    for v in variants {
        let key = DedupKey::from(v);
        if group_sizes.get(&key).copied().unwrap_or(0) > 1 {
            duplicates.push(v.clone());
        }
        if emitted.insert(key) {
            kept.push(v.clone());
        }
    }

    let report = summarize(variants, &kept);

    DedupOutcome {
        kept,
        duplicates,
        report,
    }
}

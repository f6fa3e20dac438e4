use anyhow::Result;

use crate::models::FlankingContext;

///
/// Batch access to reference sequence around variant positions.
///
/// One call serves a whole batch: `loci` are `(chromosome, 1-based position)`
/// pairs and the returned vector must have the same length and order. A
/// `None` entry marks a position the reference could not serve (unknown
/// chromosome, position outside the contig). Pieces near a contig edge may be
/// shorter than `flank`.
///
/// Implementations are shared read-only across batch workers, hence `Sync`.
///
pub trait ContextLookup: Sync {
    fn lookup(&self, loci: &[(String, u64)], flank: usize) -> Result<Vec<Option<FlankingContext>>>;
}

//! Reshape a batch lookup answer into per-row context annotations.
//!
//! The lookup is trusted for sequence but not for shape: its answer is
//! checked against the request before anything is zipped back onto rows.

use mutctx_core::lookup::ContextLookup;
use mutctx_core::models::{ContextAnnotation, FlankingContext};

use crate::errors::{ContextError, Result};

fn check_alignment(
    row: usize,
    chrom: &str,
    pos: u64,
    ctx: &FlankingContext,
    flank: usize,
) -> Result<()> {
    if ctx.chrom != chrom || ctx.pos != pos {
        return Err(ContextError::LookupContractViolation(format!(
            "row {} requested {}:{} but the lookup answered for {}:{}",
            row + 1,
            chrom,
            pos,
            ctx.chrom,
            ctx.pos
        )));
    }

    let left = ctx.left.chars().count();
    let center = ctx.center.chars().count();
    let right = ctx.right.chars().count();
    if left > flank || right > flank || center > 1 {
        return Err(ContextError::LookupContractViolation(format!(
            "row {} ({}:{}) got pieces of length {}/{}/{} for flank {}",
            row + 1,
            chrom,
            pos,
            left,
            center,
            right,
            flank
        )));
    }

    Ok(())
}

///
/// Query `lookup` once for the whole batch and turn its answer into one
/// [`ContextAnnotation`] per locus, in request order.
///
/// A `None` answer becomes an empty annotation for the requested chromosome.
///
/// # Errors
/// - `LookupContractViolation` if the answer has the wrong length, answers
///   for a different locus than requested at some index, or returns pieces
///   longer than asked for.
/// - `Lookup` if the lookup itself fails.
///
pub fn fetch_context<L: ContextLookup + ?Sized>(
    lookup: &L,
    loci: &[(String, u64)],
    flank: usize,
) -> Result<Vec<ContextAnnotation>> {
    let answers = lookup.lookup(loci, flank)?;

    if answers.len() != loci.len() {
        return Err(ContextError::LookupContractViolation(format!(
            "requested {} loci but the lookup returned {}",
            loci.len(),
            answers.len()
        )));
    }

    answers
        .into_iter()
        .zip(loci)
        .enumerate()
        .map(|(row, (answer, (chrom, pos)))| match answer {
            Some(ctx) => {
                check_alignment(row, chrom, *pos, &ctx, flank)?;
                Ok(ContextAnnotation::from(ctx))
            }
            None => Ok(ContextAnnotation::missing(chrom)),
        })
        .collect()
}

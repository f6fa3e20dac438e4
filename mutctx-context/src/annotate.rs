use log::debug;

use mutctx_core::config::ContextConfig;
use mutctx_core::lookup::ContextLookup;
use mutctx_core::models::{AnnotatedVariant, VariantRecord};

use crate::errors::{ContextError, Result};
use crate::fetch::fetch_context;

///
/// Parse a raw position cell as a non-negative integer.
///
/// Integral float text such as `100.0` is accepted, since spreadsheet
/// exports often write whole numbers that way. Fractional, negative and
/// non-finite values are rejected.
///
pub fn coerce_position(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Ok(pos) = raw.parse::<u64>() {
        return Some(pos);
    }

    let value = raw.parse::<f64>().ok()?;
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > u64::MAX as f64 {
        return None;
    }
    Some(value as u64)
}

///
/// Coerce every record's position, failing on the first malformed one.
///
/// # Errors
/// `MalformedInput` naming the 1-based row and the offending value.
///
pub fn coerce_positions(records: &[VariantRecord]) -> Result<Vec<u64>> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            coerce_position(&record.pos).ok_or_else(|| ContextError::MalformedInput {
                row: i + 1,
                value: record.pos.clone(),
            })
        })
        .collect()
}

///
/// Drop variants whose context does not span the full `2 * flank + 1` window.
///
pub fn filter_full_context(variants: Vec<AnnotatedVariant>, flank: usize) -> Vec<AnnotatedVariant> {
    let before = variants.len();
    let kept: Vec<AnnotatedVariant> = variants
        .into_iter()
        .filter(|v| v.context.is_complete(flank))
        .collect();

    let dropped = before - kept.len();
    if dropped > 0 {
        debug!(
            "Dropped {} of {} variants without a full {}bp context",
            dropped,
            before,
            2 * flank + 1
        );
    }
    kept
}

///
/// Attach reference context to a batch of variant records.
///
/// Positions are coerced first so a malformed row fails the batch before
/// the lookup is touched. The lookup is then queried once for the whole
/// batch and its answers are zipped back onto the records in order. With
/// `require_full_context` set, rows whose context is truncated or missing
/// are dropped.
///
/// # Arguments
/// - `records`: substitution rows of one batch
/// - `lookup`: reference context source
/// - `config`: flank size and the full-context filter switch
///
/// # Returns
/// Annotated variants with `signature_context` still unset.
///
pub fn annotate_genomic_context<L: ContextLookup + ?Sized>(
    records: Vec<VariantRecord>,
    lookup: &L,
    config: &ContextConfig,
) -> Result<Vec<AnnotatedVariant>> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let positions = coerce_positions(&records)?;
    debug!(
        "Fetching {}bp context for {} variants",
        config.expected_length(),
        records.len()
    );
    let loci: Vec<(String, u64)> = records
        .iter()
        .zip(&positions)
        .map(|(record, pos)| (record.chrom.clone(), *pos))
        .collect();

    let contexts = fetch_context(lookup, &loci, config.flank)?;

    let annotated: Vec<AnnotatedVariant> = records
        .into_iter()
        .zip(positions)
        .zip(contexts)
        .map(|((record, pos), context)| AnnotatedVariant::new(record, pos, context))
        .collect();

    if config.require_full_context {
        Ok(filter_full_context(annotated, config.flank))
    } else {
        Ok(annotated)
    }
}

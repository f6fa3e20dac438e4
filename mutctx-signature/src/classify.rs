use log::debug;

use mutctx_core::models::AnnotatedVariant;

use crate::consts::*;

fn one_of(value: &str, options: &[&str]) -> bool {
    options.iter().any(|o| *o == value)
}

fn matches(reference: &str, allele: &str, sequence: &str) -> bool {
    (reference == FORWARD_REFERENCE
        && one_of(allele, &FORWARD_ALLELES)
        && one_of(sequence, &FORWARD_CONTEXTS))
        || (reference == REVERSE_REFERENCE
            && one_of(allele, &REVERSE_ALLELES)
            && one_of(sequence, &REVERSE_CONTEXTS))
}

///
/// True when the substitution sits in an A3A-like context.
///
/// Case-insensitive; the inputs are not modified. Only exact matches count,
/// so a sequence that is not three bases long, or that carries ambiguity
/// codes, is never a match.
///
pub fn is_a3a_context(reference: &str, allele: &str, sequence: &str) -> bool {
    matches(
        &reference.to_ascii_uppercase(),
        &allele.to_ascii_uppercase(),
        &sequence.to_ascii_uppercase(),
    )
}

///
/// Uppercase the reference base, allele base and context sequence in place.
///
/// The flank pieces are uppercased too, so the written `sequence` stays the
/// concatenation of the pieces.
///
pub fn normalize_case(variants: &mut [AnnotatedVariant]) {
    for v in variants.iter_mut() {
        v.reference.make_ascii_uppercase();
        v.allele.make_ascii_uppercase();
        v.context.left_flank.make_ascii_uppercase();
        v.context.center_base.make_ascii_uppercase();
        v.context.right_flank.make_ascii_uppercase();
        v.context.sequence.make_ascii_uppercase();
    }
}

///
/// Normalize case, then set `signature_context` on every variant.
///
/// Returns the number of variants flagged.
///
pub fn classify_signature_context(variants: &mut [AnnotatedVariant]) -> usize {
    normalize_case(variants);

    let mut flagged = 0;
    for v in variants.iter_mut() {
        v.signature_context = matches(&v.reference, &v.allele, &v.context.sequence);
        if v.signature_context {
            flagged += 1;
        }
    }

    debug!("{} of {} variants in A3A-like context", flagged, variants.len());
    flagged
}

///
/// Raw answer of a reference lookup for one locus.
///
/// `chrom` and `pos` echo the locus the pieces were taken from, which lets the
/// caller check that a batch answer lines up with its request.
///
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct FlankingContext {
    pub left: String,
    pub center: String,
    pub right: String,
    pub chrom: String,
    pub pos: u64,
}

///
/// Sequence context attached to an annotated variant.
///
/// Always built through [`ContextAnnotation::from_pieces`] or
/// [`ContextAnnotation::missing`], so `sequence` is the concatenation of the
/// three pieces and `sequence_length` its length.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, Default)]
pub struct ContextAnnotation {
    pub left_flank: String,
    pub center_base: String,
    pub right_flank: String,
    pub context_chrom: String,
    pub sequence: String,
    pub sequence_length: usize,
}

impl ContextAnnotation {
    pub fn from_pieces(left: &str, center: &str, right: &str, chrom: &str) -> Self {
        let sequence = format!("{}{}{}", left, center, right);
        let sequence_length = sequence.chars().count();
        ContextAnnotation {
            left_flank: left.to_string(),
            center_base: center.to_string(),
            right_flank: right.to_string(),
            context_chrom: chrom.to_string(),
            sequence,
            sequence_length,
        }
    }

    ///
    /// Empty context for a locus the reference could not serve.
    ///
    pub fn missing(chrom: &str) -> Self {
        ContextAnnotation::from_pieces("", "", "", chrom)
    }

    ///
    /// True when the context spans the full `2 * flank + 1` window.
    ///
    pub fn is_complete(&self, flank: usize) -> bool {
        self.sequence_length == 2 * flank + 1
    }
}

impl From<FlankingContext> for ContextAnnotation {
    fn from(ctx: FlankingContext) -> Self {
        ContextAnnotation::from_pieces(&ctx.left, &ctx.center, &ctx.right, &ctx.chrom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("T", "C", "A", "TCA", 3)]
    #[case("GT", "C", "AG", "GTCAG", 5)]
    #[case("", "C", "A", "CA", 2)]
    #[case("", "A", "", "A", 1)]
    fn test_sequence_is_concatenation(
        #[case] left: &str,
        #[case] center: &str,
        #[case] right: &str,
        #[case] expected: &str,
        #[case] expected_len: usize,
    ) {
        let ctx = ContextAnnotation::from_pieces(left, center, right, "chr1");
        assert_eq!(ctx.sequence, expected);
        assert_eq!(ctx.sequence_length, expected_len);
        assert_eq!(ctx.sequence_length, ctx.sequence.len());
    }

    #[rstest]
    fn test_missing_context() {
        let ctx = ContextAnnotation::missing("chr7");
        assert_eq!(ctx.sequence, "");
        assert_eq!(ctx.sequence_length, 0);
        assert_eq!(ctx.context_chrom, "chr7");
        assert!(!ctx.is_complete(0));
    }

    #[rstest]
    fn test_is_complete() {
        let ctx = ContextAnnotation::from_pieces("T", "C", "A", "chr1");
        assert!(ctx.is_complete(1));
        assert!(!ctx.is_complete(2));

        let single = ContextAnnotation::from_pieces("", "C", "", "chr1");
        assert!(single.is_complete(0));
    }

    #[rstest]
    fn test_from_flanking_context() {
        let flanking = FlankingContext {
            left: "TT".to_string(),
            center: "C".to_string(),
            right: "A".to_string(),
            chrom: "chr2".to_string(),
            pos: 3,
        };
        let ctx = ContextAnnotation::from(flanking);
        assert_eq!(ctx.sequence, "TTCA");
        assert_eq!(ctx.context_chrom, "chr2");
    }
}

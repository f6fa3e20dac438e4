use std::fmt::{self, Display};

///
/// VariantRecord struct, one substitution call as read from a batch file.
///
/// `pos` is kept as the raw cell text; it is only coerced to an integer when
/// the batch is annotated, so a malformed value can be reported with its row.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct VariantRecord {
    pub chrom: String,
    pub pos: String,
    pub variant_type: String,
    pub reference: String,
    pub allele: String,

    /// Columns the pipeline does not interpret, as `(column, value)` in file order.
    pub rest: Vec<(String, String)>,
}

impl VariantRecord {
    pub fn new(chrom: &str, pos: &str, reference: &str, allele: &str) -> Self {
        VariantRecord {
            chrom: chrom.to_string(),
            pos: pos.to_string(),
            variant_type: String::new(),
            reference: reference.to_string(),
            allele: allele.to_string(),
            rest: Vec::new(),
        }
    }

    ///
    /// Look up a passthrough column by name
    ///
    pub fn passthrough(&self, column: &str) -> Option<&str> {
        self.rest
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }
}

impl Display for VariantRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {}>{}", self.chrom, self.pos, self.reference, self.allele)
    }
}

pub const LEFT_FLANK_COL: &str = "left_flank";
pub const CENTER_BASE_COL: &str = "center_base";
pub const RIGHT_FLANK_COL: &str = "right_flank";
pub const CONTEXT_CHROM_COL: &str = "context_chrom";
pub const SEQUENCE_COL: &str = "sequence";
pub const SEQUENCE_LENGTH_COL: &str = "sequence_length";
pub const SIGNATURE_CONTEXT_COL: &str = "signature_context";
pub const ORIGIN_FILE_COL: &str = "origin_file";

/// Columns appended to every annotated table, in output order.
pub const ANNOTATION_COLUMNS: [&str; 7] = [
    LEFT_FLANK_COL,
    CENTER_BASE_COL,
    RIGHT_FLANK_COL,
    CONTEXT_CHROM_COL,
    SEQUENCE_COL,
    SEQUENCE_LENGTH_COL,
    SIGNATURE_CONTEXT_COL,
];

pub const MASTER_TABLE_NAME: &str = "master_annotated_calls_deduped.csv";
pub const DUPLICATES_TABLE_NAME: &str = "duplicate_rows.csv";

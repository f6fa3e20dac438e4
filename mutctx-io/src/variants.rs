use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use mutctx_core::config::{ColumnConfig, PipelineConfig};
use mutctx_core::models::VariantRecord;
use mutctx_core::utils::{batch_name, get_dynamic_reader};

use crate::consts::{ANNOTATION_COLUMNS, ORIGIN_FILE_COL};
use crate::error::{Result, VariantTableError};

///
/// One input batch: its header and the substitution rows that passed the
/// type filter.
///
#[derive(Debug, Clone, PartialEq)]
pub struct VariantTable {
    pub name: String,
    pub columns: Vec<String>,
    pub records: Vec<VariantRecord>,

    /// Rows dropped because their type tag was not the substitution tag.
    pub skipped: usize,
}

/// Header positions of the interpreted columns.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CoreIndices {
    pub chrom: usize,
    pub pos: usize,
    pub variant_type: usize,
    pub reference: usize,
    pub allele: usize,
}

impl CoreIndices {
    pub(crate) fn contains(&self, idx: usize) -> bool {
        [self.chrom, self.pos, self.variant_type, self.reference, self.allele].contains(&idx)
    }
}

pub(crate) fn find_column(headers: &StringRecord, column: &str, file: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| VariantTableError::MissingColumn {
            file: file.to_string(),
            column: column.to_string(),
        })
}

pub(crate) fn locate_columns(
    headers: &StringRecord,
    columns: &ColumnConfig,
    file: &str,
) -> Result<CoreIndices> {
    Ok(CoreIndices {
        chrom: find_column(headers, &columns.chromosome, file)?,
        pos: find_column(headers, &columns.position, file)?,
        variant_type: find_column(headers, &columns.variant_type, file)?,
        reference: find_column(headers, &columns.reference, file)?,
        allele: find_column(headers, &columns.allele, file)?,
    })
}

/// Passthrough columns are written next to the annotation columns, so a name
/// clash would give the output a duplicate header.
fn check_reserved_columns(headers: &StringRecord, file: &str) -> Result<()> {
    let reserved = headers
        .iter()
        .find(|h| *h == ORIGIN_FILE_COL || ANNOTATION_COLUMNS.iter().any(|c| c == h));
    match reserved {
        Some(column) => Err(VariantTableError::ReservedColumn {
            file: file.to_string(),
            column: column.to_string(),
        }),
        None => Ok(()),
    }
}

///
/// Drop a trailing decoration from a chromosome name, e.g. the " mapping"
/// suffix CLC appends to reference names.
///
pub fn strip_chrom_suffix(chrom: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        return chrom.to_string();
    }
    chrom.strip_suffix(suffix).unwrap_or(chrom).to_string()
}

///
/// Read a variant-call CSV (plain or `.gz`) into a [`VariantTable`].
///
/// Only rows tagged with the configured substitution tag are kept, and the
/// configured chromosome suffix is stripped. Positions are kept as text.
///
/// # Arguments
/// - path: the batch file
/// - config: column names and read filters
///
pub fn read_variant_table<P: AsRef<Path>>(path: P, config: &PipelineConfig) -> Result<VariantTable> {
    let path = path.as_ref();
    let reader = get_dynamic_reader(path)
        .map_err(|e| VariantTableError::FileRead(format!("{:#}", e)))?;
    read_variant_table_from_reader(reader, &batch_name(path), config)
}

pub fn read_variant_table_from_reader<R: Read>(
    reader: R,
    name: &str,
    config: &PipelineConfig,
) -> Result<VariantTable> {
    let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let idx = locate_columns(&headers, &config.columns, name)?;
    check_reserved_columns(&headers, name)?;
    let columns: Vec<String> = headers.iter().map(String::from).collect();

    let mut records = Vec::new();
    let mut skipped = 0;

    for result in csv_reader.records() {
        let row = result?;
        let cell = |i: usize| row.get(i).unwrap_or("").to_string();

        let variant_type = cell(idx.variant_type);
        if variant_type != config.filter.substitution_tag {
            skipped += 1;
            continue;
        }

        let rest = columns
            .iter()
            .enumerate()
            .filter(|(_, column)| !config.columns.is_core_column(column))
            .map(|(i, column)| (column.clone(), cell(i)))
            .collect();

        records.push(VariantRecord {
            chrom: strip_chrom_suffix(&cell(idx.chrom), &config.filter.chrom_suffix),
            pos: cell(idx.pos),
            variant_type,
            reference: cell(idx.reference),
            allele: cell(idx.allele),
            rest,
        });
    }

    log::debug!(
        "{}: read {} substitution rows, skipped {} other rows",
        name,
        records.len(),
        skipped
    );

    Ok(VariantTable {
        name: name.to_string(),
        columns,
        records,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    use std::path::PathBuf;

    fn get_test_path(file_name: &str) -> PathBuf {
        std::env::current_dir()
            .unwrap()
            .join("../tests/data/calls")
            .join(file_name)
    }

    const CLC_EXPORT: &str = "\
Mapping,Reference Position,Type,Reference,Allele,Frequency
chr1 mapping,4,SNV,C,T,48.2
chr1 mapping,7,Deletion,G,-,12.0
chr2 mapping,12.0,SNV,g,a,99.1
";

    #[rstest]
    fn test_reads_snv_rows_only() {
        let table = read_variant_table_from_reader(
            CLC_EXPORT.as_bytes(),
            "sample.csv",
            &PipelineConfig::default(),
        )
        .unwrap();

        assert_eq!(table.name, "sample.csv");
        assert_eq!(table.records.len(), 2);
        assert_eq!(table.skipped, 1);
        assert_eq!(
            table.columns,
            vec!["Mapping", "Reference Position", "Type", "Reference", "Allele", "Frequency"]
        );
    }

    #[rstest]
    fn test_strips_suffix_and_keeps_raw_position() {
        let table = read_variant_table_from_reader(
            CLC_EXPORT.as_bytes(),
            "sample.csv",
            &PipelineConfig::default(),
        )
        .unwrap();

        let second = &table.records[1];
        assert_eq!(second.chrom, "chr2");
        assert_eq!(second.pos, "12.0");
        assert_eq!(second.reference, "g");
        assert_eq!(second.allele, "a");
        assert_eq!(second.rest, vec![("Frequency".to_string(), "99.1".to_string())]);
    }

    #[rstest]
    fn test_suffix_stripping_disabled() {
        let mut config = PipelineConfig::default();
        config.filter.chrom_suffix = String::new();

        let table =
            read_variant_table_from_reader(CLC_EXPORT.as_bytes(), "sample.csv", &config).unwrap();
        assert_eq!(table.records[0].chrom, "chr1 mapping");
    }

    #[rstest]
    #[case("chr1 mapping", " mapping", "chr1")]
    #[case("chr1", " mapping", "chr1")]
    #[case("mapping chr1", " mapping", "mapping chr1")]
    #[case("chr1 mapping", "", "chr1 mapping")]
    fn test_strip_chrom_suffix(#[case] chrom: &str, #[case] suffix: &str, #[case] expected: &str) {
        assert_eq!(strip_chrom_suffix(chrom, suffix), expected);
    }

    #[rstest]
    #[case("sequence")]
    #[case("signature_context")]
    #[case("origin_file")]
    fn test_reserved_column_rejected(#[case] reserved: &str) {
        let data = format!(
            "Mapping,Reference Position,Type,Reference,Allele,{}\nchr1,4,SNV,C,T,x\n",
            reserved
        );
        let result =
            read_variant_table_from_reader(data.as_bytes(), "clash.csv", &PipelineConfig::default());

        match result {
            Err(VariantTableError::ReservedColumn { file, column }) => {
                assert_eq!(file, "clash.csv");
                assert_eq!(column, reserved);
            }
            other => panic!("expected ReservedColumn, got {:?}", other),
        }
    }

    #[rstest]
    fn test_missing_column() {
        let data = "Mapping,Type,Reference,Allele\nchr1,SNV,C,T\n";
        let result =
            read_variant_table_from_reader(data.as_bytes(), "broken.csv", &PipelineConfig::default());

        match result {
            Err(VariantTableError::MissingColumn { file, column }) => {
                assert_eq!(file, "broken.csv");
                assert_eq!(column, "Reference Position");
            }
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[rstest]
    fn test_ragged_row_is_csv_error() {
        let data = "Mapping,Reference Position,Type,Reference,Allele\nchr1,4,SNV,C\n";
        let result =
            read_variant_table_from_reader(data.as_bytes(), "ragged.csv", &PipelineConfig::default());
        assert!(matches!(result, Err(VariantTableError::Csv(_))));
    }

    #[rstest]
    fn test_read_from_repo_data() {
        let path = get_test_path("batch_a.csv");
        let table = read_variant_table(&path, &PipelineConfig::default()).unwrap();
        assert_eq!(table.name, "batch_a.csv");
        assert!(table.records.iter().all(|r| r.variant_type == "SNV"));
        assert!(table.records.iter().all(|r| !r.chrom.ends_with(" mapping")));
    }

    #[rstest]
    fn test_read_missing_file() {
        let result = read_variant_table(get_test_path("nope.csv"), &PipelineConfig::default());
        assert!(matches!(result, Err(VariantTableError::FileRead(_))));
    }
}

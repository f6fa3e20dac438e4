use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use csv::StringRecord;

use mutctx_core::config::ColumnConfig;
use mutctx_core::models::{AnnotatedBatch, AnnotatedVariant, ContextAnnotation};
use mutctx_core::utils::{batch_name, get_dynamic_reader};

use crate::consts::*;
use crate::error::{Result, VariantTableError};
use crate::variants::{find_column, locate_columns};

fn format_flag(flag: bool) -> &'static str {
    if flag { "True" } else { "False" }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Value of `column` for `variant`: typed value for interpreted columns,
/// passthrough value otherwise (empty when the row's batch lacked the column).
fn cell_value(variant: &AnnotatedVariant, column: &str, columns: &ColumnConfig) -> String {
    if column == columns.chromosome {
        variant.chrom.clone()
    } else if column == columns.position {
        variant.pos.to_string()
    } else if column == columns.variant_type {
        variant.variant_type.clone()
    } else if column == columns.reference {
        variant.reference.clone()
    } else if column == columns.allele {
        variant.allele.clone()
    } else {
        variant.passthrough(column).unwrap_or("").to_string()
    }
}

///
/// Write annotated rows as CSV.
///
/// The header is `header` (input columns) followed by the annotation columns,
/// and, when `with_origin` is set, a trailing `origin_file` column.
///
pub fn write_annotated_table<W: Write>(
    writer: W,
    header: &[String],
    rows: &[AnnotatedVariant],
    columns: &ColumnConfig,
    with_origin: bool,
) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut out_header: Vec<&str> = header.iter().map(String::as_str).collect();
    out_header.extend(ANNOTATION_COLUMNS);
    if with_origin {
        out_header.push(ORIGIN_FILE_COL);
    }
    csv_writer.write_record(&out_header)?;

    for variant in rows {
        let mut record: Vec<String> = header
            .iter()
            .map(|column| cell_value(variant, column, columns))
            .collect();

        let ctx = &variant.context;
        record.push(ctx.left_flank.clone());
        record.push(ctx.center_base.clone());
        record.push(ctx.right_flank.clone());
        record.push(ctx.context_chrom.clone());
        record.push(ctx.sequence.clone());
        record.push(ctx.sequence_length.to_string());
        record.push(format_flag(variant.signature_context).to_string());
        if with_origin {
            record.push(variant.origin_file.clone().unwrap_or_default());
        }

        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

fn create_output<P: AsRef<Path>>(path: P) -> Result<BufWriter<File>> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(BufWriter::new(File::create(path)?))
}

///
/// Persist one annotated batch, in its own column order, without an origin column.
///
pub fn write_annotated_batch<P: AsRef<Path>>(
    path: P,
    batch: &AnnotatedBatch,
    columns: &ColumnConfig,
) -> Result<()> {
    let file = create_output(path)?;
    write_annotated_table(file, &batch.columns, &batch.variants, columns, false)
}

///
/// Persist rows gathered from several batches (master or duplicate-audit
/// table), with a trailing `origin_file` column.
///
pub fn write_combined_table<P: AsRef<Path>>(
    path: P,
    header: &[String],
    rows: &[AnnotatedVariant],
    columns: &ColumnConfig,
) -> Result<()> {
    let file = create_output(path)?;
    write_annotated_table(file, header, rows, columns, true)
}

///
/// Read a persisted annotated batch back in, e.g. to deduplicate batches that
/// were annotated in earlier runs. The batch origin is the file name.
///
pub fn read_annotated_batch<P: AsRef<Path>>(path: P, columns: &ColumnConfig) -> Result<AnnotatedBatch> {
    let path = path.as_ref();
    let reader = get_dynamic_reader(path)
        .map_err(|e| VariantTableError::FileRead(format!("{:#}", e)))?;
    read_annotated_from_reader(reader, &batch_name(path), columns)
}

pub fn read_annotated_from_reader<R: Read>(
    reader: R,
    name: &str,
    columns: &ColumnConfig,
) -> Result<AnnotatedBatch> {
    let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers: StringRecord = csv_reader.headers()?.clone();

    let core = locate_columns(&headers, columns, name)?;
    let mut annotation_idx = [0usize; 7];
    for (slot, column) in annotation_idx.iter_mut().zip(ANNOTATION_COLUMNS) {
        *slot = find_column(&headers, column, name)?;
    }
    let [left_i, center_i, right_i, chrom_i, seq_i, len_i, sig_i] = annotation_idx;

    let is_annotation =
        |column: &str| ANNOTATION_COLUMNS.iter().any(|c| *c == column) || column == ORIGIN_FILE_COL;
    let batch_columns: Vec<String> = headers
        .iter()
        .filter(|h| !is_annotation(*h))
        .map(String::from)
        .collect();

    let mut variants = Vec::new();
    for result in csv_reader.records() {
        let row = result?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        let cell = |i: usize| row.get(i).unwrap_or("");
        let malformed = |column: &str, value: &str| VariantTableError::MalformedCell {
            file: name.to_string(),
            line,
            column: column.to_string(),
            value: value.to_string(),
        };

        let pos = cell(core.pos)
            .parse::<u64>()
            .map_err(|_| malformed(&columns.position, cell(core.pos)))?;
        let sequence_length = cell(len_i)
            .parse::<usize>()
            .map_err(|_| malformed(SEQUENCE_LENGTH_COL, cell(len_i)))?;
        let signature_context =
            parse_flag(cell(sig_i)).ok_or_else(|| malformed(SIGNATURE_CONTEXT_COL, cell(sig_i)))?;

        let context =
            ContextAnnotation::from_pieces(cell(left_i), cell(center_i), cell(right_i), cell(chrom_i));
        if context.sequence != cell(seq_i) || context.sequence_length != sequence_length {
            return Err(VariantTableError::InconsistentContext {
                file: name.to_string(),
                line,
            });
        }

        let rest = headers
            .iter()
            .enumerate()
            .filter(|(i, h)| !core.contains(*i) && !is_annotation(*h))
            .map(|(i, h)| (h.to_string(), cell(i).to_string()))
            .collect();

        variants.push(AnnotatedVariant {
            chrom: cell(core.chrom).to_string(),
            pos,
            variant_type: cell(core.variant_type).to_string(),
            reference: cell(core.reference).to_string(),
            allele: cell(core.allele).to_string(),
            context,
            signature_context,
            origin_file: None,
            rest,
        });
    }

    Ok(AnnotatedBatch::new(name, batch_columns, variants))
}

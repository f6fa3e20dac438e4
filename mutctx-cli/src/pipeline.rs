use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fxhash::FxHashMap;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use rayon::prelude::*;

use mutctx_context::annotate_genomic_context;
use mutctx_core::models::AnnotatedBatch;
use mutctx_core::utils::batch_name;
use mutctx_core::{ContextLookup, PipelineConfig, combine_batches};
use mutctx_dedup::{DedupReport, remove_duplicate_mutations};
use mutctx_io::{
    DUPLICATES_TABLE_NAME, MASTER_TABLE_NAME, read_annotated_batch, read_variant_table,
    write_annotated_batch, write_combined_table,
};
use mutctx_signature::classify_signature_context;

///
/// Batches that made it through a step, and the names of those that did not.
///
pub struct BatchResults {
    pub batches: Vec<AnnotatedBatch>,
    pub failed: Vec<String>,
    pub total: usize,
}

impl BatchResults {
    fn from_results(results: Vec<(String, Result<AnnotatedBatch>)>) -> Self {
        let total = results.len();
        let mut batches = Vec::with_capacity(total);
        let mut failed = Vec::new();
        for (name, result) in results {
            match result {
                Ok(batch) => batches.push(batch),
                Err(e) => {
                    error!("{}: {:#}", name, e);
                    failed.push(name);
                }
            }
        }
        BatchResults {
            batches,
            failed,
            total,
        }
    }

    ///
    /// Error out if any batch failed. Called once everything that could be
    /// done with the healthy batches is done.
    ///
    pub fn ensure_complete(&self) -> Result<()> {
        if !self.failed.is_empty() {
            anyhow::bail!(
                "{} of {} batches failed: {}",
                self.failed.len(),
                self.total,
                self.failed.join(", ")
            );
        }
        Ok(())
    }
}

fn progress_bar(len: usize, what: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!("[{{elapsed_precise}}] {{bar:40.cyan/blue}} {{pos}}/{{len}} {}", what))?,
    );
    Ok(pb)
}

///
/// Refuse inputs that would share an origin and an output file, such as
/// `d1/a.csv` next to `d2/a.csv` or `a.csv` next to `a.csv.gz`.
///
pub fn ensure_unique_batch_names(files: &[PathBuf]) -> Result<()> {
    let mut seen: FxHashMap<String, &PathBuf> = FxHashMap::default();
    for path in files {
        let name = batch_name(path);
        if let Some(first) = seen.get(&name) {
            anyhow::bail!(
                "Batches {} and {} share the name {}",
                first.display(),
                path.display(),
                name
            );
        }
        seen.insert(name, path);
    }
    Ok(())
}

///
/// Read, annotate, classify and persist one batch.
///
pub fn annotate_batch<L: ContextLookup + ?Sized>(
    path: &Path,
    lookup: &L,
    config: &PipelineConfig,
    output_dir: &Path,
) -> Result<AnnotatedBatch> {
    let table = read_variant_table(path, config)
        .with_context(|| format!("Failed to read batch: {}", path.display()))?;

    let mut variants = annotate_genomic_context(table.records, lookup, &config.context)
        .with_context(|| format!("Failed to annotate batch: {}", path.display()))?;
    let flagged = classify_signature_context(&mut variants);

    let batch = AnnotatedBatch::new(&table.name, table.columns, variants);
    let out_path = output_dir.join(&batch.origin);
    write_annotated_batch(&out_path, &batch, &config.columns)
        .with_context(|| format!("Failed to write annotated batch: {}", out_path.display()))?;

    info!(
        "{}: {} variants annotated, {} in A3A-like context",
        batch.origin,
        batch.len(),
        flagged
    );

    Ok(batch)
}

///
/// Annotate every batch on a rayon pool, keeping input order.
///
/// A failing batch is logged and left out of the result; its siblings carry on.
///
pub fn annotate_batches<L: ContextLookup + ?Sized>(
    files: &[PathBuf],
    lookup: &L,
    config: &PipelineConfig,
    output_dir: &Path,
    threads: Option<usize>,
) -> Result<BatchResults> {
    ensure_unique_batch_names(files)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads.unwrap_or(0))
        .build()
        .context("Failed to build thread pool")?;

    let pb = progress_bar(files.len(), "batches annotated")?;

    let results: Vec<(String, Result<AnnotatedBatch>)> = pool.install(|| {
        files
            .par_iter()
            .map(|path| {
                let result = annotate_batch(path, lookup, config, output_dir);
                pb.inc(1);
                (batch_name(path), result)
            })
            .collect()
    });
    pb.finish_and_clear();

    Ok(BatchResults::from_results(results))
}

///
/// Read previously annotated batches back in; the origin is the file name.
///
pub fn read_annotated_batches(files: &[PathBuf], config: &PipelineConfig) -> Result<BatchResults> {
    ensure_unique_batch_names(files)?;

    let results = files
        .iter()
        .map(|path| {
            let result = read_annotated_batch(path, &config.columns)
                .with_context(|| format!("Failed to read annotated batch: {}", path.display()));
            (batch_name(path), result)
        })
        .collect();

    Ok(BatchResults::from_results(results))
}

///
/// Combine batches, drop duplicates and write the master and audit tables.
///
/// The report is printed to stdout and, with `report_path`, saved as JSON.
///
pub fn deduplicate_batches(
    batches: Vec<AnnotatedBatch>,
    config: &PipelineConfig,
    output_dir: &Path,
    report_path: Option<&Path>,
) -> Result<DedupReport> {
    let (header, rows) = combine_batches(batches);
    let outcome = remove_duplicate_mutations(&rows);

    let master_path = output_dir.join(MASTER_TABLE_NAME);
    write_combined_table(&master_path, &header, &outcome.kept, &config.columns)
        .with_context(|| format!("Failed to write {}", master_path.display()))?;

    let duplicates_path = output_dir.join(DUPLICATES_TABLE_NAME);
    write_combined_table(&duplicates_path, &header, &outcome.duplicates, &config.columns)
        .with_context(|| format!("Failed to write {}", duplicates_path.display()))?;

    info!(
        "Wrote {} kept rows to {} and {} audit rows to {}",
        outcome.kept.len(),
        master_path.display(),
        outcome.duplicates.len(),
        duplicates_path.display()
    );

    println!("{}", outcome.report);

    if let Some(path) = report_path {
        write_report(path, &outcome.report)?;
    }

    Ok(outcome.report)
}

fn write_report(path: &Path, report: &DedupReport) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    use mutctx_refget::ReferenceGenome;
    use tempfile::tempdir;

    const BATCH_A: &str = "\
Mapping,Reference Position,Type,Reference,Allele,Frequency
chr1 mapping,4,SNV,C,T,48.2
chr1 mapping,8,SNV,T,C,20.0
";

    const BATCH_B: &str = "\
Mapping,Reference Position,Type,Reference,Allele,Frequency
chr1 mapping,4,SNV,C,T,51.0
";

    const BATCH_BAD: &str = "\
Mapping,Reference Position,Type,Reference,Allele,Frequency
chr1 mapping,four,SNV,C,T,51.0
";

    #[fixture]
    fn genome() -> ReferenceGenome {
        ReferenceGenome::from_sequences([("chr1", "AATCAGGTCT")])
    }

    #[rstest]
    fn test_failed_batch_does_not_stop_siblings(genome: ReferenceGenome) {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in");
        let out = dir.path().join("out");
        std::fs::create_dir_all(&input).unwrap();

        let files: Vec<PathBuf> = [("a.csv", BATCH_A), ("bad.csv", BATCH_BAD), ("b.csv", BATCH_B)]
            .iter()
            .map(|(name, contents)| {
                let path = input.join(name);
                std::fs::write(&path, contents).unwrap();
                path
            })
            .collect();

        let config = PipelineConfig::default();
        let results = annotate_batches(&files, &genome, &config, &out, Some(2)).unwrap();

        assert_eq!(results.failed, vec!["bad.csv"]);
        let origins: Vec<&str> = results.batches.iter().map(|b| b.origin.as_str()).collect();
        assert_eq!(origins, vec!["a.csv", "b.csv"]);
        assert!(out.join("a.csv").exists());
        assert!(!out.join("bad.csv").exists());
        assert!(results.ensure_complete().is_err());

        let report_path = out.join("report.json");
        let report = deduplicate_batches(results.batches, &config, &out, Some(&report_path)).unwrap();
        assert_eq!(report.removed, 1);
        assert_eq!(report.remaining, 2);
        assert!(out.join(MASTER_TABLE_NAME).exists());
        assert!(out.join(DUPLICATES_TABLE_NAME).exists());

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
        assert_eq!(json["remaining"], 2);
    }

    #[rstest]
    #[case::same_name_in_two_dirs("d1/a.csv", "d2/a.csv")]
    #[case::plain_and_gzipped("in/a.csv", "in/a.csv.gz")]
    fn test_clashing_batch_names_are_refused(
        genome: ReferenceGenome,
        #[case] first: &str,
        #[case] second: &str,
    ) {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out");
        let files: Vec<PathBuf> = [first, second].iter().map(|p| dir.path().join(p)).collect();
        for path in &files {
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, BATCH_A).unwrap();
        }

        let config = PipelineConfig::default();
        let err = annotate_batches(&files, &genome, &config, &out, Some(2))
            .err()
            .expect("clashing names must be refused");
        let message = err.to_string();
        assert!(message.contains(&files[0].display().to_string()));
        assert!(message.contains(&files[1].display().to_string()));
        assert!(message.contains("a.csv"));
        assert!(!out.exists());

        assert!(read_annotated_batches(&files, &config).is_err());
    }

    #[rstest]
    fn test_distinct_batch_names_pass() {
        let files = vec![PathBuf::from("d1/a.csv"), PathBuf::from("d2/b.csv.gz")];
        assert!(ensure_unique_batch_names(&files).is_ok());
    }

    #[rstest]
    fn test_reread_annotated_batches(genome: ReferenceGenome) {
        let dir = tempdir().unwrap();
        let input = dir.path().join("a.csv");
        std::fs::write(&input, BATCH_A).unwrap();
        let out = dir.path().join("out");

        let config = PipelineConfig::default();
        let batch = annotate_batch(&input, &genome, &config, &out).unwrap();

        let missing = dir.path().join("missing.csv");
        let results = read_annotated_batches(&[out.join("a.csv"), missing], &config).unwrap();
        assert_eq!(results.failed, vec!["missing.csv"]);
        assert_eq!(results.batches.len(), 1);
        assert_eq!(results.batches[0].variants, batch.variants);
    }
}

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use mutctx_core::utils::list_batch_files;
use mutctx_refget::load_fasta;

use crate::pipeline::{annotate_batches, deduplicate_batches, ensure_unique_batch_names};
use crate::shared::{get_path, get_threads, load_config};

pub fn run_pipeline(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    let fasta = get_path(matches, "fasta")?;
    let input_dir = get_path(matches, "input-dir")?;
    let output_dir = get_path(matches, "output-dir")?;
    let report_path = matches.get_one::<PathBuf>("report").map(PathBuf::as_path);

    let files = list_batch_files(input_dir)?;
    if files.is_empty() {
        anyhow::bail!("No .csv or .csv.gz files found in {}", input_dir.display());
    }
    ensure_unique_batch_names(&files)?;
    info!("Found {} batches in {}", files.len(), input_dir.display());

    let genome = load_fasta(fasta)
        .with_context(|| format!("Failed to load reference: {}", fasta.display()))?;

    let mut results = annotate_batches(&files, &genome, &config, output_dir, get_threads(matches))?;
    let batches = std::mem::take(&mut results.batches);
    deduplicate_batches(batches, &config, output_dir, report_path)?;

    results.ensure_complete()
}

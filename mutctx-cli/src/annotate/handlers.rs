use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use mutctx_refget::load_fasta;

use crate::pipeline::{annotate_batches, ensure_unique_batch_names};
use crate::shared::{get_path, get_threads, load_config};

pub fn run_annotate(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    let fasta = get_path(matches, "fasta")?;
    let output_dir = get_path(matches, "output-dir")?;
    let files: Vec<PathBuf> = matches
        .get_many::<PathBuf>("calls")
        .map(|paths| paths.cloned().collect())
        .unwrap_or_default();
    ensure_unique_batch_names(&files)?;

    let genome = load_fasta(fasta)
        .with_context(|| format!("Failed to load reference: {}", fasta.display()))?;

    let results = annotate_batches(&files, &genome, &config, output_dir, get_threads(matches))?;
    let variants: usize = results.batches.iter().map(|b| b.len()).sum();
    let flagged: usize = results.batches.iter().map(|b| b.signature_count()).sum();
    info!(
        "Annotated {} batches into {}: {} variants, {} in A3A-like context",
        results.batches.len(),
        output_dir.display(),
        variants,
        flagged
    );

    results.ensure_complete()
}

use std::path::PathBuf;

use anyhow::Result;
use clap::ArgMatches;

use crate::pipeline::{deduplicate_batches, read_annotated_batches};
use crate::shared::{get_path, load_config};

pub fn run_dedup(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    let output_dir = get_path(matches, "output-dir")?;
    let report_path = matches.get_one::<PathBuf>("report").map(PathBuf::as_path);
    let files: Vec<PathBuf> = matches
        .get_many::<PathBuf>("annotated")
        .map(|paths| paths.cloned().collect())
        .unwrap_or_default();

    let mut results = read_annotated_batches(&files, &config)?;
    let batches = std::mem::take(&mut results.batches);
    deduplicate_batches(batches, &config, output_dir, report_path)?;

    results.ensure_complete()
}

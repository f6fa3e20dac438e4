use std::ffi::OsStr;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    let reader = BufReader::new(file);

    Ok(reader)
}

///
/// Name a batch after its input file: the file name with any `.gz` suffix
/// dropped. Used both as the `origin_file` tag and as the per-batch output name.
///
pub fn batch_name(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string());

    match name.strip_suffix(".gz") {
        Some(stripped) => stripped.to_string(),
        None => name,
    }
}

///
/// True for `.csv` and `.csv.gz` files.
///
pub fn is_batch_file(path: &Path) -> bool {
    let name = batch_name(path);
    path.is_file() && name.to_lowercase().ends_with(".csv")
}

///
/// List every batch file directly inside `dir`, sorted by name so the origin
/// order of a run does not depend on directory iteration order.
///
pub fn list_batch_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read input directory: {:?}", dir))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if is_batch_file(&path) {
            files.push(path);
        }
    }
    files.sort();

    Ok(files)
}

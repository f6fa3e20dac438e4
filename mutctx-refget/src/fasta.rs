use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result};

use mutctx_core::utils::get_dynamic_reader;

use crate::genome::ReferenceGenome;

/// Split a FASTA header line (without the leading `>`) into the sequence name
/// and the optional description.
pub fn parse_fasta_header(header: &str) -> (String, Option<String>) {
    let header = header.trim();
    match header.split_once(char::is_whitespace) {
        Some((id, desc)) => (id.to_string(), Some(desc.trim().to_string())),
        None => (header.to_string(), None),
    }
}

/// Loads a FASTA file into an in-memory [`ReferenceGenome`].
///
/// Sequences are named by the first whitespace-delimited token of their header
/// line. Line wrapping, CRLF endings and blank lines are tolerated, and
/// gzipped files (ending in `.gz`) are decompressed on the fly. Bases are
/// kept as written.
///
/// # Errors
///
/// This function will return an error if:
/// - The file cannot be opened or read
/// - A header line has no name
/// - Two sequences share a name
/// - The file holds no sequences at all
///
/// # Examples
///
/// ```no_run
/// use mutctx_refget::fasta::load_fasta;
///
/// let genome = load_fasta("reference.fa").expect("Failed to load FASTA");
/// for name in genome.names() {
///     println!("{}: {} bp", name, genome.sequence_length(name).unwrap());
/// }
/// ```
pub fn load_fasta<P: AsRef<Path>>(file_path: P) -> Result<ReferenceGenome> {
    let file_path = file_path.as_ref();
    log::info!("Loading FASTA file: {}", file_path.display());

    let mut reader = get_dynamic_reader(file_path)?;
    let mut genome = ReferenceGenome::new();
    let mut line = String::new();
    let mut line_num = 0usize;

    let mut current_id: Option<String> = None;
    let mut sequence_data: Vec<u8> = Vec::new();

    loop {
        line.clear();
        let bytes_read = reader
            .read_line(&mut line)
            .with_context(|| format!("Failed to read line {} of {:?}", line_num + 1, file_path))?;
        if bytes_read == 0 {
            break;
        }
        line_num += 1;

        if let Some(header) = line.strip_prefix('>') {
            // Save previous sequence if any
            if let Some(id) = current_id.take() {
                push_sequence(&mut genome, id, std::mem::take(&mut sequence_data))?;
            }

            let (id, _description) = parse_fasta_header(header);
            if id.is_empty() {
                anyhow::bail!("Empty FASTA header on line {} of {:?}", line_num, file_path);
            }
            current_id = Some(id);
        } else if current_id.is_some() {
            sequence_data.extend_from_slice(line.trim_end().as_bytes());
        }
    }

    if let Some(id) = current_id.take() {
        push_sequence(&mut genome, id, sequence_data)?;
    }

    if genome.is_empty() {
        anyhow::bail!("No sequences found in FASTA file: {:?}", file_path);
    }

    log::info!("Loaded {} sequences from {}", genome.len(), file_path.display());

    Ok(genome)
}

fn push_sequence(genome: &mut ReferenceGenome, id: String, data: Vec<u8>) -> Result<()> {
    if !genome.insert(id.clone(), data) {
        anyhow::bail!("Duplicate sequence name in FASTA file: {}", id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    use std::fs::File;
    use std::io::Write;

    use flate2::Compression;
    use flate2::write::GzEncoder;

    #[rstest]
    #[case("chr1", "chr1", None)]
    #[case("chr1 Homo sapiens chromosome 1", "chr1", Some("Homo sapiens chromosome 1"))]
    #[case("  contig_7\tassembled  ", "contig_7", Some("assembled"))]
    fn test_parse_fasta_header(
        #[case] header: &str,
        #[case] name: &str,
        #[case] description: Option<&str>,
    ) {
        let (id, desc) = parse_fasta_header(header);
        assert_eq!(id, name);
        assert_eq!(desc.as_deref(), description);
    }

    #[rstest]
    fn test_load_fasta_from_repo_data() {
        let genome = load_fasta("../tests/data/fasta/reference.fa").expect("Failed to load FASTA");
        assert_eq!(genome.names(), &["chr1".to_string(), "chr2".to_string()]);
        assert_eq!(genome.sequence_length("chr1"), Some(120));
    }

    #[rstest]
    fn test_load_fasta_wrapped_crlf() {
        let mut file = tempfile::NamedTempFile::with_suffix(".fa").unwrap();
        write!(file, ">seq1 first\r\nACGT\r\nTTGG\r\n\r\n>seq2\r\nNNAA\r\n").unwrap();

        let genome = load_fasta(file.path()).unwrap();
        assert_eq!(genome.len(), 2);
        assert_eq!(genome.sequence_length("seq1"), Some(8));
        assert_eq!(genome.flanking("seq1", 5, 1).unwrap().left, "T");
        assert_eq!(genome.flanking("seq1", 5, 1).unwrap().center, "T");
        assert_eq!(genome.flanking("seq2", 4, 0).unwrap().center, "A");
    }

    #[rstest]
    fn test_load_fasta_gzipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ref.fa.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(b">chrM\nGATCACAGG\n").unwrap();
        encoder.finish().unwrap();

        let genome = load_fasta(&path).unwrap();
        assert_eq!(genome.sequence_length("chrM"), Some(9));
    }

    #[rstest]
    fn test_load_fasta_duplicate_names() {
        let mut file = tempfile::NamedTempFile::with_suffix(".fa").unwrap();
        write!(file, ">chr1\nACGT\n>chr1\nTTTT\n").unwrap();
        assert!(load_fasta(file.path()).is_err());
    }

    #[rstest]
    fn test_load_fasta_empty_file() {
        let file = tempfile::NamedTempFile::with_suffix(".fa").unwrap();
        assert!(load_fasta(file.path()).is_err());
    }

    #[rstest]
    fn test_load_fasta_missing_file() {
        assert!(load_fasta("../tests/data/fasta/does_not_exist.fa").is_err());
    }
}

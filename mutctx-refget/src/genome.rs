use anyhow::Result;
use fxhash::FxHashMap;

use mutctx_core::lookup::ContextLookup;
use mutctx_core::models::FlankingContext;

///
/// A whole reference genome held in memory, keyed by sequence name.
///
/// Bases are stored exactly as they appear in the FASTA, so soft-masked
/// (lowercase) regions stay lowercase in the returned context.
///
#[derive(Debug, Clone, Default)]
pub struct ReferenceGenome {
    sequences: FxHashMap<String, Vec<u8>>,
    names: Vec<String>,
}

impl ReferenceGenome {
    pub fn new() -> Self {
        ReferenceGenome::default()
    }

    ///
    /// Build a genome from `(name, sequence)` pairs. Mostly useful for tests
    /// and small fixtures.
    ///
    pub fn from_sequences<N, S>(sequences: impl IntoIterator<Item = (N, S)>) -> Self
    where
        N: Into<String>,
        S: AsRef<[u8]>,
    {
        let mut genome = ReferenceGenome::new();
        for (name, seq) in sequences {
            genome.insert(name.into(), seq.as_ref().to_vec());
        }
        genome
    }

    ///
    /// Add a sequence. Returns `false` (and keeps the old sequence) if the name
    /// is already present.
    ///
    pub fn insert(&mut self, name: String, seq: Vec<u8>) -> bool {
        if self.sequences.contains_key(&name) {
            return false;
        }
        self.names.push(name.clone());
        self.sequences.insert(name, seq);
        true
    }

    /// Sequence names in FASTA order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn sequence_length(&self, chrom: &str) -> Option<usize> {
        self.sequences.get(chrom).map(|s| s.len())
    }

    ///
    /// Pull the bases around a 1-based position.
    ///
    /// The center base is at index `pos - 1`; each flank takes up to `flank`
    /// bases and is cut short at the contig ends. Unknown chromosomes,
    /// position 0 and positions past the contig end give `None`.
    ///
    pub fn flanking(&self, chrom: &str, pos: u64, flank: usize) -> Option<FlankingContext> {
        let seq = self.sequences.get(chrom)?;
        if pos == 0 || pos > seq.len() as u64 {
            return None;
        }

        let idx = (pos - 1) as usize;
        let left_start = idx.saturating_sub(flank);
        let right_end = idx.saturating_add(1).saturating_add(flank).min(seq.len());

        Some(FlankingContext {
            left: String::from_utf8_lossy(&seq[left_start..idx]).to_string(),
            center: String::from_utf8_lossy(&seq[idx..idx + 1]).to_string(),
            right: String::from_utf8_lossy(&seq[idx + 1..right_end]).to_string(),
            chrom: chrom.to_string(),
            pos,
        })
    }
}

impl ContextLookup for ReferenceGenome {
    fn lookup(&self, loci: &[(String, u64)], flank: usize) -> Result<Vec<Option<FlankingContext>>> {
        let contexts: Vec<Option<FlankingContext>> = loci
            .iter()
            .map(|(chrom, pos)| self.flanking(chrom, *pos, flank))
            .collect();

        let missing = contexts.iter().filter(|c| c.is_none()).count();
        if missing > 0 {
            log::debug!(
                "{} of {} loci could not be served by the reference",
                missing,
                loci.len()
            );
        }

        Ok(contexts)
    }
}

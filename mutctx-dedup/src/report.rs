use std::fmt::{self, Display};

use serde::Serialize;

///
/// Per-origin tally of the rows that survived deduplication.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OriginSummary {
    pub origin: String,
    pub kept: usize,
    pub signature_context: usize,

    /// Share of kept rows in signature context, in percent. `None` when no
    /// rows of this origin were kept.
    pub signature_pct: Option<f64>,
}

impl OriginSummary {
    pub fn new(origin: &str, kept: usize, signature_context: usize) -> Self {
        let signature_pct = if kept == 0 {
            None
        } else {
            Some(signature_context as f64 / kept as f64 * 100.0)
        };
        OriginSummary {
            origin: origin.to_string(),
            kept,
            signature_context,
            signature_pct,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kept == 0
    }
}

impl Display for OriginSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.signature_pct {
            Some(pct) => write!(
                f,
                " - {}: {} mutations, {} ({:.2}%) in A3A-like context",
                self.origin, self.kept, self.signature_context, pct
            ),
            None => write!(f, " - {}: no rows remain after deduplication", self.origin),
        }
    }
}

///
/// Summary of one deduplication pass.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DedupReport {
    pub input_rows: usize,
    pub removed: usize,
    pub remaining: usize,

    /// One entry per origin, in order of first appearance in the input.
    pub origins: Vec<OriginSummary>,
}

impl DedupReport {
    ///
    /// Origins that lost every row to deduplication.
    ///
    pub fn empty_origins(&self) -> impl Iterator<Item = &OriginSummary> {
        self.origins.iter().filter(|o| o.is_empty())
    }
}

impl Display for DedupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Removed {} duplicate mutations. {} mutations remain:",
            self.removed, self.remaining
        )?;
        for origin in &self.origins {
            write!(f, "\n{}", origin)?;
        }
        Ok(())
    }
}

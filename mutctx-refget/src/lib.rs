//! # Reference genome access for mutctx
//!
//! Loads a FASTA file (plain or gzipped) into memory and answers batch
//! flanking-sequence queries through [`mutctx_core::ContextLookup`].
//!
//! ```no_run
//! use mutctx_core::ContextLookup;
//! use mutctx_refget::load_fasta;
//!
//! let genome = load_fasta("reference.fa").unwrap();
//! let loci = vec![("chr1".to_string(), 100)];
//! let contexts = genome.lookup(&loci, 1).unwrap();
//! ```

pub mod fasta;
pub mod genome;

pub use fasta::{load_fasta, parse_fasta_header};
pub use genome::ReferenceGenome;

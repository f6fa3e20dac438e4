// forward strand: C>T or C>G in a TCN window
pub const FORWARD_REFERENCE: &str = "C";
pub const FORWARD_ALLELES: [&str; 2] = ["T", "G"];
pub const FORWARD_CONTEXTS: [&str; 3] = ["TCA", "TCT", "TCG"];

// reverse strand: G>A or G>T in an NGA window
pub const REVERSE_REFERENCE: &str = "G";
pub const REVERSE_ALLELES: [&str; 2] = ["A", "T"];
pub const REVERSE_CONTEXTS: [&str; 3] = ["TGA", "AGA", "CGA"];

use std::fs::read_to_string;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, ConfigResult};

pub const DEFAULT_FLANK: usize = 1;
pub const DEFAULT_SUBSTITUTION_TAG: &str = "SNV";
pub const DEFAULT_CHROM_SUFFIX: &str = " mapping";

///
/// Names of the input columns the pipeline interprets. Everything else in a
/// batch is carried through untouched.
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ColumnConfig {
    pub chromosome: String,
    pub position: String,
    pub variant_type: String,
    pub reference: String,
    pub allele: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        ColumnConfig {
            chromosome: "Mapping".to_string(),
            position: "Reference Position".to_string(),
            variant_type: "Type".to_string(),
            reference: "Reference".to_string(),
            allele: "Allele".to_string(),
        }
    }
}

impl ColumnConfig {
    /// The interpreted columns as `(role, column name)` pairs.
    pub fn required(&self) -> [(&'static str, &str); 5] {
        [
            ("chromosome", self.chromosome.as_str()),
            ("position", self.position.as_str()),
            ("variant_type", self.variant_type.as_str()),
            ("reference", self.reference.as_str()),
            ("allele", self.allele.as_str()),
        ]
    }

    pub fn is_core_column(&self, name: &str) -> bool {
        self.required().iter().any(|(_, col)| *col == name)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FilterConfig {
    /// Only rows whose variant type equals this tag are read.
    pub substitution_tag: String,
    /// Stripped from chromosome names on read. Empty disables stripping.
    pub chrom_suffix: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig {
            substitution_tag: DEFAULT_SUBSTITUTION_TAG.to_string(),
            chrom_suffix: DEFAULT_CHROM_SUFFIX.to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ContextConfig {
    pub flank: usize,
    pub require_full_context: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        ContextConfig {
            flank: DEFAULT_FLANK,
            require_full_context: true,
        }
    }
}

impl ContextConfig {
    /// Length of a full, untruncated context window.
    pub fn expected_length(&self) -> usize {
        2 * self.flank + 1
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct PipelineConfig {
    pub columns: ColumnConfig,
    pub filter: FilterConfig,
    pub context: ContextConfig,
}

impl PipelineConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        for (role, name) in self.columns.required() {
            if name.trim().is_empty() {
                return Err(ConfigError::EmptyColumnName(role));
            }
        }
        Ok(())
    }
}

impl TryFrom<&Path> for PipelineConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let config: PipelineConfig = toml::from_str(&toml_str)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use std::io::Write;
    use std::path::PathBuf;

    #[rstest]
    fn test_defaults_match_clc_export() {
        let config = PipelineConfig::default();
        assert_eq!(config.columns.chromosome, "Mapping");
        assert_eq!(config.columns.position, "Reference Position");
        assert_eq!(config.filter.substitution_tag, "SNV");
        assert_eq!(config.filter.chrom_suffix, " mapping");
        assert_eq!(config.context.flank, 1);
        assert_eq!(config.context.require_full_context, true);
        assert_eq!(config.context.expected_length(), 3);
    }

    #[rstest]
    fn test_try_from_toml() {
        let path = PathBuf::from("../tests/data/config/pipeline.toml");
        let config = PipelineConfig::try_from(path.as_path()).unwrap();
        assert_eq!(config.columns.chromosome, "chrom");
        assert_eq!(config.columns.position, "pos");
        assert_eq!(config.context.flank, 2);
        assert_eq!(config.context.require_full_context, false);
        // not in the file, falls back to defaults
        assert_eq!(config.filter.substitution_tag, "SNV");
    }

    #[rstest]
    fn test_partial_section_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[filter]\nchrom_suffix = \"\"").unwrap();

        let config = PipelineConfig::try_from(file.path()).unwrap();
        assert_eq!(config.filter.chrom_suffix, "");
        assert_eq!(config.columns, ColumnConfig::default());
        assert_eq!(config.context, ContextConfig::default());
    }

    #[rstest]
    fn test_empty_column_name_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[columns]\nallele = \"  \"").unwrap();

        let result = PipelineConfig::try_from(file.path());
        assert!(matches!(result, Err(ConfigError::EmptyColumnName("allele"))));
    }

    #[rstest]
    fn test_bad_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[context]\nflank = \"wide\"").unwrap();

        let result = PipelineConfig::try_from(file.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[rstest]
    fn test_is_core_column() {
        let columns = ColumnConfig::default();
        assert!(columns.is_core_column("Allele"));
        assert!(!columns.is_core_column("Frequency"));
    }
}

//! Main Leapline struct and public API.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::input::{Parser, ParserConfig, SourceMetadata};
use crate::normalize::{NormalizeOptions, Normalizer};
use crate::sample::SampleRange;
use crate::table::{LeapTable, RawTable};

/// Configuration for a Leapline pipeline.
#[derive(Debug, Clone, Default)]
pub struct LeaplineConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Normalizer options.
    pub normalize: NormalizeOptions,
    /// Year range used when no file is supplied.
    pub sample: SampleRange,
}

/// Where a canonical table came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataOrigin {
    /// Loaded from a file.
    File(SourceMetadata),
    /// Generated from the built-in sample range.
    Sample { start: i64, end: i64 },
}

/// A canonical table with its origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadResult {
    pub origin: DataOrigin,
    pub table: LeapTable,
}

/// Loads, generates and normalizes leap year tables.
pub struct Leapline {
    config: LeaplineConfig,
    parser: Parser,
    normalizer: Normalizer,
}

impl Leapline {
    /// Create a pipeline with default configuration.
    pub fn new() -> Self {
        Self::with_config(LeaplineConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: LeaplineConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        let normalizer = Normalizer::with_options(config.normalize);

        Self {
            config,
            parser,
            normalizer,
        }
    }

    /// Use a different sample range.
    pub fn with_sample_range(mut self, range: SampleRange) -> Self {
        self.config.sample = range;
        self
    }

    /// Use different normalizer options.
    pub fn with_normalize_options(mut self, options: NormalizeOptions) -> Self {
        self.config.normalize = options;
        self.normalizer = Normalizer::with_options(options);
        self
    }

    pub fn config(&self) -> &LeaplineConfig {
        &self.config
    }

    /// Normalize a raw table.
    pub fn normalize(&self, raw: &RawTable) -> Result<LeapTable> {
        self.normalizer.normalize(raw)
    }

    /// Generate the configured sample table.
    pub fn sample(&self) -> LoadResult {
        let SampleRange { start, end } = self.config.sample;
        info!(start, end, "using built-in sample dataset");
        LoadResult {
            origin: DataOrigin::Sample { start, end },
            table: self.config.sample.generate(),
        }
    }

    /// Parse and normalize a delimited file.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<LoadResult> {
        let (raw, source) = self.parser.parse_file(path)?;
        let table = self.normalizer.normalize(&raw)?;
        Ok(LoadResult {
            origin: DataOrigin::File(source),
            table,
        })
    }

    /// Load a file when one is given, otherwise fall back to the sample.
    pub fn load_or_sample(&self, path: Option<&Path>) -> Result<LoadResult> {
        match path {
            Some(p) => self.load(p),
            None => Ok(self.sample()),
        }
    }
}

impl Default for Leapline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_csv() {
        let file = create_test_file("YEAR,Is_Leap_Year\n2000,True\n2001,False\n");

        let result = Leapline::new().load(file.path()).unwrap();
        assert_eq!(result.table.len(), 2);
        assert!(result.table.records[0].is_leap_year);
        match result.origin {
            DataOrigin::File(source) => {
                assert_eq!(source.row_count, 2);
                assert_eq!(source.format, "csv");
                assert!(source.hash.starts_with("sha256:"));
            }
            other => panic!("expected file origin, got {other:?}"),
        }
    }

    #[test]
    fn test_load_or_sample_without_path() {
        let pipeline = Leapline::new().with_sample_range(SampleRange::new(2000, 2009));
        let result = pipeline.load_or_sample(None).unwrap();
        assert_eq!(result.table.len(), 10);
        assert!(matches!(
            result.origin,
            DataOrigin::Sample { start: 2000, end: 2009 }
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Leapline::new().load("/nonexistent/leap_years.csv").unwrap_err();
        assert!(matches!(err, crate::LeaplineError::Io { .. }));
    }

    #[test]
    fn test_load_schema_error() {
        let file = create_test_file("id,label\n1,a\n");
        let err = Leapline::new().load(file.path()).unwrap_err();
        assert!(err.is_schema_error());
    }
}

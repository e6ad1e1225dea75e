//! Built-in reference dataset used when no file is supplied.

use serde::{Deserialize, Serialize};

use crate::error::{LeaplineError, Result};
use crate::leap::is_leap;
use crate::normalize::derive;
use crate::table::{LeapTable, RawTable, columns};
use crate::value::Value;

/// Default first year of the sample.
pub const DEFAULT_START: i64 = 1900;
/// Default last year of the sample (inclusive).
pub const DEFAULT_END: i64 = 2050;

/// Inclusive range of years for the sample dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRange {
    pub start: i64,
    pub end: i64,
}

impl SampleRange {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Number of years in the range.
    pub fn len(&self) -> usize {
        if self.start > self.end {
            0
        } else {
            usize::try_from(self.end.abs_diff(self.start))
                .map_or(usize::MAX, |n| n.saturating_add(1))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Reject inverted ranges.
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(LeaplineError::Config(format!(
                "sample start {} is after end {}",
                self.start, self.end
            )));
        }
        Ok(())
    }

    /// Generate the canonical table for this range.
    pub fn generate(&self) -> LeapTable {
        generate_sample(self.start, self.end)
    }
}

impl Default for SampleRange {
    fn default() -> Self {
        Self::new(DEFAULT_START, DEFAULT_END)
    }
}

/// Generate one canonical row per year in `[start, end]`.
///
/// An inverted range yields an empty table.
pub fn generate_sample(start: i64, end: i64) -> LeapTable {
    let headers = vec![
        columns::YEAR.to_string(),
        columns::IS_LEAP_YEAR.to_string(),
    ];
    let rows = (start..=end)
        .map(|year| vec![Value::from(year), Value::Bool(is_leap(Some(year)))])
        .collect();

    derive(&RawTable::new(headers, rows), 0)
}

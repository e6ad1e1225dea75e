//! Descriptive statistics and cleaning helpers for canonical tables.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::table::{LeapTable, columns};

/// Aggregates for one numeric column.
///
/// Mean, median, min and max are `None` for an empty column; `std` and
/// `var` use the sample (n - 1) estimator and need at least two values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub column: String,
    pub count: usize,
    pub sum: f64,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub std: Option<f64>,
    pub var: Option<f64>,
}

impl NumericSummary {
    /// Summarize a set of values, ignoring their order.
    pub fn from_values(column: impl Into<String>, values: &[f64]) -> Self {
        let count = values.len();
        let sum: f64 = values.iter().sum();

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let mean = (count > 0).then(|| sum / count as f64);
        let median = match count {
            0 => None,
            n if n % 2 == 1 => Some(sorted[n / 2]),
            n => Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0),
        };
        let var = match mean {
            Some(m) if count > 1 => {
                Some(values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (count - 1) as f64)
            }
            _ => None,
        };

        Self {
            column: column.into(),
            count,
            sum,
            mean,
            median,
            min: sorted.first().copied(),
            max: sorted.last().copied(),
            std: var.map(f64::sqrt),
            var,
        }
    }
}

/// Numeric summaries for `Year`, `Leap_Code` and `Year_Normalized`.
pub fn numeric_summaries(table: &LeapTable) -> Vec<NumericSummary> {
    let years: Vec<f64> = table.years().map(|y| y as f64).collect();
    let codes: Vec<f64> = table.iter().map(|r| f64::from(r.leap_code)).collect();
    let scaled: Vec<f64> = table.iter().filter_map(|r| r.year_normalized).collect();

    vec![
        NumericSummary::from_values(columns::YEAR, &years),
        NumericSummary::from_values(columns::LEAP_CODE, &codes),
        NumericSummary::from_values(columns::YEAR_NORMALIZED, &scaled),
    ]
}

/// Missing cell counts per column, canonical columns first.
pub fn missing_counts(table: &LeapTable) -> IndexMap<String, usize> {
    let mut counts: IndexMap<String, usize> = table
        .column_names()
        .into_iter()
        .map(|name| (name.to_string(), 0))
        .collect();

    for record in table {
        for (name, cell) in table.column_names().into_iter().zip(record.cells()) {
            if cell.is_missing() {
                if let Some(count) = counts.get_mut(name) {
                    *count += 1;
                }
            }
        }
    }

    counts
}

/// Remove rows identical to an earlier row, keeping the first occurrence.
pub fn drop_duplicates(table: &LeapTable) -> LeapTable {
    let mut seen = HashSet::new();
    let records = table
        .iter()
        .filter(|record| {
            let key: Vec<Option<String>> = record.cells().iter().map(|c| c.render()).collect();
            seen.insert(key)
        })
        .cloned()
        .collect();
    table.with_records(records)
}

/// Remove rows with any missing cell, extra columns included.
pub fn drop_missing(table: &LeapTable) -> LeapTable {
    let records = table
        .iter()
        .filter(|record| record.cells().iter().all(|c| !c.is_missing()))
        .cloned()
        .collect();
    table.with_records(records)
}

/// Shape and quality overview of a canonical table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableProfile {
    pub rows: usize,
    pub columns: usize,
    pub missing: IndexMap<String, usize>,
    pub duplicate_rows: usize,
    pub leap_years: usize,
    pub numeric: Vec<NumericSummary>,
}

/// Profile a canonical table.
pub fn profile(table: &LeapTable) -> TableProfile {
    TableProfile {
        rows: table.len(),
        columns: table.column_names().len(),
        missing: missing_counts(table),
        duplicate_rows: table.len() - drop_duplicates(table).len(),
        leap_years: table.iter().filter(|r| r.is_leap_year).count(),
        numeric: numeric_summaries(table),
    }
}

//! Column normalizer: turns an arbitrary raw table into a canonical
//! [`LeapTable`].
//!
//! The steps run in a fixed order:
//!
//! 1. Locate the year column ([`locate_year_column`]) and treat it as `Year`.
//! 2. Coerce `Year` to an integer or no value ([`coerce_year`]).
//! 3. Take `Is_Leap_Year` from the caller ([`coerce_flag`]) or compute it.
//! 4. Derive `Leap_Code` from the flag, always overwriting.
//! 5. Keep a caller-supplied `Leap_Reason`, otherwise compute it.
//! 6. Min-max scale `Year` into `Year_Normalized`.
//!
//! The input table is only borrowed; the canonical table is freshly built.

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, warn};

use crate::error::{LeaplineError, Result};
use crate::leap::{is_leap, leap_reason};
use crate::table::{LeapRecord, LeapTable, RawTable, columns};
use crate::value::{Value, coerce_flag, coerce_year};

/// One way of recognizing the year column by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YearColumnStrategy {
    /// Header is exactly `Year`.
    Exact,
    /// Header contains `year`, ignoring case.
    CaseInsensitiveContains,
}

impl YearColumnStrategy {
    /// Strategies in the order they are tried.
    pub const ORDERED: [YearColumnStrategy; 2] = [
        YearColumnStrategy::Exact,
        YearColumnStrategy::CaseInsensitiveContains,
    ];

    /// Whether a header satisfies this strategy.
    pub fn matches(&self, header: &str) -> bool {
        match self {
            YearColumnStrategy::Exact => header == columns::YEAR,
            YearColumnStrategy::CaseInsensitiveContains => {
                header.to_lowercase().contains("year")
            }
        }
    }
}

/// The column chosen as `Year`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearColumn {
    /// Position in the raw table.
    pub index: usize,
    /// Header as supplied by the caller.
    pub original_name: String,
    /// Strategy that found it.
    pub strategy: YearColumnStrategy,
}

impl YearColumn {
    /// Whether the column had to be renamed to `Year`.
    pub fn was_renamed(&self) -> bool {
        self.original_name != columns::YEAR
    }
}

/// Find the year column, trying each strategy in order and taking the first
/// matching header.
pub fn locate_year_column(headers: &[String]) -> Result<YearColumn> {
    YearColumnStrategy::ORDERED
        .iter()
        .find_map(|strategy| {
            headers
                .iter()
                .position(|h| strategy.matches(h))
                .map(|index| YearColumn {
                    index,
                    original_name: headers[index].clone(),
                    strategy: *strategy,
                })
        })
        .ok_or_else(|| LeaplineError::Schema {
            columns: headers.to_vec(),
        })
}

/// How a caller-supplied `Leap_Reason` column is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonPolicy {
    /// Keep supplied reasons as-is, even when they disagree with the flag.
    #[default]
    Trust,
    /// Reject supplied reasons that disagree with `Is_Leap_Year`.
    Strict,
}

/// Options for [`Normalizer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeOptions {
    #[serde(default)]
    pub reason_policy: ReasonPolicy,
}

/// Produces canonical tables from raw ones.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    options: NormalizeOptions,
}

impl Normalizer {
    /// Create a normalizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a normalizer with custom options.
    pub fn with_options(options: NormalizeOptions) -> Self {
        Self { options }
    }

    /// Normalize a raw table.
    ///
    /// Fails with [`LeaplineError::Schema`] when no year column exists.
    /// Dirty cells never fail: they become no value or `false`.
    pub fn normalize(&self, raw: &RawTable) -> Result<LeapTable> {
        let _span = debug_span!("normalize", rows = raw.row_count()).entered();

        let year_column = locate_year_column(&raw.headers)?;
        debug!(
            column = %year_column.original_name,
            strategy = ?year_column.strategy,
            renamed = year_column.was_renamed(),
            "located year column"
        );

        let table = derive(raw, year_column.index);

        if self.options.reason_policy == ReasonPolicy::Strict {
            check_supplied_reasons(raw, &table)?;
        }

        Ok(table)
    }
}

/// Normalize with default options.
pub fn normalize(raw: &RawTable) -> Result<LeapTable> {
    Normalizer::new().normalize(raw)
}

/// Build the canonical table once the year column is known.
pub(crate) fn derive(raw: &RawTable, year_index: usize) -> LeapTable {
    let flag_index = other_column(raw, columns::IS_LEAP_YEAR, year_index);
    let reason_index = other_column(raw, columns::LEAP_REASON, year_index);

    let extra_indices: Vec<usize> = raw
        .headers
        .iter()
        .enumerate()
        .filter(|(i, h)| *i != year_index && !columns::is_canonical(h))
        .map(|(i, _)| i)
        .collect();
    let extra_columns = extra_indices
        .iter()
        .map(|&i| raw.headers[i].clone())
        .collect();

    let mut unparsed_years = 0usize;
    let mut records: Vec<LeapRecord> = raw
        .rows
        .iter()
        .map(|row| {
            let cell = |i: usize| row.get(i).unwrap_or(&Value::Missing);

            let year_cell = cell(year_index);
            let year = coerce_year(year_cell);
            if year.is_none() && !year_cell.is_missing() {
                unparsed_years += 1;
            }

            let is_leap_year = match flag_index {
                Some(i) => coerce_flag(cell(i)),
                None => is_leap(year),
            };

            let leap_reason = reason_index
                .and_then(|i| cell(i).render())
                .unwrap_or_else(|| leap_reason(year).to_string());

            LeapRecord {
                year,
                is_leap_year,
                leap_code: u8::from(is_leap_year),
                leap_reason,
                year_normalized: None,
                extra: extra_indices.iter().map(|&i| cell(i).clone()).collect(),
            }
        })
        .collect();

    if unparsed_years > 0 {
        debug!(count = unparsed_years, "year cells could not be parsed");
    }

    scale_years(&mut records);

    LeapTable::new(extra_columns, records)
}

/// Position of a canonical column, ignoring the year column itself.
fn other_column(raw: &RawTable, name: &str, year_index: usize) -> Option<usize> {
    raw.column_index(name).filter(|&i| i != year_index)
}

/// Min-max scale valid years into `[0, 1]`.
///
/// A degenerate range (every valid year equal) scales to `0.0`.
fn scale_years(records: &mut [LeapRecord]) {
    let bounds = records.iter().filter_map(|r| r.year).fold(None, |acc, y| {
        match acc {
            None => Some((y, y)),
            Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
        }
    });

    let Some((min, max)) = bounds else {
        if !records.is_empty() {
            warn!("no valid years; Year_Normalized left empty");
        }
        return;
    };

    // Differences in i128 so distant i64 years neither overflow nor collapse.
    let span = i128::from(max) - i128::from(min);
    for record in records.iter_mut() {
        record.year_normalized = record.year.map(|y| {
            if span == 0 {
                0.0
            } else {
                let offset = i128::from(y) - i128::from(min);
                (offset as f64 / span as f64).clamp(0.0, 1.0)
            }
        });
    }
}

/// Reject supplied reasons that contradict the leap flag.
fn check_supplied_reasons(raw: &RawTable, table: &LeapTable) -> Result<()> {
    let Some(index) = raw.column_index(columns::LEAP_REASON) else {
        return Ok(());
    };

    for (row, (cell, record)) in raw.column_values(index).zip(&table.records).enumerate() {
        if cell.is_missing() {
            continue;
        }
        let consistent = record
            .reason_kind()
            .is_some_and(|kind| kind.implies_leap() == record.is_leap_year);
        if !consistent {
            return Err(LeaplineError::InconsistentReason {
                row,
                reason: record.leap_reason.clone(),
                is_leap: record.is_leap_year,
            });
        }
    }

    Ok(())
}

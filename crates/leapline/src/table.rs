//! Raw input tables and the canonical leap year table.

use std::ops::Range;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::leap::LeapReason;
use crate::value::Value;

/// Canonical column names, in output order.
pub mod columns {
    pub const YEAR: &str = "Year";
    pub const IS_LEAP_YEAR: &str = "Is_Leap_Year";
    pub const LEAP_CODE: &str = "Leap_Code";
    pub const LEAP_REASON: &str = "Leap_Reason";
    pub const YEAR_NORMALIZED: &str = "Year_Normalized";

    /// All five canonical columns.
    pub const CANONICAL: [&str; 5] = [YEAR, IS_LEAP_YEAR, LEAP_CODE, LEAP_REASON, YEAR_NORMALIZED];

    /// Whether a column name is one of the canonical columns.
    pub fn is_canonical(name: &str) -> bool {
        CANONICAL.contains(&name)
    }
}

/// A caller-supplied table with an arbitrary column set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data (row-major order), each row as wide as `headers`.
    pub rows: Vec<Vec<Value>>,
}

impl RawTable {
    /// Create a raw table, padding short rows with missing cells and
    /// truncating long ones.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Value::Missing);
                row
            })
            .collect();
        Self { headers, rows }
    }

    /// Build a table from records keyed by column name.
    ///
    /// Columns appear in first-seen order; keys absent from a record become
    /// missing cells.
    pub fn from_records(records: Vec<IndexMap<String, Value>>) -> Self {
        let mut headers: Vec<String> = Vec::new();
        for record in &records {
            for key in record.keys() {
                if !headers.iter().any(|h| h == key) {
                    headers.push(key.clone());
                }
            }
        }

        let rows = records
            .into_iter()
            .map(|mut record| {
                headers
                    .iter()
                    .map(|h| record.swap_remove(h).unwrap_or_default())
                    .collect()
            })
            .collect();

        Self { headers, rows }
    }

    /// Parse a JSON array of records, e.g. `[{"Year": 2000}]`.
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<IndexMap<String, Value>> = serde_json::from_str(json)?;
        Ok(Self::from_records(records))
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(index).unwrap_or(&Value::Missing))
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(col))
    }
}

/// One canonical row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeapRecord {
    pub year: Option<i64>,
    pub is_leap_year: bool,
    /// 1 when `is_leap_year`, else 0.
    pub leap_code: u8,
    pub leap_reason: String,
    /// Min-max scaled year in `[0, 1]`.
    pub year_normalized: Option<f64>,
    /// Pass-through cells, aligned with [`LeapTable::extra_columns`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<Value>,
}

impl LeapRecord {
    /// The reason as a known classification, if it is one of the fixed strings.
    pub fn reason_kind(&self) -> Option<LeapReason> {
        self.leap_reason.parse().ok()
    }

    /// Canonical cells followed by the extra cells.
    pub fn cells(&self) -> Vec<Value> {
        let mut cells = Vec::with_capacity(5 + self.extra.len());
        cells.push(Value::from(self.year));
        cells.push(Value::Bool(self.is_leap_year));
        cells.push(Value::from(i64::from(self.leap_code)));
        cells.push(Value::Text(self.leap_reason.clone()));
        cells.push(Value::from(self.year_normalized));
        cells.extend(self.extra.iter().cloned());
        cells
    }
}

/// A canonical table: every row carries all five derived columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeapTable {
    /// Caller columns carried through after the canonical ones.
    #[serde(default)]
    pub extra_columns: Vec<String>,
    pub records: Vec<LeapRecord>,
}

impl LeapTable {
    /// Create a table from parts.
    pub fn new(extra_columns: Vec<String>, records: Vec<LeapRecord>) -> Self {
        Self {
            extra_columns,
            records,
        }
    }

    /// A table with the same extra columns but different rows.
    pub fn with_records(&self, records: Vec<LeapRecord>) -> Self {
        Self {
            extra_columns: self.extra_columns.clone(),
            records,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All column names, canonical first.
    pub fn column_names(&self) -> Vec<&str> {
        columns::CANONICAL
            .iter()
            .copied()
            .chain(self.extra_columns.iter().map(String::as_str))
            .collect()
    }

    /// Iterate over rows in order.
    pub fn iter(&self) -> std::slice::Iter<'_, LeapRecord> {
        self.records.iter()
    }

    /// Valid years, in row order.
    pub fn years(&self) -> impl Iterator<Item = i64> + '_ {
        self.records.iter().filter_map(|r| r.year)
    }

    /// First `n` rows.
    pub fn head(&self, n: usize) -> Self {
        self.slice(0..n)
    }

    /// Last `n` rows.
    pub fn tail(&self, n: usize) -> Self {
        let start = self.len().saturating_sub(n);
        self.slice(start..self.len())
    }

    /// Rows in a position range, clamped to the table.
    pub fn slice(&self, range: Range<usize>) -> Self {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        self.with_records(self.records[start..end].to_vec())
    }

    /// Convert back into a raw table so it can be normalized again.
    pub fn to_raw(&self) -> RawTable {
        let headers = self
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        let rows = self.records.iter().map(LeapRecord::cells).collect();
        RawTable::new(headers, rows)
    }

    /// Rows as records keyed by column name.
    pub fn to_records(&self) -> Vec<IndexMap<String, Value>> {
        let names = self.column_names();
        self.records
            .iter()
            .map(|record| {
                names
                    .iter()
                    .map(|n| n.to_string())
                    .zip(record.cells())
                    .collect()
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a LeapTable {
    type Item = &'a LeapRecord;
    type IntoIter = std::slice::Iter<'a, LeapRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

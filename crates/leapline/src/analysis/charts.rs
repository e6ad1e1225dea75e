//! Plot-ready series derived from canonical tables.
//!
//! Nothing here draws; these are the data behind the line, bar, histogram
//! and scatter views.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::table::LeapTable;

/// One (Year, Leap_Code) point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeapPoint {
    pub year: i64,
    pub leap_code: u8,
}

/// Leap code over years, for line and scatter plots. Rows without a year
/// are skipped.
pub fn leap_code_series(table: &LeapTable) -> Vec<LeapPoint> {
    table
        .iter()
        .filter_map(|r| {
            r.year.map(|year| LeapPoint {
                year,
                leap_code: r.leap_code,
            })
        })
        .collect()
}

/// Row count per reason, most frequent first; ties keep label order.
pub fn reason_counts(table: &LeapTable) -> IndexMap<String, usize> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for record in table {
        *counts.entry(record.leap_reason.clone()).or_insert(0) += 1;
    }
    counts.sort_by(|ka, va, kb, vb| vb.cmp(va).then_with(|| ka.cmp(kb)));
    counts
}

/// Frequency of common versus leap rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeapHistogram {
    pub non_leap: usize,
    pub leap: usize,
}

/// Count rows by leap code.
pub fn leap_histogram(table: &LeapTable) -> LeapHistogram {
    table.iter().fold(LeapHistogram::default(), |mut h, r| {
        if r.leap_code == 1 {
            h.leap += 1;
        } else {
            h.non_leap += 1;
        }
        h
    })
}

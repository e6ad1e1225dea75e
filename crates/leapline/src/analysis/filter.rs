//! Row filters over canonical tables.

use serde::{Deserialize, Serialize};

use crate::table::{LeapRecord, LeapTable};

/// A row predicate over a canonical table.
///
/// Rows without a valid year never satisfy a year condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "year", rename_all = "snake_case")]
pub enum LeapFilter {
    /// Every row.
    All,
    /// Rows flagged as leap years.
    LeapOnly,
    /// Rows flagged as common years.
    NonLeapOnly,
    /// Rows whose year is strictly greater than the bound.
    YearAfter(i64),
    /// Rows whose year is strictly greater than the mean year.
    AboveMeanYear,
    /// Leap years strictly after the bound.
    LeapAfter(i64),
}

impl LeapFilter {
    /// Apply the filter, returning a new table in the original order.
    pub fn apply(&self, table: &LeapTable) -> LeapTable {
        let mean = match self {
            LeapFilter::AboveMeanYear => mean_year(table),
            _ => None,
        };

        let records = table
            .iter()
            .filter(|r| self.matches(r, mean))
            .cloned()
            .collect();
        table.with_records(records)
    }

    fn matches(&self, record: &LeapRecord, mean: Option<f64>) -> bool {
        match self {
            LeapFilter::All => true,
            LeapFilter::LeapOnly => record.is_leap_year,
            LeapFilter::NonLeapOnly => !record.is_leap_year,
            LeapFilter::YearAfter(bound) => record.year.is_some_and(|y| y > *bound),
            LeapFilter::AboveMeanYear => match (record.year, mean) {
                (Some(y), Some(m)) => y as f64 > m,
                _ => false,
            },
            LeapFilter::LeapAfter(bound) => {
                record.is_leap_year && record.year.is_some_and(|y| y > *bound)
            }
        }
    }
}

/// Mean of the valid years, if any.
pub fn mean_year(table: &LeapTable) -> Option<f64> {
    let (sum, count) = table
        .years()
        .fold((0.0_f64, 0usize), |(sum, count), y| (sum + y as f64, count + 1));
    (count > 0).then(|| sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::generate_sample;

    #[test]
    fn test_leap_and_non_leap_partition() {
        let table = generate_sample(1900, 2050);
        let leap = LeapFilter::LeapOnly.apply(&table);
        let common = LeapFilter::NonLeapOnly.apply(&table);

        assert_eq!(leap.len() + common.len(), table.len());
        assert!(leap.iter().all(|r| r.is_leap_year));
        assert!(common.iter().all(|r| !r.is_leap_year));
        assert_eq!(LeapFilter::All.apply(&table), table);
    }

    #[test]
    fn test_year_after_is_strict() {
        let table = generate_sample(1998, 2002);
        let after = LeapFilter::YearAfter(2000).apply(&table);
        assert_eq!(after.years().collect::<Vec<_>>(), vec![2001, 2002]);
    }

    #[test]
    fn test_above_mean() {
        let table = generate_sample(2000, 2004);
        assert_eq!(mean_year(&table), Some(2002.0));
        let above = LeapFilter::AboveMeanYear.apply(&table);
        assert_eq!(above.years().collect::<Vec<_>>(), vec![2003, 2004]);
    }

    #[test]
    fn test_leap_after() {
        let table = generate_sample(1990, 2012);
        let filtered = LeapFilter::LeapAfter(2000).apply(&table);
        assert_eq!(filtered.years().collect::<Vec<_>>(), vec![2004, 2008, 2012]);
    }

    #[test]
    fn test_empty_table() {
        let table = LeapTable::default();
        assert_eq!(mean_year(&table), None);
        assert!(LeapFilter::AboveMeanYear.apply(&table).is_empty());
    }
}

//! Grouping and aggregation of canonical tables.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::table::{LeapRecord, LeapTable};

/// Year range buckets used for grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum YearGroup {
    /// Years 0 through 1949.
    #[serde(rename = "Before 1950")]
    Before1950,
    /// Years 1950 through 1999.
    #[serde(rename = "1950–1999")]
    From1950To1999,
    /// Years 2000 through 2100.
    #[serde(rename = "2000 and later")]
    From2000,
}

impl YearGroup {
    /// Bucket for a year; years outside 0..=2100 have none.
    pub fn of(year: i64) -> Option<YearGroup> {
        match year {
            0..=1949 => Some(YearGroup::Before1950),
            1950..=1999 => Some(YearGroup::From1950To1999),
            2000..=2100 => Some(YearGroup::From2000),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            YearGroup::Before1950 => "Before 1950",
            YearGroup::From1950To1999 => "1950–1999",
            YearGroup::From2000 => "2000 and later",
        }
    }
}

impl fmt::Display for YearGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Column to group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    LeapReason,
    YearGroup,
}

impl FromStr for GroupKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "reason" | "leap_reason" => Ok(GroupKey::LeapReason),
            "year_group" | "group" | "range" => Ok(GroupKey::YearGroup),
            _ => Err(format!(
                "Unknown group key: {}. Use: reason or year-group.",
                s
            )),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::LeapReason => write!(f, "Leap_Reason"),
            GroupKey::YearGroup => write!(f, "Year_Group"),
        }
    }
}

/// Aggregates for one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub key: String,
    pub total_years: usize,
    pub total_leap_years: usize,
    /// Share of leap years in the group, 0.0 to 1.0.
    pub leap_year_ratio: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earliest_year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_year: Option<i64>,
}

impl GroupSummary {
    fn from_records<'a>(key: String, records: impl IntoIterator<Item = &'a LeapRecord>) -> Self {
        let mut total_years = 0;
        let mut total_leap_years = 0;
        let mut earliest_year: Option<i64> = None;
        let mut latest_year: Option<i64> = None;

        for record in records {
            total_years += 1;
            total_leap_years += usize::from(record.leap_code);
            if let Some(y) = record.year {
                earliest_year = Some(earliest_year.map_or(y, |e| e.min(y)));
                latest_year = Some(latest_year.map_or(y, |l| l.max(y)));
            }
        }

        let leap_year_ratio = if total_years == 0 {
            0.0
        } else {
            total_leap_years as f64 / total_years as f64
        };

        Self {
            key,
            total_years,
            total_leap_years,
            leap_year_ratio,
            earliest_year,
            latest_year,
        }
    }
}

/// Group rows and aggregate each group.
///
/// Reason groups come back sorted by label, year groups in chronological
/// order. Groups without rows are omitted; rows without a year group are
/// left out of year grouping.
pub fn group_by(table: &LeapTable, key: GroupKey) -> Vec<GroupSummary> {
    match key {
        GroupKey::LeapReason => {
            let mut groups: BTreeMap<&str, Vec<&LeapRecord>> = BTreeMap::new();
            for record in table {
                groups
                    .entry(record.leap_reason.as_str())
                    .or_default()
                    .push(record);
            }
            groups
                .into_iter()
                .map(|(reason, records)| GroupSummary::from_records(reason.to_string(), records))
                .collect()
        }
        GroupKey::YearGroup => {
            let mut groups: BTreeMap<YearGroup, Vec<&LeapRecord>> = BTreeMap::new();
            for record in table {
                if let Some(group) = record.year.and_then(YearGroup::of) {
                    groups.entry(group).or_default().push(record);
                }
            }
            groups
                .into_iter()
                .map(|(group, records)| GroupSummary::from_records(group.to_string(), records))
                .collect()
        }
    }
}

/// Category codes for the distinct reasons, assigned in sorted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasonEncoding {
    /// Distinct reasons; a code is an index into this list.
    pub categories: Vec<String>,
    /// Code for each row, in row order.
    pub codes: Vec<usize>,
}

/// Encode each row's reason as a category code.
pub fn reason_codes(table: &LeapTable) -> ReasonEncoding {
    let mut categories: Vec<String> = table.iter().map(|r| r.leap_reason.clone()).collect();
    categories.sort();
    categories.dedup();

    let codes = table
        .iter()
        .map(|r| {
            categories
                .binary_search(&r.leap_reason)
                .unwrap_or_default()
        })
        .collect();

    ReasonEncoding { categories, codes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::generate_sample;

    #[test]
    fn test_year_group_bounds() {
        assert_eq!(YearGroup::of(0), Some(YearGroup::Before1950));
        assert_eq!(YearGroup::of(1949), Some(YearGroup::Before1950));
        assert_eq!(YearGroup::of(1950), Some(YearGroup::From1950To1999));
        assert_eq!(YearGroup::of(1999), Some(YearGroup::From1950To1999));
        assert_eq!(YearGroup::of(2000), Some(YearGroup::From2000));
        assert_eq!(YearGroup::of(2100), Some(YearGroup::From2000));
        assert_eq!(YearGroup::of(2101), None);
        assert_eq!(YearGroup::of(-1), None);
    }

    #[test]
    fn test_group_by_year_group() {
        let table = generate_sample(1900, 2050);
        let groups = group_by(&table, GroupKey::YearGroup);

        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["Before 1950", "1950–1999", "2000 and later"]);

        assert_eq!(groups[0].total_years, 50);
        assert_eq!(groups[0].total_leap_years, 12);
        assert_eq!(groups[1].total_years, 50);
        assert_eq!(groups[1].total_leap_years, 12);
        assert_eq!(groups[2].total_years, 51);
        assert_eq!(groups[2].total_leap_years, 13);
        assert_eq!(groups[2].earliest_year, Some(2000));
        assert_eq!(groups[2].latest_year, Some(2050));
        assert!((groups[1].leap_year_ratio - 0.24).abs() < 1e-12);
    }

    #[test]
    fn test_group_by_reason() {
        let table = generate_sample(1900, 2050);
        let groups = group_by(&table, GroupKey::LeapReason);

        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "Divisible by 100 but not 400",
                "Divisible by 4 but not 100",
                "Divisible by 400",
                "Not divisible by 4",
            ]
        );
        assert_eq!(groups[0].total_years, 1);
        assert_eq!(groups[0].total_leap_years, 0);
        assert_eq!(groups[2].total_years, 1);
        assert_eq!(groups[2].leap_year_ratio, 1.0);
        assert_eq!(groups[1].total_years, 36);
        assert_eq!(groups[3].total_years, 113);
        assert_eq!(groups[3].earliest_year, Some(1901));
    }

    #[test]
    fn test_group_key_parse() {
        assert_eq!("reason".parse::<GroupKey>(), Ok(GroupKey::LeapReason));
        assert_eq!("year-group".parse::<GroupKey>(), Ok(GroupKey::YearGroup));
        assert!("decade".parse::<GroupKey>().is_err());
    }

    #[test]
    fn test_reason_codes() {
        let table = generate_sample(1900, 1904);
        let encoding = reason_codes(&table);

        assert_eq!(
            encoding.categories,
            vec![
                "Divisible by 100 but not 400",
                "Divisible by 4 but not 100",
                "Not divisible by 4",
            ]
        );
        assert_eq!(encoding.codes, vec![0, 2, 2, 2, 1]);
    }
}

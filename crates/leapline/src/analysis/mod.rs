//! Filtering, grouping, statistics and chart data over canonical tables.

pub mod charts;
mod filter;
mod group;
mod stats;

pub use charts::{LeapHistogram, LeapPoint, leap_code_series, leap_histogram, reason_counts};
pub use filter::{LeapFilter, mean_year};
pub use group::{GroupKey, GroupSummary, ReasonEncoding, YearGroup, group_by, reason_codes};
pub use stats::{
    NumericSummary, TableProfile, drop_duplicates, drop_missing, missing_counts,
    numeric_summaries, profile,
};

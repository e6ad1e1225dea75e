//! Leapline: leap year classification and table normalization.
//!
//! Leapline takes a table of years in whatever shape it arrives (a differently
//! named year column, text where numbers should be, yes/no flags, blanks) and
//! produces a canonical table with five guaranteed columns: `Year`,
//! `Is_Leap_Year`, `Leap_Code`, `Leap_Reason` and `Year_Normalized`.
//!
//! # Core Principles
//!
//! - **Non-destructive**: the input table is only borrowed, never modified
//! - **Forgiving**: dirty cells become no value or `false`; only a missing
//!   year column is fatal
//! - **Stateless**: every call computes everything, including the year
//!   scaling, from its own input
//!
//! # Example
//!
//! ```
//! use leapline::{RawTable, normalize};
//!
//! let raw = RawTable::from_json(r#"[{"year": "2024", "Is_Leap_Year": "YES"}]"#).unwrap();
//! let table = normalize(&raw).unwrap();
//!
//! assert_eq!(table.records[0].year, Some(2024));
//! assert_eq!(table.records[0].leap_code, 1);
//! ```

pub mod analysis;
pub mod error;
pub mod input;
pub mod leap;
pub mod normalize;
pub mod output;
pub mod sample;
pub mod table;
pub mod value;

mod leapline;

pub use crate::leapline::{DataOrigin, Leapline, LeaplineConfig, LoadResult};
pub use error::{LeaplineError, Result};
pub use input::{Parser, ParserConfig, SourceMetadata};
pub use leap::{LeapReason, YearVerdict, check_year, is_leap, leap_reason};
pub use normalize::{
    NormalizeOptions, Normalizer, ReasonPolicy, YearColumn, YearColumnStrategy,
    locate_year_column, normalize,
};
pub use output::{OutputFormat, TableWriter};
pub use sample::{DEFAULT_END, DEFAULT_START, SampleRange, generate_sample};
pub use table::{LeapRecord, LeapTable, RawTable};
pub use value::{Value, coerce_flag, coerce_year};

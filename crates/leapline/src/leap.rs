//! Gregorian leap year classification.
//!
//! [`is_leap`] and [`leap_reason`] evaluate the same rule with the same
//! precedence, so `is_leap(y) == leap_reason(y).implies_leap()` for every
//! input, including a missing year.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which branch of the Gregorian rule decided a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LeapReason {
    /// Divisible by 400: leap.
    #[serde(rename = "Divisible by 400")]
    DivisibleBy400,
    /// Divisible by 100 but not 400: common.
    #[serde(rename = "Divisible by 100 but not 400")]
    DivisibleBy100,
    /// Divisible by 4 but not 100: leap.
    #[serde(rename = "Divisible by 4 but not 100")]
    DivisibleBy4,
    /// Not divisible by 4: common.
    #[serde(rename = "Not divisible by 4")]
    NotDivisibleBy4,
    /// The year was missing or unparseable.
    #[serde(rename = "Invalid year")]
    InvalidYear,
}

impl LeapReason {
    /// All reasons, in rule precedence order.
    pub const ALL: [LeapReason; 5] = [
        LeapReason::DivisibleBy400,
        LeapReason::DivisibleBy100,
        LeapReason::DivisibleBy4,
        LeapReason::NotDivisibleBy4,
        LeapReason::InvalidYear,
    ];

    /// The fixed explanation text.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeapReason::DivisibleBy400 => "Divisible by 400",
            LeapReason::DivisibleBy100 => "Divisible by 100 but not 400",
            LeapReason::DivisibleBy4 => "Divisible by 4 but not 100",
            LeapReason::NotDivisibleBy4 => "Not divisible by 4",
            LeapReason::InvalidYear => "Invalid year",
        }
    }

    /// Whether a year with this reason is a leap year.
    pub fn implies_leap(&self) -> bool {
        matches!(self, LeapReason::DivisibleBy400 | LeapReason::DivisibleBy4)
    }
}

impl fmt::Display for LeapReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeapReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        LeapReason::ALL
            .iter()
            .copied()
            .find(|reason| reason.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("Unknown leap reason: {}", s))
    }
}

/// Classify a year under the Gregorian rule.
///
/// A missing year is never a leap year.
pub fn is_leap(year: Option<i64>) -> bool {
    leap_reason(year).implies_leap()
}

/// Explain which branch of the Gregorian rule applies to a year.
pub fn leap_reason(year: Option<i64>) -> LeapReason {
    let Some(year) = year else {
        return LeapReason::InvalidYear;
    };

    if year.rem_euclid(400) == 0 {
        LeapReason::DivisibleBy400
    } else if year.rem_euclid(100) == 0 {
        LeapReason::DivisibleBy100
    } else if year.rem_euclid(4) == 0 {
        LeapReason::DivisibleBy4
    } else {
        LeapReason::NotDivisibleBy4
    }
}

/// Verdict for a single year, as shown by the interactive checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearVerdict {
    pub year: i64,
    pub is_leap: bool,
    pub reason: LeapReason,
}

impl fmt::Display for YearVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_leap {
            write!(f, "{} is a leap year ({})", self.year, self.reason)
        } else {
            write!(f, "{} is not a leap year ({})", self.year, self.reason)
        }
    }
}

/// Check a single year.
pub fn check_year(year: i64) -> YearVerdict {
    let reason = leap_reason(Some(year));
    YearVerdict {
        year,
        is_leap: reason.implies_leap(),
        reason,
    }
}

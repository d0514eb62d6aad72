use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::Datelike;
use regex::Regex;

use crate::error::{LedgerError, LedgerResult};

pub(crate) const MIN_YEAR: i32 = 2020;
pub(crate) const MAX_YEAR: i32 = 2029;

// ASCII classes only: `\d` needs regex's unicode-perl tables.
pub(crate) static PERIOD_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4})-([0-9]{1,2})$").ok());

/// A reporting bucket: one calendar month between 2020-01 and 2029-12.
///
/// Ordering is chronological (year first, then month). The textual form is
/// `YYYY-MM`, which also sorts chronologically as a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub(crate) fn new(year: i32, month: u32) -> LedgerResult<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(LedgerError::InvalidInput(format!(
                "Year must be between {MIN_YEAR} and {MAX_YEAR}: {year}"
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(LedgerError::InvalidInput(format!(
                "Month must be between 1 and 12: {month}"
            )));
        }
        Ok(Self { year, month })
    }

    /// The current local month, clamped into the supported range.
    pub(crate) fn current() -> Self {
        let now = chrono::Local::now();
        Self::clamped(now.year(), now.month())
    }

    fn clamped(year: i32, month: u32) -> Self {
        if year < MIN_YEAR {
            Self { year: MIN_YEAR, month: 1 }
        } else if year > MAX_YEAR {
            Self { year: MAX_YEAR, month: 12 }
        } else {
            Self { year, month: month.clamp(1, 12) }
        }
    }

    pub(crate) fn year(&self) -> i32 {
        self.year
    }

    /// The following month, or `None` past 2029-12.
    pub(crate) fn next(&self) -> Option<Self> {
        if self.month == 12 {
            (self.year < MAX_YEAR).then(|| Self { year: self.year + 1, month: 1 })
        } else {
            Some(Self { year: self.year, month: self.month + 1 })
        }
    }

    /// The preceding month, or `None` before 2020-01.
    pub(crate) fn prev(&self) -> Option<Self> {
        if self.month == 1 {
            (self.year > MIN_YEAR).then(|| Self { year: self.year - 1, month: 12 })
        } else {
            Some(Self { year: self.year, month: self.month - 1 })
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = LedgerError;

    /// Accepts `YYYY-MM` and `YYYY-M`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LedgerError::InvalidInput(format!("Invalid period '{s}'. Use YYYY-MM"));
        let caps = PERIOD_PATTERN
            .as_ref()
            .and_then(|re| re.captures(s.trim()))
            .ok_or_else(invalid)?;
        let year: i32 = caps[1].parse().map_err(|_| invalid())?;
        let month: u32 = caps[2].parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

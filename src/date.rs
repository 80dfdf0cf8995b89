use crate::error::ExportError;
use std::fmt;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime};

/// Wire format for request timestamps: strict ISO-8601 with milliseconds
/// and a literal trailing `Z`, e.g. `2024-01-31T23:59:59.999Z`.
const TS_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
);

/// One bound of an export's time range, validated on construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct LogTimestamp(PrimitiveDateTime);

impl LogTimestamp {
    /// Parse a strict `YYYY-MM-DDTHH:MM:SS.mmmZ` timestamp. Anything else
    /// (wrong digit counts, missing milliseconds, other separators) is a
    /// `Validation` error, raised before any network call is made.
    pub fn parse(s: &str) -> Result<Self, ExportError> {
        let dt = PrimitiveDateTime::parse(s, TS_FORMAT).map_err(|_| {
            ExportError::Validation(format!(
                "timestamp `{s}` does not match YYYY-MM-DDTHH:MM:SS.mmmZ"
            ))
        })?;
        Ok(Self(dt))
    }

    /// Calendar day this timestamp falls on (UTC, as given).
    pub fn day(&self) -> Date {
        self.0.date()
    }
}

impl fmt::Display for LogTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.format(TS_FORMAT) {
            Ok(s) => f.write_str(&s),
            Err(_) => Err(fmt::Error),
        }
    }
}

/// Inclusive iteration from `start` to `end` (if `start` <= `end`), else empty.
pub fn iter_days(start: Date, end: Date) -> impl Iterator<Item = Date> {
    let mut curr = if start <= end { Some(start) } else { None };
    std::iter::from_fn(move || {
        let ret = curr?;
        curr = ret.next_day().filter(|n| *n <= end);
        Some(ret)
    })
}

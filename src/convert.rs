//! Conversions from GEDCOM dates and times into `chrono` types.
//!
//! Only Gregorian exact dates convert; other calendars and partial dates
//! have no single day to map to.

// used for calendar dates, times of day and UTC timestamps
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::error::{GedcomError, Result};
use crate::value::{DateExact, Time};

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

// digits of a nanosecond
const FRACTION_DIGITS: usize = 9;

/// The number of a Gregorian month abbreviation, `JAN` being 1.
pub fn month_number(month: &str) -> Result<u32> {
    MONTHS
        .iter()
        .position(|abbreviation| abbreviation.eq_ignore_ascii_case(month))
        .map(|index| index as u32 + 1)
        .ok_or_else(|| GedcomError::InvalidMonth(month.to_owned()))
}

impl DateExact {
    pub fn to_naive_date(&self) -> Result<NaiveDate> {
        let month = month_number(&self.month)?;
        let invalid = || GedcomError::InvalidDate(self.to_string());
        let year = i32::try_from(self.year).map_err(|_| invalid())?;
        let day = u32::try_from(self.day).map_err(|_| invalid())?;
        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
    }
}

impl Time {
    /// Seconds and fraction default to zero. Fractions finer than a
    /// nanosecond are truncated.
    pub fn to_naive_time(&self) -> Result<NaiveTime> {
        let invalid = || GedcomError::InvalidDate(self.to_string());
        let nanoseconds = match &self.fraction {
            Some(digits) => {
                let kept = digits
                    .get(..digits.len().min(FRACTION_DIGITS))
                    .ok_or_else(invalid)?;
                format!("{:0<width$}", kept, width = FRACTION_DIGITS)
                    .parse()
                    .map_err(|_| invalid())?
            }
            None => 0,
        };
        NaiveTime::from_hms_nano_opt(
            u32::from(self.hour),
            u32::from(self.minute),
            u32::from(self.second.unwrap_or(0)),
            nanoseconds,
        )
        .ok_or_else(invalid)
    }
}

/// The instant of an exact date and an optional time of day, read as UTC.
/// Without a time the instant is midnight.
pub fn to_datetime(date: &DateExact, time: Option<&Time>) -> Result<DateTime<Utc>> {
    let time = match time {
        Some(time) => time.to_naive_time()?,
        None => NaiveTime::MIN,
    };
    Ok(Utc.from_utc_datetime(&date.to_naive_date()?.and_time(time)))
}

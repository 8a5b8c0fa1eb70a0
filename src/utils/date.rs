//! Calendar date utilities without timezone dependencies.
//!
//! Documents carry plain `YYYY-MM-DD` dates. This module validates them,
//! formats them for display and supplies today's date for defaults.
//!
//! # Examples
//!
//! ```ignore
//! let date = CalendarDate::parse("2024-06-01").unwrap();
//! assert_eq!(date.to_long_date(), "June 1, 2024");
//! assert_eq!(date.to_iso(), "2024-06-01");
//! ```

use anyhow::{Result, bail};
use std::time::{SystemTime, UNIX_EPOCH};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// UTC calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CalendarDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl CalendarDate {
    pub const fn from_ymd(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Parse strict "YYYY-MM-DD".
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return None;
        }

        let date = Self::from_ymd(
            parse_u16(&bytes[0..4])?,
            parse_u8(&bytes[5..7])?,
            parse_u8(&bytes[8..10])?,
        );
        date.validate().ok()?;
        Some(date)
    }

    /// Today's date in UTC, from the system clock.
    pub fn today() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self::from_days_since_epoch(secs / 86_400)
    }

    /// Civil date from days since 1970-01-01 (Howard Hinnant's algorithm).
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn from_days_since_epoch(days: u64) -> Self {
        let z = days as i64 + 719_468;
        let era = z.div_euclid(146_097);
        let doe = z.rem_euclid(146_097);
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
        let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
        let year = (yoe + era * 400 + i64::from(month <= 2)) as u16;
        Self::from_ymd(year, month, day)
    }

    #[allow(clippy::trivially_copy_pass_by_ref)] // Method style is more idiomatic
    pub fn validate(&self) -> Result<()> {
        let Self { year, month, day } = *self;

        if !(1..=12).contains(&month) {
            bail!("month is invalid: {month}");
        }

        let max_days = Self::days_in_month(year, month);
        if day == 0 || day > max_days {
            bail!("day is invalid: {day}");
        }

        Ok(())
    }

    #[inline]
    #[allow(clippy::manual_is_multiple_of)] // Manual impl for const fn
    const fn is_leap_year(year: u16) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    #[inline]
    const fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }

    /// Format as ISO 8601 calendar date: `YYYY-MM-DD`
    pub fn to_iso(self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    /// Format for readers: `June 1, 2024`
    pub fn to_long_date(self) -> String {
        format!(
            "{} {}, {}",
            MONTH_NAMES[(self.month - 1) as usize],
            self.day,
            self.year
        )
    }
}

/// Long display form of an ISO date string, falling back to the input.
pub fn long_date(iso: &str) -> String {
    CalendarDate::parse(iso).map_or_else(|| iso.to_string(), CalendarDate::to_long_date)
}

/// Today's date as `YYYY-MM-DD`.
pub fn today() -> String {
    CalendarDate::today().to_iso()
}

/// Parse 2-digit ASCII number
#[inline]
fn parse_u8(bytes: &[u8]) -> Option<u8> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = bytes[0].wrapping_sub(b'0');
    let d2 = bytes[1].wrapping_sub(b'0');
    if d1 > 9 || d2 > 9 {
        return None;
    }
    Some(d1 * 10 + d2)
}

/// Parse 4-digit ASCII number
#[inline]
fn parse_u16(bytes: &[u8]) -> Option<u16> {
    if bytes.len() != 4 {
        return None;
    }
    let mut result = 0u16;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        result = result * 10 + u16::from(d);
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let date = CalendarDate::parse("2024-06-15").unwrap();
        assert_eq!(date, CalendarDate::from_ymd(2024, 6, 15));
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        assert!(CalendarDate::parse("2024-6-15").is_none());
        assert!(CalendarDate::parse("2024/06/15").is_none());
        assert!(CalendarDate::parse("2024-06-15T10:00:00Z").is_none());
        assert!(CalendarDate::parse("").is_none());
        assert!(CalendarDate::parse("abcd-ef-gh").is_none());
    }

    #[test]
    fn test_parse_rejects_impossible_dates() {
        assert!(CalendarDate::parse("2024-13-01").is_none());
        assert!(CalendarDate::parse("2024-00-10").is_none());
        assert!(CalendarDate::parse("2023-02-29").is_none());
        assert!(CalendarDate::parse("2024-04-31").is_none());
    }

    #[test]
    fn test_leap_year() {
        assert!(CalendarDate::parse("2024-02-29").is_some());
        assert!(CalendarDate::parse("2000-02-29").is_some());
        assert!(CalendarDate::parse("1900-02-29").is_none());
    }

    #[test]
    fn test_to_iso_pads() {
        assert_eq!(CalendarDate::from_ymd(2024, 1, 5).to_iso(), "2024-01-05");
    }

    #[test]
    fn test_to_long_date() {
        assert_eq!(
            CalendarDate::from_ymd(2024, 6, 1).to_long_date(),
            "June 1, 2024"
        );
        assert_eq!(
            CalendarDate::from_ymd(2023, 12, 31).to_long_date(),
            "December 31, 2023"
        );
    }

    #[test]
    fn test_long_date_fallback() {
        assert_eq!(long_date("2024-03-01"), "March 1, 2024");
        assert_eq!(long_date("someday"), "someday");
    }

    #[test]
    fn test_from_days_since_epoch() {
        assert_eq!(
            CalendarDate::from_days_since_epoch(0),
            CalendarDate::from_ymd(1970, 1, 1)
        );
        // 2000-03-01 is day 11017
        assert_eq!(
            CalendarDate::from_days_since_epoch(11_017),
            CalendarDate::from_ymd(2000, 3, 1)
        );
        // 2024-02-29 is day 19782
        assert_eq!(
            CalendarDate::from_days_since_epoch(19_782),
            CalendarDate::from_ymd(2024, 2, 29)
        );
    }

    #[test]
    fn test_today_is_valid() {
        let today = today();
        assert!(CalendarDate::parse(&today).is_some());
    }

    #[test]
    fn test_ordering_matches_chronology() {
        let a = CalendarDate::parse("2024-01-01").unwrap();
        let b = CalendarDate::parse("2024-06-01").unwrap();
        assert!(a < b);
    }
}

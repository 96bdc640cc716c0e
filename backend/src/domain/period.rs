//! Calendar months addressed by reports and the past/current classifier.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};

use super::ReportError;

/// Whether `(year, month)` lies strictly before the calendar month of
/// `reference_now`.
///
/// The current month is never past: entries may still be added to it.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use expense_reports::domain::is_past;
///
/// let now = Utc.with_ymd_and_hms(2025, 3, 15, 9, 0, 0).unwrap();
/// assert!(is_past(2025, 2, now));
/// assert!(is_past(2024, 12, now));
/// assert!(!is_past(2025, 3, now));
/// assert!(!is_past(2025, 4, now));
/// ```
pub fn is_past(year: i32, month: u32, reference_now: DateTime<Utc>) -> bool {
    year < reference_now.year() || (year == reference_now.year() && month < reference_now.month())
}

/// A validated (year, month) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReportPeriod {
    year: i32,
    month: u32,
}

impl ReportPeriod {
    /// Validate the month range and that the period is representable.
    pub fn new(year: i32, month: u32) -> Result<Self, ReportError> {
        if !(1..=12).contains(&month) {
            return Err(ReportError::InvalidMonth {
                month: i64::from(month),
            });
        }
        let period = Self { year, month };
        if period.first_day().is_none() || period.next_first_day().is_none() {
            return Err(ReportError::InvalidYear { year });
        }
        Ok(period)
    }

    /// Period containing `instant` (UTC calendar).
    pub fn containing(instant: DateTime<Utc>) -> Self {
        Self {
            year: instant.year(),
            month: instant.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    /// Whether this period is strictly before the month of `reference_now`.
    pub fn is_past(self, reference_now: DateTime<Utc>) -> bool {
        is_past(self.year, self.month, reference_now)
    }

    /// First and last instant of the month, both inclusive.
    ///
    /// The end bound is one nanosecond before the first instant of the
    /// following month, so month length follows the real calendar.
    pub fn bounds(self) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = self.first_day().map_or(DateTime::<Utc>::MIN_UTC, midnight_utc);
        let end = self
            .next_first_day()
            .map_or(DateTime::<Utc>::MAX_UTC, |next| {
                midnight_utc(next) - Duration::nanoseconds(1)
            });
        (start, end)
    }

    /// Whether `instant` falls within the month.
    pub fn contains(self, instant: DateTime<Utc>) -> bool {
        let (start, end) = self.bounds();
        start <= instant && instant <= end
    }

    fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    fn next_first_day(self) -> Option<NaiveDate> {
        if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year.checked_add(1)?, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        }
    }
}

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
}

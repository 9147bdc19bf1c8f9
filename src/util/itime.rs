/*!
The calendar and clock kernels.

Everything in this module works on plain integers. The public value types in
`crate::civil` are thin wrappers around the types here. There are two
kernels:

* `IDayIndex` and `IDate`, which convert between a proleptic Gregorian
`(year, month, day)` triple and a Julian Day Number. JDN `0` is
`-4713-11-24` and the largest supported JDN is `i32::MAX`, which is
`5874898-06-03`.
* `ITime`, a nanosecond of day in the range `0..100 hours`. Hours past `23`
are permitted ("business hours") and are only folded back into a 24 hour
clock by `ITime::hour`.

All conversions are closed form. No loops, no floating point.
*/

use crate::error::{civil::Error as E, duration::Error as DE, Error};

pub(crate) const NANOS_PER_MICRO: i64 = 1_000;
pub(crate) const NANOS_PER_MILLI: i64 = 1_000_000;
pub(crate) const NANOS_PER_SECOND: i64 = 1_000_000_000;
pub(crate) const NANOS_PER_MINUTE: i64 = 60 * NANOS_PER_SECOND;
pub(crate) const NANOS_PER_HOUR: i64 = 60 * NANOS_PER_MINUTE;
pub(crate) const NANOS_PER_DAY: i64 = 24 * NANOS_PER_HOUR;
pub(crate) const SECONDS_PER_DAY: i64 = 86_400;

/// One past the largest nanosecond of day, i.e., `100:00:00`.
pub(crate) const NANOS_OF_DAY_LIMIT: i64 = 100 * NANOS_PER_HOUR;

/// The JDN of `1970-01-01`.
pub(crate) const UNIX_EPOCH_JDN: i64 = 2_440_588;

pub(crate) const YEAR_MIN: i32 = -4713;
pub(crate) const YEAR_MAX: i32 = 5_874_898;

/// The number of days before the first of each month in a common year.
/// Index `0` is unused so that months can index directly.
static DAYS_BEFORE_MONTH: [i16; 13] =
    [0, 0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// A Julian Day Number in the supported range `0..=i32::MAX`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub(crate) struct IDayIndex {
    pub(crate) jdn: i32,
}

impl IDayIndex {
    pub(crate) const MIN: IDayIndex = IDayIndex { jdn: 0 };
    pub(crate) const MAX: IDayIndex = IDayIndex { jdn: i32::MAX };

    #[cfg_attr(feature = "perf-inline", inline(always))]
    pub(crate) fn try_new(jdn: i64) -> Result<IDayIndex, Error> {
        match i32::try_from(jdn) {
            Ok(jdn) if jdn >= 0 => Ok(IDayIndex { jdn }),
            _ => Err(Error::from(E::DayIndexOutOfBounds { index: jdn })),
        }
    }

    /// Like `try_new`, but for intermediate results of arithmetic that may
    /// not fit in an `i64`.
    pub(crate) fn try_new_wide(jdn: i128) -> Result<IDayIndex, Error> {
        let Ok(jdn) = i64::try_from(jdn) else {
            let index = if jdn < 0 { i64::MIN } else { i64::MAX };
            return Err(Error::from(E::DayIndexOutOfBounds { index }));
        };
        IDayIndex::try_new(jdn)
    }

    pub(crate) fn from_unix_epoch_day(day: i64) -> Result<IDayIndex, Error> {
        IDayIndex::try_new_wide(i128::from(day) + i128::from(UNIX_EPOCH_JDN))
    }

    pub(crate) fn to_unix_epoch_day(self) -> i64 {
        i64::from(self.jdn) - UNIX_EPOCH_JDN
    }

    /// Decomposes this day index into a Gregorian date.
    ///
    /// This is total: every index in range has a date in range.
    #[cfg_attr(feature = "perf-inline", inline(always))]
    pub(crate) fn to_date(self) -> IDate {
        let (year, month, day) = civil_from_jdn(i64::from(self.jdn));
        // The year of every in-range JDN fits in an i32.
        IDate { year: year as i32, month, day }
    }

    /// Returns the weekday as an offset from Monday (`0..=6`).
    ///
    /// JDN `0` fell on a Monday.
    pub(crate) fn weekday(self) -> i8 {
        weekday_from_jdn(i64::from(self.jdn))
    }

    pub(crate) fn checked_add(self, days: i64) -> Result<IDayIndex, Error> {
        IDayIndex::try_new_wide(i128::from(self.jdn) + i128::from(days))
    }
}

/// A validated proleptic Gregorian date within the supported range.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub(crate) struct IDate {
    pub(crate) year: i32,
    pub(crate) month: i8,
    pub(crate) day: i8,
}

impl IDate {
    pub(crate) const MIN: IDate = IDate { year: YEAR_MIN, month: 11, day: 24 };
    pub(crate) const MAX: IDate = IDate { year: YEAR_MAX, month: 6, day: 3 };

    /// Builds a date after checking the month, the day of the month (with
    /// the leap year rule for February) and finally the supported range.
    pub(crate) fn try_new(
        year: i32,
        month: i64,
        day: i64,
    ) -> Result<IDate, Error> {
        let month = check_month(month)?;
        check_year(i64::from(year))?;
        let max = days_in_month(year, month);
        if !(1 <= day && day <= i64::from(max)) {
            return Err(Error::from(E::InvalidDay { year, month, day, max }));
        }
        // OK because 1 <= day <= 31.
        let date = IDate { year, month, day: day as i8 };
        if date < IDate::MIN || date > IDate::MAX {
            return Err(Error::from(E::DateOutOfBounds { year, month, day: date.day }));
        }
        Ok(date)
    }

    /// Like `try_new`, but panics on invalid input. For use in `const`
    /// contexts.
    pub(crate) const fn constant(year: i32, month: i8, day: i8) -> IDate {
        if !(1 <= month && month <= 12) {
            panic!("invalid month");
        }
        if !(YEAR_MIN <= year && year <= YEAR_MAX) {
            panic!("invalid year");
        }
        if !(1 <= day && day <= days_in_month(year, month)) {
            panic!("invalid day");
        }
        let jdn = jdn_from_civil(year as i64, month, day);
        if !(0 <= jdn && jdn <= i32::MAX as i64) {
            panic!("date is outside the supported range");
        }
        IDate { year, month, day }
    }

    /// Builds a date from a JDN computed by arithmetic, reporting the
    /// (possibly out of range) calendar date when it is out of bounds.
    fn from_wide_jdn(jdn: i128) -> Result<IDate, Error> {
        const NEAR: i64 = 1 << 40;
        if let Ok(jdn) = i64::try_from(jdn) {
            if let Ok(index) = IDayIndex::try_new(jdn) {
                return Ok(index.to_date());
            }
            if !(-NEAR <= jdn && jdn <= NEAR) {
                return IDayIndex::try_new(jdn).map(IDayIndex::to_date);
            }
            let (year, month, day) = civil_from_jdn(jdn);
            if let Ok(year) = i32::try_from(year) {
                return Err(Error::from(E::DateOutOfBounds { year, month, day }));
            }
        }
        IDayIndex::try_new_wide(jdn).map(IDayIndex::to_date)
    }

    #[cfg_attr(feature = "perf-inline", inline(always))]
    pub(crate) fn to_day_index(self) -> IDayIndex {
        let jdn = jdn_from_civil(i64::from(self.year), self.month, self.day);
        // OK because an `IDate` is always within the supported range.
        IDayIndex { jdn: jdn as i32 }
    }

    pub(crate) fn weekday(self) -> i8 {
        self.to_day_index().weekday()
    }

    /// Returns the 1-based ordinal day of the year.
    pub(crate) fn day_of_year(self) -> i16 {
        let leap = self.month > 2 && is_leap_year(self.year);
        DAYS_BEFORE_MONTH[self.month as usize]
            + i16::from(self.day)
            + i16::from(leap)
    }

    /// Returns the ISO 8601 week-numbering year and week of this date.
    ///
    /// The week is `floor((10 + ordinal - weekday) / 7)` where weekday is
    /// `1..=7` starting at Monday. A result of `0` belongs to the last week
    /// of the previous year, and `53` belongs to week `1` of the next year
    /// unless this year has 53 weeks.
    pub(crate) fn iso_week(self) -> (i32, i8) {
        let ordinal = i32::from(self.day_of_year());
        let weekday = i32::from(self.weekday()) + 1;
        // Never negative since ordinal >= 1 and weekday <= 7.
        let week = (10 + ordinal - weekday) / 7;
        if week == 0 {
            let year = self.year - 1;
            return (year, iso_weeks_in_year(year));
        }
        if week == 53 && iso_weeks_in_year(self.year) == 52 {
            return (self.year + 1, 1);
        }
        (self.year, week as i8)
    }

    pub(crate) fn from_day_of_year(
        year: i32,
        day: i64,
    ) -> Result<IDate, Error> {
        check_year(i64::from(year))?;
        let max = days_in_year(year);
        if !(1 <= day && day <= i64::from(max)) {
            return Err(Error::from(E::InvalidDayOfYear { year, day, max }));
        }
        let jan1 = jdn_from_civil(i64::from(year), 1, 1);
        IDate::from_wide_jdn(i128::from(jan1) + i128::from(day - 1))
    }

    /// Builds a date from an ISO 8601 week date. `weekday` is an offset from
    /// Monday (`0..=6`).
    pub(crate) fn from_iso_week(
        year: i32,
        week: i64,
        weekday: i8,
    ) -> Result<IDate, Error> {
        check_year(i64::from(year))?;
        let max = iso_weeks_in_year(year);
        if !(1 <= week && week <= i64::from(max)) {
            return Err(Error::from(E::InvalidISOWeek { year, week, max }));
        }
        let jan4 = jdn_from_civil(i64::from(year), 1, 4);
        let monday = jan4 - i64::from(weekday_from_jdn(jan4));
        let jdn = monday + (week - 1) * 7 + i64::from(weekday);
        IDate::from_wide_jdn(i128::from(jdn))
    }

    /// Returns the first date in the given month that falls on `weekday`
    /// (an offset from Monday).
    pub(crate) fn first_weekday(
        year: i32,
        month: i64,
        weekday: i8,
    ) -> Result<IDate, Error> {
        let month = check_month(month)?;
        check_year(i64::from(year))?;
        let first = jdn_from_civil(i64::from(year), month, 1);
        let ahead = i64::from(weekday - weekday_from_jdn(first)).rem_euclid(7);
        IDate::from_wide_jdn(i128::from(first + ahead))
    }

    /// Adds years, then months (carrying into years), then a raw number of
    /// days.
    ///
    /// The day of the month is kept as an offset from the first of the
    /// resulting month, so `2021-01-31` plus one month is `2021-03-03`. The
    /// day delta is likewise a plain count of days that rolls across month
    /// and year boundaries.
    pub(crate) fn add_calendar(
        self,
        years: i64,
        months: i64,
        days: i64,
    ) -> Result<IDate, Error> {
        let total = i128::from(self.year) * 12
            + i128::from(self.month - 1)
            + i128::from(years) * 12
            + i128::from(months);
        let year = total.div_euclid(12);
        // OK because the remainder is in 0..=11.
        let month = (total.rem_euclid(12) + 1) as i8;
        let year = match i32::try_from(year) {
            Ok(year) if YEAR_MIN <= year && year <= YEAR_MAX => year,
            _ => {
                let year = i64::try_from(year).unwrap_or(if year < 0 {
                    i64::MIN
                } else {
                    i64::MAX
                });
                return Err(Error::from(E::YearOutOfBounds { year }));
            }
        };
        let first = jdn_from_civil(i64::from(year), month, 1);
        IDate::from_wide_jdn(
            i128::from(first)
                + i128::from(self.day - 1)
                + i128::from(days),
        )
    }
}

/// A nanosecond of day in the range `0..NANOS_OF_DAY_LIMIT`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub(crate) struct ITime {
    pub(crate) nanos: i64,
}

impl ITime {
    pub(crate) const ZERO: ITime = ITime { nanos: 0 };
    pub(crate) const MAX: ITime = ITime { nanos: NANOS_OF_DAY_LIMIT - 1 };

    pub(crate) fn try_new(
        hour: i64,
        minute: i64,
        second: i64,
        nanosecond: i64,
    ) -> Result<ITime, Error> {
        if !(0 <= hour && hour <= 99) {
            return Err(Error::from(E::InvalidHour { hour }));
        }
        if !(0 <= minute && minute <= 59) {
            return Err(Error::from(E::InvalidMinute { minute }));
        }
        if !(0 <= second && second <= 59) {
            return Err(Error::from(E::InvalidSecond { second }));
        }
        if !(0 <= nanosecond && nanosecond <= 999_999_999) {
            return Err(Error::from(E::InvalidNanosecond { nanosecond }));
        }
        let nanos = hour * NANOS_PER_HOUR
            + minute * NANOS_PER_MINUTE
            + second * NANOS_PER_SECOND
            + nanosecond;
        Ok(ITime { nanos })
    }

    /// Like `try_new`, but panics on invalid input. For use in `const`
    /// contexts.
    pub(crate) const fn constant(
        hour: i8,
        minute: i8,
        second: i8,
        nanosecond: i32,
    ) -> ITime {
        if !(0 <= hour && hour <= 99) {
            panic!("invalid hour");
        }
        if !(0 <= minute && minute <= 59) {
            panic!("invalid minute");
        }
        if !(0 <= second && second <= 59) {
            panic!("invalid second");
        }
        if !(0 <= nanosecond && nanosecond <= 999_999_999) {
            panic!("invalid nanosecond");
        }
        let nanos = hour as i64 * NANOS_PER_HOUR
            + minute as i64 * NANOS_PER_MINUTE
            + second as i64 * NANOS_PER_SECOND
            + nanosecond as i64;
        ITime { nanos }
    }

    pub(crate) fn try_from_nanos(nanos: i64) -> Result<ITime, Error> {
        if !(0 <= nanos && nanos < NANOS_OF_DAY_LIMIT) {
            return Err(Error::from(E::InvalidNanosecondOfDay { nanos }));
        }
        Ok(ITime { nanos })
    }

    /// The unnormalized hour, `0..=99`.
    #[cfg_attr(feature = "perf-inline", inline(always))]
    pub(crate) fn business_hour(self) -> i8 {
        (self.nanos / NANOS_PER_HOUR) as i8
    }

    /// The hour on a 24-hour clock, `0..=23`.
    #[cfg_attr(feature = "perf-inline", inline(always))]
    pub(crate) fn hour(self) -> i8 {
        self.business_hour() % 24
    }

    #[cfg_attr(feature = "perf-inline", inline(always))]
    pub(crate) fn minute(self) -> i8 {
        ((self.nanos / NANOS_PER_MINUTE) % 60) as i8
    }

    #[cfg_attr(feature = "perf-inline", inline(always))]
    pub(crate) fn second(self) -> i8 {
        ((self.nanos / NANOS_PER_SECOND) % 60) as i8
    }

    #[cfg_attr(feature = "perf-inline", inline(always))]
    pub(crate) fn subsec_nanosecond(self) -> i32 {
        (self.nanos % NANOS_PER_SECOND) as i32
    }

    /// Adds a signed number of nanoseconds to this time.
    ///
    /// A negative sum wraps around into the previous day(s) by adding whole
    /// days. A sum at or beyond `100:00:00` fails, as does a delta whose
    /// magnitude exceeds the largest time of day.
    pub(crate) fn wrapping_add(self, delta: i64) -> Result<ITime, Error> {
        let max = ITime::MAX.nanos;
        if !(-max <= delta && delta <= max) {
            return Err(Error::from(DE::TimeSpanTooLarge));
        }
        // Cannot overflow since both are bounded by 100 hours.
        let mut sum = self.nanos + delta;
        if sum < 0 {
            sum = sum.rem_euclid(NANOS_PER_DAY);
        }
        if sum > max {
            return Err(Error::from(DE::TimeSpanTooLarge));
        }
        Ok(ITime { nanos: sum })
    }
}

/// Returns true if and only if the given year is a leap year in the
/// proleptic Gregorian calendar.
///
/// A year is a leap year if it is divisible by 4, unless it is divisible by
/// 100 and not by 400.
#[cfg_attr(feature = "perf-inline", inline(always))]
pub(crate) const fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns the number of days in the given month of the given year.
#[cfg_attr(feature = "perf-inline", inline(always))]
pub(crate) const fn days_in_month(year: i32, month: i8) -> i8 {
    if month == 2 {
        if is_leap_year(year) {
            29
        } else {
            28
        }
    } else {
        30 | (month ^ (month >> 3))
    }
}

pub(crate) const fn days_in_year(year: i32) -> i16 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Returns the number of ISO 8601 weeks in the given week-numbering year.
///
/// A year has 53 weeks when it starts on a Thursday, or when it is a leap
/// year starting on a Wednesday.
pub(crate) fn iso_weeks_in_year(year: i32) -> i8 {
    let jan1 = weekday_from_jdn(jdn_from_civil(i64::from(year), 1, 1));
    if jan1 == 3 || (jan1 == 2 && is_leap_year(year)) {
        53
    } else {
        52
    }
}

fn check_month(month: i64) -> Result<i8, Error> {
    if !(1 <= month && month <= 12) {
        return Err(Error::from(E::InvalidMonth { month }));
    }
    Ok(month as i8)
}

fn check_year(year: i64) -> Result<(), Error> {
    if !(i64::from(YEAR_MIN) <= year && year <= i64::from(YEAR_MAX)) {
        return Err(Error::from(E::YearOutOfBounds { year }));
    }
    Ok(())
}

fn weekday_from_jdn(jdn: i64) -> i8 {
    jdn.rem_euclid(7) as i8
}

/// Converts a Gregorian date to a JDN. Valid for any `i32` year.
///
/// This is Howard Hinnant's `days_from_civil` shifted from the Unix epoch to
/// the Julian epoch.
#[cfg_attr(feature = "perf-inline", inline(always))]
pub(crate) const fn jdn_from_civil(year: i64, month: i8, day: i8) -> i64 {
    let (month, day) = (month as i64, day as i64);
    let year = if month <= 2 { year - 1 } else { year };
    let era = year.div_euclid(400);
    let yoe = year - era * 400;
    let mp = if month > 2 { month - 3 } else { month + 9 };
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468 + UNIX_EPOCH_JDN
}

/// Converts a JDN to a Gregorian `(year, month, day)`.
#[cfg_attr(feature = "perf-inline", inline(always))]
fn civil_from_jdn(jdn: i64) -> (i64, i8, i8) {
    let z = jdn - UNIX_EPOCH_JDN + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as i8;
    let month = if mp < 10 { mp + 3 } else { mp - 9 } as i8;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds() {
        assert_eq!(IDayIndex::MIN.to_date(), IDate::MIN);
        assert_eq!(IDayIndex::MAX.to_date(), IDate::MAX);
        assert_eq!(IDate::MIN.to_day_index(), IDayIndex::MIN);
        assert_eq!(IDate::MAX.to_day_index(), IDayIndex::MAX);

        assert!(IDate::try_new(-4713, 11, 23).unwrap_err().is_out_of_bounds());
        assert!(IDate::try_new(5874898, 6, 4).unwrap_err().is_out_of_bounds());
        assert!(IDate::try_new(-4714, 1, 1).unwrap_err().is_out_of_bounds());
        assert!(IDayIndex::try_new(-1).is_err());
        assert!(IDayIndex::try_new(i64::from(i32::MAX) + 1).is_err());
    }

    #[test]
    fn unix_epoch() {
        let date = IDate::try_new(1970, 1, 1).unwrap();
        assert_eq!(date.to_day_index().jdn, 2_440_588);
        assert_eq!(date.to_day_index().to_unix_epoch_day(), 0);
        // 1970-01-01 was a Thursday.
        assert_eq!(date.weekday(), 3);
    }

    #[test]
    fn roundtrip_every_day_near_epochs() {
        let ranges = [
            (0i64, 800_000i64),
            (2_400_000, 2_500_000),
            (i64::from(i32::MAX) - 800_000, i64::from(i32::MAX)),
        ];
        for (start, end) in ranges {
            let mut prev: Option<IDate> = None;
            for jdn in start..=end {
                let index = IDayIndex::try_new(jdn).unwrap();
                let date = index.to_date();
                assert_eq!(
                    date.to_day_index(),
                    index,
                    "round trip failed for {date:?}",
                );
                let got =
                    IDate::try_new(date.year, date.month.into(), date.day.into())
                        .unwrap();
                assert_eq!(got, date);
                if let Some(prev) = prev {
                    assert!(prev < date, "{prev:?} < {date:?}");
                }
                prev = Some(date);
            }
        }
    }

    #[test]
    fn leap_year() {
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2004));
        assert!(!is_leap_year(2021));
        assert!(is_leap_year(0));
        assert!(is_leap_year(-4));
        assert!(!is_leap_year(-100));
        assert!(is_leap_year(-400));
    }

    #[test]
    fn number_of_days_in_month() {
        let expected = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (i, &days) in expected.iter().enumerate() {
            assert_eq!(days_in_month(2023, (i + 1) as i8), days);
        }
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2100, 2), 28);
    }

    #[test]
    fn invalid_components() {
        assert!(IDate::try_new(2023, 2, 29).unwrap_err().is_invalid_date());
        assert!(IDate::try_new(2023, 13, 1).unwrap_err().is_invalid_date());
        assert!(IDate::try_new(2023, 0, 1).unwrap_err().is_invalid_date());
        assert!(IDate::try_new(2023, 4, 31).unwrap_err().is_invalid_date());
        assert!(IDate::try_new(2024, 2, 29).is_ok());
    }

    #[test]
    fn ordinal_day() {
        let date = IDate::try_new(2024, 3, 1).unwrap();
        assert_eq!(date.day_of_year(), 61);
        let date = IDate::try_new(2023, 3, 1).unwrap();
        assert_eq!(date.day_of_year(), 60);
        let date = IDate::try_new(2024, 12, 31).unwrap();
        assert_eq!(date.day_of_year(), 366);

        assert_eq!(
            IDate::from_day_of_year(2024, 366).unwrap(),
            IDate { year: 2024, month: 12, day: 31 },
        );
        assert!(IDate::from_day_of_year(2023, 366)
            .unwrap_err()
            .is_invalid_date());
        assert!(IDate::from_day_of_year(2023, 0).unwrap_err().is_invalid_date());
    }

    #[test]
    fn iso_week_boundaries() {
        let week = |y, m, d| IDate::try_new(y, m, d).unwrap().iso_week();
        assert_eq!(week(2020, 12, 31), (2020, 53));
        assert_eq!(week(2021, 1, 1), (2020, 53));
        assert_eq!(week(2021, 1, 3), (2020, 53));
        assert_eq!(week(2021, 1, 4), (2021, 1));
        assert_eq!(week(1950, 1, 1), (1949, 52));
        assert_eq!(week(1950, 1, 2), (1950, 1));
        assert_eq!(week(2024, 12, 30), (2025, 1));
        assert_eq!(week(2026, 12, 31), (2026, 53));
        assert_eq!(week(2027, 1, 1), (2026, 53));
        assert_eq!(week(2008, 12, 29), (2009, 1));
        assert_eq!(week(2010, 1, 3), (2009, 53));
    }

    #[test]
    fn iso_week_roundtrip_across_year_boundaries() {
        for year in 1890..2110 {
            for (month, day) in [(12, 24), (1, 1)] {
                let start = IDate::try_new(year, month, day).unwrap();
                let start = start.to_day_index();
                for offset in 0..14 {
                    let date = start.checked_add(offset).unwrap().to_date();
                    let (wyear, week) = date.iso_week();
                    assert!(1 <= week && week <= iso_weeks_in_year(wyear));
                    let got = IDate::from_iso_week(
                        wyear,
                        week.into(),
                        date.weekday(),
                    )
                    .unwrap();
                    assert_eq!(got, date, "{date:?} -> {wyear}-W{week}");
                }
            }
        }
    }

    #[test]
    fn iso_week_invalid() {
        assert!(IDate::from_iso_week(2021, 53, 0).unwrap_err().is_invalid_date());
        assert!(IDate::from_iso_week(2020, 53, 0).is_ok());
        assert!(IDate::from_iso_week(2020, 0, 0).unwrap_err().is_invalid_date());
    }

    #[test]
    fn first_weekday() {
        // 2024-07-01 was a Monday.
        let got = IDate::first_weekday(2024, 7, 0).unwrap();
        assert_eq!(got, IDate { year: 2024, month: 7, day: 1 });
        let got = IDate::first_weekday(2024, 7, 6).unwrap();
        assert_eq!(got, IDate { year: 2024, month: 7, day: 7 });
        let got = IDate::first_weekday(2024, 8, 0).unwrap();
        assert_eq!(got, IDate { year: 2024, month: 8, day: 5 });
    }

    #[test]
    fn add_calendar() {
        let date = IDate::try_new(2020, 3, 18).unwrap();
        assert_eq!(
            date.add_calendar(0, 0, 20).unwrap(),
            IDate { year: 2020, month: 4, day: 7 },
        );
        assert_eq!(
            date.add_calendar(1, 0, 0).unwrap(),
            IDate { year: 2021, month: 3, day: 18 },
        );
        assert_eq!(
            date.add_calendar(0, -15, 0).unwrap(),
            IDate { year: 2018, month: 12, day: 18 },
        );
        let date = IDate::try_new(2021, 1, 31).unwrap();
        assert_eq!(
            date.add_calendar(0, 1, 0).unwrap(),
            IDate { year: 2021, month: 3, day: 3 },
        );
        let date = IDate::try_new(2020, 12, 31).unwrap();
        assert_eq!(
            date.add_calendar(0, 0, 1).unwrap(),
            IDate { year: 2021, month: 1, day: 1 },
        );
        assert!(IDate::MAX.add_calendar(0, 0, 1).unwrap_err().is_out_of_bounds());
        assert!(IDate::MIN.add_calendar(0, 0, -1).unwrap_err().is_out_of_bounds());
        assert!(IDate::MIN
            .add_calendar(i64::MAX, i64::MAX, 0)
            .unwrap_err()
            .is_out_of_bounds());
    }

    #[test]
    fn time_components() {
        let t = ITime::try_new(25, 30, 15, 123).unwrap();
        assert_eq!(t.business_hour(), 25);
        assert_eq!(t.hour(), 1);
        assert_eq!(t.minute(), 30);
        assert_eq!(t.second(), 15);
        assert_eq!(t.subsec_nanosecond(), 123);

        assert!(ITime::try_new(100, 0, 0, 0).unwrap_err().is_invalid_time());
        assert!(ITime::try_new(0, 60, 0, 0).unwrap_err().is_invalid_time());
        assert!(ITime::try_new(0, 0, 60, 0).unwrap_err().is_invalid_time());
        assert!(ITime::try_new(0, 0, 0, 1_000_000_000)
            .unwrap_err()
            .is_invalid_time());
        assert_eq!(
            ITime::try_new(99, 59, 59, 999_999_999).unwrap(),
            ITime::MAX,
        );
    }

    #[test]
    fn time_wrapping_add() {
        let two = ITime::try_new(2, 0, 0, 0).unwrap();
        let got = two.wrapping_add(-3 * NANOS_PER_HOUR).unwrap();
        assert_eq!(got, ITime::try_new(23, 0, 0, 0).unwrap());

        let got = two.wrapping_add(23 * NANOS_PER_HOUR).unwrap();
        assert_eq!(got.business_hour(), 25);
        assert_eq!(got.hour(), 1);

        assert!(ITime::MAX.wrapping_add(1).unwrap_err().is_duration_overflow());
        assert!(two
            .wrapping_add(NANOS_OF_DAY_LIMIT)
            .unwrap_err()
            .is_duration_overflow());
    }
}

use alloc::string::String;

use crate::{
    civil::{Era, LocalDateTime, LocalTime, Weekday},
    error::{civil::Error as E, Error, ErrorContext},
    fmt::layout::{self, IsoPrinter},
    util::itime::{self, IDate, IDayIndex, SECONDS_PER_DAY},
    Extent,
};

/// A representation of a civil date in the proleptic Gregorian calendar.
///
/// A `LocalDate` is backed by a Julian Day Number: a count of days since
/// `-4713-11-24`. Every `LocalDate` value is guaranteed to be a valid
/// Gregorian calendar date in the range `-4713-11-24..=5874898-06-03`. Both
/// `2023-02-29` and `2023-11-31` are invalid and cannot be represented.
///
/// # Construction
///
/// There are two families of constructors:
///
/// * [`LocalDate::new`] returns an error for invalid input. Use this for data
/// that comes from outside your program.
/// * [`LocalDate::constant`] and the free function [`date`] panic on invalid
/// input. Use these for literals known to be valid.
///
/// # Comparisons
///
/// Dates are ordered by their day index, which is the same as calendar order.
///
/// ```
/// use tempora::civil::date;
///
/// assert!(date(2024, 3, 11) < date(2025, 1, 31));
/// ```
///
/// # Arithmetic
///
/// Every fallible arithmetic routine has a `can_*` counterpart that performs
/// the same bounds check without building an error:
///
/// ```
/// use tempora::civil::{date, LocalDate};
///
/// assert_eq!(date(2020, 3, 18).checked_add_days(20)?, date(2020, 4, 7));
/// assert!(!LocalDate::MAX.can_add_days(1));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// Subtracting two dates yields an exact [`Extent`] of whole days.
#[derive(Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct LocalDate {
    index: IDayIndex,
}

impl LocalDate {
    /// The minimum representable date, `-4713-11-24`.
    pub const MIN: LocalDate = LocalDate { index: IDayIndex::MIN };

    /// The maximum representable date, `5874898-06-03`.
    pub const MAX: LocalDate = LocalDate { index: IDayIndex::MAX };

    /// The Unix epoch, `1970-01-01`.
    pub const UNIX_EPOCH: LocalDate =
        LocalDate { index: IDayIndex { jdn: itime::UNIX_EPOCH_JDN as i32 } };

    /// Creates a new date from its year, month and day.
    ///
    /// # Errors
    ///
    /// This returns an error when the month is not in `1..=12`, when the day
    /// is not valid for the given month (taking leap years into account) or
    /// when the date is outside the range `LocalDate::MIN..=LocalDate::MAX`.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::civil::LocalDate;
    ///
    /// let d = LocalDate::new(2024, 2, 29)?;
    /// assert_eq!((d.year(), d.month(), d.day()), (2024, 2, 29));
    ///
    /// assert!(LocalDate::new(2023, 2, 29).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(year: i32, month: i8, day: i8) -> Result<LocalDate, Error> {
        let idate = IDate::try_new(year, i64::from(month), i64::from(day))?;
        Ok(LocalDate::from_idate(idate))
    }

    /// Creates a new date in a `const` context.
    ///
    /// # Panics
    ///
    /// This panics whenever [`LocalDate::new`] would return an error.
    pub const fn constant(year: i32, month: i8, day: i8) -> LocalDate {
        let idate = IDate::constant(year, month, day);
        let jdn = itime::jdn_from_civil(idate.year as i64, idate.month, idate.day);
        LocalDate { index: IDayIndex { jdn: jdn as i32 } }
    }

    /// Creates a date from a 1-based ordinal day of the year.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::civil::{date, LocalDate};
    ///
    /// assert_eq!(LocalDate::from_day_of_year(2024, 60)?, date(2024, 2, 29));
    /// assert!(LocalDate::from_day_of_year(2023, 366).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_day_of_year(year: i32, day: i16) -> Result<LocalDate, Error> {
        let idate = IDate::from_day_of_year(year, i64::from(day))?;
        Ok(LocalDate::from_idate(idate))
    }

    /// Creates a date from an ISO 8601 week date.
    ///
    /// The week must be in `1..=52`, or `1..=53` for week-numbering years
    /// that have 53 weeks.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::civil::{date, LocalDate, Weekday};
    ///
    /// let d = LocalDate::from_iso_week(2020, 53, Weekday::Friday)?;
    /// assert_eq!(d, date(2021, 1, 1));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_iso_week(
        year: i32,
        week: i8,
        weekday: Weekday,
    ) -> Result<LocalDate, Error> {
        let idate = IDate::from_iso_week(
            year,
            i64::from(week),
            weekday.to_monday_zero_offset(),
        )?;
        Ok(LocalDate::from_idate(idate))
    }

    /// Returns the first date in the given month falling on `weekday`.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::civil::{date, LocalDate, Weekday};
    ///
    /// let d = LocalDate::first_weekday_of_month(2024, 8, Weekday::Monday)?;
    /// assert_eq!(d, date(2024, 8, 5));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn first_weekday_of_month(
        year: i32,
        month: i8,
        weekday: Weekday,
    ) -> Result<LocalDate, Error> {
        let idate = IDate::first_weekday(
            year,
            i64::from(month),
            weekday.to_monday_zero_offset(),
        )?;
        Ok(LocalDate::from_idate(idate))
    }

    /// Creates a date from its Julian Day Number.
    ///
    /// # Errors
    ///
    /// This returns an error when the index is negative.
    pub fn from_day_index(jdn: i32) -> Result<LocalDate, Error> {
        Ok(LocalDate { index: IDayIndex::try_new(i64::from(jdn))? })
    }

    /// Creates a date from a number of days since `1970-01-01`.
    pub fn from_unix_epoch_day(day: i64) -> Result<LocalDate, Error> {
        Ok(LocalDate { index: IDayIndex::from_unix_epoch_day(day)? })
    }

    /// Returns the Julian Day Number of this date.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::civil::date;
    ///
    /// assert_eq!(date(1970, 1, 1).day_index(), 2_440_588);
    /// ```
    #[inline]
    pub const fn day_index(self) -> i32 {
        self.index.jdn
    }

    /// Returns the number of days since `1970-01-01`.
    #[inline]
    pub fn to_unix_epoch_day(self) -> i64 {
        self.index.to_unix_epoch_day()
    }

    /// Returns the year. Years before `1 CE` are `0` or negative.
    #[inline]
    pub fn year(self) -> i32 {
        self.idate().year
    }

    /// Returns the year along with its era.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::civil::{date, Era};
    ///
    /// assert_eq!(date(2024, 1, 1).era_year(), (2024, Era::CE));
    /// assert_eq!(date(0, 1, 1).era_year(), (1, Era::BCE));
    /// assert_eq!(date(-43, 3, 15).era_year(), (44, Era::BCE));
    /// ```
    pub fn era_year(self) -> (i32, Era) {
        let year = self.year();
        if year > 0 {
            (year, Era::CE)
        } else {
            (1 - year, Era::BCE)
        }
    }

    /// Returns the month, in `1..=12`.
    #[inline]
    pub fn month(self) -> i8 {
        self.idate().month
    }

    /// Returns the day of the month, in `1..=31`.
    #[inline]
    pub fn day(self) -> i8 {
        self.idate().day
    }

    /// Returns the weekday of this date.
    #[inline]
    pub fn weekday(self) -> Weekday {
        Weekday::from_monday_zero_offset_unchecked(self.index.weekday())
    }

    /// Returns the 1-based ordinal day of the year.
    #[inline]
    pub fn day_of_year(self) -> i16 {
        self.idate().day_of_year()
    }

    /// Returns the ISO 8601 week-numbering year and week of this date.
    ///
    /// Near the start and end of a year, the week-numbering year can differ
    /// from the calendar year.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::civil::date;
    ///
    /// assert_eq!(date(2020, 12, 31).iso_week(), (2020, 53));
    /// assert_eq!(date(2021, 1, 1).iso_week(), (2020, 53));
    /// assert_eq!(date(1950, 1, 1).iso_week(), (1949, 52));
    /// assert_eq!(date(2024, 12, 30).iso_week(), (2025, 1));
    /// ```
    pub fn iso_week(self) -> (i32, i8) {
        self.idate().iso_week()
    }

    /// Returns the number of days in this date's month.
    pub fn days_in_month(self) -> i8 {
        let idate = self.idate();
        itime::days_in_month(idate.year, idate.month)
    }

    /// Returns the number of days in this date's year.
    pub fn days_in_year(self) -> i16 {
        itime::days_in_year(self.year())
    }

    /// Returns true when this date's year is a leap year.
    pub fn in_leap_year(self) -> bool {
        itime::is_leap_year(self.year())
    }

    /// Returns the first day of this date's month, clamped to
    /// `LocalDate::MIN`.
    pub fn first_of_month(self) -> LocalDate {
        let idate = self.idate();
        LocalDate::new(idate.year, idate.month, 1).unwrap_or(LocalDate::MIN)
    }

    /// Returns the last day of this date's month, clamped to
    /// `LocalDate::MAX`.
    pub fn last_of_month(self) -> LocalDate {
        let idate = self.idate();
        let last = itime::days_in_month(idate.year, idate.month);
        LocalDate::new(idate.year, idate.month, last).unwrap_or(LocalDate::MAX)
    }

    /// Combines this date with a time of day.
    ///
    /// # Errors
    ///
    /// A business hour time (`24:00` or later) rolls into the following
    /// day(s), which can leave the supported range.
    pub fn to_datetime(self, time: LocalTime) -> Result<LocalDateTime, Error> {
        LocalDateTime::new(self, time)
    }

    /// Adds a number of days to this date.
    ///
    /// # Errors
    ///
    /// This returns an error if the result would be out of bounds.
    pub fn checked_add_days(self, days: i64) -> Result<LocalDate, Error> {
        let index = self
            .index
            .checked_add(days)
            .context(E::FailedAddDays { days })?;
        Ok(LocalDate { index })
    }

    /// Returns true if [`LocalDate::checked_add_days`] would succeed.
    pub fn can_add_days(self, days: i64) -> bool {
        let sum = i128::from(self.index.jdn) + i128::from(days);
        0 <= sum && sum <= i128::from(i32::MAX)
    }

    /// Adds a number of days to this date, clamping the result to
    /// `LocalDate::MIN..=LocalDate::MAX`.
    pub fn saturating_add_days(self, days: i64) -> LocalDate {
        match self.checked_add_days(days) {
            Ok(date) => date,
            Err(_) if days < 0 => LocalDate::MIN,
            Err(_) => LocalDate::MAX,
        }
    }

    /// Adds years, months and days to this date, in that order.
    ///
    /// Years and months are added first, with months carrying into years.
    /// The day of the month is then kept as an offset from the first of the
    /// resulting month, so it never clamps: `2021-01-31` plus one month is
    /// `2021-03-03`. Finally, `days` is added as a plain count of days.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::civil::date;
    ///
    /// let d = date(2020, 3, 18);
    /// assert_eq!(d.checked_add_calendar(0, 0, 20)?, date(2020, 4, 7));
    /// assert_eq!(d.checked_add_calendar(1, -3, 0)?, date(2020, 12, 18));
    /// assert_eq!(date(2021, 1, 31).checked_add_calendar(0, 1, 0)?, date(2021, 3, 3));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn checked_add_calendar(
        self,
        years: i64,
        months: i64,
        days: i64,
    ) -> Result<LocalDate, Error> {
        let idate = self
            .idate()
            .add_calendar(years, months, days)
            .context(E::FailedAddCalendar { years, months, days })?;
        Ok(LocalDate::from_idate(idate))
    }

    /// Returns true if [`LocalDate::checked_add_calendar`] would succeed.
    pub fn can_add_calendar(self, years: i64, months: i64, days: i64) -> bool {
        self.idate().add_calendar(years, months, days).is_ok()
    }

    /// Returns the number of days from this date until `other`. This is
    /// negative when `other` is earlier.
    pub fn days_until(self, other: LocalDate) -> i64 {
        i64::from(other.index.jdn) - i64::from(self.index.jdn)
    }

    /// Formats this date with the given layout.
    ///
    /// # Errors
    ///
    /// This returns an error when the layout is invalid.
    ///
    /// # Panics
    ///
    /// This panics if the layout uses a specifier that requires a time of
    /// day or a UTC offset.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::civil::date;
    ///
    /// let d = date(2024, 7, 14);
    /// assert_eq!(d.strftime("%A, %B %-d, %Y")?, "Sunday, July 14, 2024");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn strftime(&self, layout: &str) -> Result<String, Error> {
        layout::format(layout, *self)
    }

    /// Parses a date from `input` with the given layout.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::civil::{date, LocalDate};
    ///
    /// let d = LocalDate::strptime("%d/%m/%y", "14/07/24")?;
    /// assert_eq!(d, date(2024, 7, 14));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn strptime(layout: &str, input: &str) -> Result<LocalDate, Error> {
        layout::parse(layout, input)?.to_date()
    }
}

impl LocalDate {
    #[inline]
    pub(crate) fn from_idate(idate: IDate) -> LocalDate {
        LocalDate { index: idate.to_day_index() }
    }

    #[inline]
    pub(crate) fn idate(self) -> IDate {
        self.index.to_date()
    }

    pub(crate) fn jdn(self) -> i64 {
        i64::from(self.index.jdn)
    }
}

/// Creates a new date.
///
/// This is a convenience for [`LocalDate::constant`].
///
/// # Panics
///
/// This panics when the year, month and day do not make a valid date in the
/// supported range.
///
/// # Example
///
/// ```
/// use tempora::civil::date;
///
/// assert_eq!(date(2024, 7, 14).to_string(), "2024-07-14");
/// ```
pub const fn date(year: i32, month: i8, day: i8) -> LocalDate {
    LocalDate::constant(year, month, day)
}

impl Default for LocalDate {
    fn default() -> LocalDate {
        LocalDate::UNIX_EPOCH
    }
}

impl core::fmt::Display for LocalDate {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::FmtWrite;

        IsoPrinter::new()
            .print_date(*self, FmtWrite(f))
            .map_err(|_| core::fmt::Error)
    }
}

impl core::fmt::Debug for LocalDate {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

/// Parses a date in one of the ISO 8601 forms: extended (`2024-07-14`),
/// basic (`20240714`), ordinal (`2024-196`) or week date (`2024-W28-7`).
impl core::str::FromStr for LocalDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<LocalDate, Error> {
        layout::parse_first(
            &[
                layout::ISO_DATE,
                layout::ISO_DATE_BASIC,
                layout::ISO_ORDINAL_DATE,
                layout::ISO_WEEK_DATE,
            ],
            s,
            |fields| fields.to_date(),
        )
    }
}

/// Computes the exact extent between two dates, in whole days.
///
/// This is negative when `rhs` is later than `self`.
impl core::ops::Sub for LocalDate {
    type Output = Extent;

    #[inline]
    fn sub(self, rhs: LocalDate) -> Extent {
        // At most 2^31 days, which always fits.
        Extent::from_secs(rhs.days_until(self) * SECONDS_PER_DAY)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for LocalDate {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for LocalDate {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<LocalDate, D::Error> {
        deserializer.deserialize_str(crate::fmt::serde::FromStrVisitor::new(
            "a date string like 2024-07-14",
        ))
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for LocalDate {
    fn arbitrary(g: &mut quickcheck::Gen) -> LocalDate {
        // Bias towards the years people actually write down.
        let jdn = if bool::arbitrary(g) {
            2_000_000 + i32::arbitrary(g).rem_euclid(1_000_000)
        } else {
            i32::arbitrary(g).rem_euclid(i32::MAX)
        };
        LocalDate { index: IDayIndex { jdn } }
    }

    fn shrink(&self) -> alloc::boxed::Box<dyn Iterator<Item = LocalDate>> {
        alloc::boxed::Box::new(
            self.index
                .jdn
                .shrink()
                .filter(|&jdn| jdn >= 0)
                .map(|jdn| LocalDate { index: IDayIndex { jdn } }),
        )
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn bounds() {
        assert_eq!(LocalDate::MIN, date(-4713, 11, 24));
        assert_eq!(LocalDate::MAX, date(5874898, 6, 3));
        assert_eq!(LocalDate::MIN.day_index(), 0);
        assert_eq!(LocalDate::MAX.day_index(), i32::MAX);

        insta::assert_snapshot!(
            LocalDate::new(-4713, 11, 23).unwrap_err(),
            @"date -4713-11-23 is outside the supported range of -4713-11-24..=5874898-06-03",
        );
        insta::assert_snapshot!(
            LocalDate::new(5874898, 6, 4).unwrap_err(),
            @"date 5874898-06-04 is outside the supported range of -4713-11-24..=5874898-06-03",
        );
        assert!(LocalDate::MIN.checked_add_days(-1).is_err());
        assert!(LocalDate::MAX.checked_add_days(1).is_err());
        assert!(!LocalDate::MIN.can_add_days(-1));
        assert!(!LocalDate::MAX.can_add_days(1));
        assert_eq!(LocalDate::MAX.saturating_add_days(1), LocalDate::MAX);
        assert_eq!(LocalDate::MIN.saturating_add_days(i64::MIN), LocalDate::MIN);
    }

    #[test]
    fn invalid() {
        insta::assert_snapshot!(
            LocalDate::new(2023, 2, 29).unwrap_err(),
            @"invalid day 29 for 2023-02, must be in range 1..=28",
        );
        insta::assert_snapshot!(
            LocalDate::new(2023, 13, 1).unwrap_err(),
            @"invalid month 13, must be in range 1..=12",
        );
        assert!(LocalDate::new(2023, 2, 29).unwrap_err().is_invalid_date());
    }

    #[test]
    fn add_calendar() {
        let d = date(2020, 3, 18);
        assert_eq!(d.checked_add_calendar(0, 0, 20).unwrap(), date(2020, 4, 7));
        assert_eq!(
            d.checked_add_calendar(0, 0, -18).unwrap(),
            date(2020, 2, 29),
        );
        insta::assert_snapshot!(
            LocalDate::MAX.checked_add_calendar(0, 1, 0).unwrap_err(),
            @"failed to add 0 years, 1 months and 0 days to date: date 5874898-07-03 is outside the supported range of -4713-11-24..=5874898-06-03",
        );
        assert!(!LocalDate::MAX.can_add_calendar(0, 1, 0));
        assert!(LocalDate::MAX
            .checked_add_calendar(0, 1, 0)
            .unwrap_err()
            .is_out_of_bounds());
    }

    #[test]
    fn accessors() {
        let d = date(2024, 2, 29);
        assert!(d.in_leap_year());
        assert_eq!(d.days_in_month(), 29);
        assert_eq!(d.days_in_year(), 366);
        assert_eq!(d.day_of_year(), 60);
        assert_eq!(d.weekday(), Weekday::Thursday);
        assert_eq!(d.first_of_month(), date(2024, 2, 1));
        assert_eq!(d.last_of_month(), date(2024, 2, 29));
        assert_eq!(LocalDate::MAX.last_of_month(), LocalDate::MAX);
        assert_eq!(LocalDate::MIN.first_of_month(), LocalDate::MIN);
        assert_eq!(date(1970, 1, 1).to_unix_epoch_day(), 0);
        assert_eq!(LocalDate::from_unix_epoch_day(-1).unwrap(), date(1969, 12, 31));
    }

    #[test]
    fn sub() {
        let extent = date(2024, 3, 1) - date(2024, 2, 1);
        assert_eq!(extent.as_secs(), 29 * 86_400);
        assert_eq!(date(2024, 2, 1).days_until(date(2024, 3, 1)), 29);
        let extent = LocalDate::MIN - LocalDate::MAX;
        assert_eq!(extent.as_secs(), -i64::from(i32::MAX) * 86_400);
    }

    #[test]
    fn display_and_parse() {
        assert_eq!(date(2024, 7, 14).to_string(), "2024-07-14");
        assert_eq!(date(-43, 3, 15).to_string(), "-0043-03-15");
        assert_eq!(date(12345, 1, 2).to_string(), "12345-01-02");

        let want = date(2024, 7, 14);
        assert_eq!("2024-07-14".parse::<LocalDate>().unwrap(), want);
        assert_eq!("20240714".parse::<LocalDate>().unwrap(), want);
        assert_eq!("2024-196".parse::<LocalDate>().unwrap(), want);
        assert_eq!("2024-W28-7".parse::<LocalDate>().unwrap(), want);
        assert!("2024-07-14x".parse::<LocalDate>().is_err());

        for d in [date(12345, 1, 2), LocalDate::MIN, LocalDate::MAX] {
            assert_eq!(d.to_string().parse::<LocalDate>().unwrap(), d);
        }
        assert_eq!(LocalDate::MAX.to_string(), "5874898-06-03");
    }

    quickcheck::quickcheck! {
        fn prop_components_roundtrip(d: LocalDate) -> bool {
            let got = LocalDate::new(d.year(), d.month(), d.day()).unwrap();
            got == d
        }

        fn prop_ordering_agrees_with_components(d1: LocalDate, d2: LocalDate) -> bool {
            let c1 = (d1.year(), d1.month(), d1.day());
            let c2 = (d2.year(), d2.month(), d2.day());
            d1.cmp(&d2) == c1.cmp(&c2)
        }

        fn prop_add_days_probe_agrees(d: LocalDate, days: i64) -> bool {
            d.can_add_days(days) == d.checked_add_days(days).is_ok()
        }

        fn prop_add_calendar_probe_agrees(d: LocalDate, months: i32, days: i32) -> bool {
            let (months, days) = (i64::from(months), i64::from(days));
            d.can_add_calendar(0, months, days)
                == d.checked_add_calendar(0, months, days).is_ok()
        }

        fn prop_iso_week_roundtrip(d: LocalDate) -> quickcheck::TestResult {
            let (year, week) = d.iso_week();
            match LocalDate::from_iso_week(year, week, d.weekday()) {
                Ok(got) => quickcheck::TestResult::from_bool(got == d),
                // The first days of the range belong to a week-numbering
                // year that starts before the supported range.
                Err(_) => quickcheck::TestResult::discard(),
            }
        }

        fn prop_display_parse_roundtrip(d: LocalDate) -> bool {
            let got: LocalDate = d.to_string().parse().unwrap();
            got == d
        }
    }
}

use alloc::string::String;

use crate::{
    civil::{LocalDate, LocalTime, Weekday},
    error::{civil::Error as E, Error, ErrorContext},
    fmt::layout::{self, IsoPrinter},
    tz::{Offset, OffsetProvider},
    util::itime::{IDayIndex, ITime, NANOS_PER_DAY},
    Extent, OffsetDateTime,
};

/// A representation of a civil datetime, with no time zone or offset.
///
/// Internally, a datetime is a single wide integer: the day index of its
/// date times the number of nanoseconds in a day, plus the nanosecond of
/// the day. Ordering, equality and subtraction all operate on that integer.
///
/// A datetime always stores a normalized 24-hour time. Combining a date
/// with a business hour time carries the excess into the date:
///
/// ```
/// use tempora::civil::{date, datetime, time};
///
/// let dt = date(2024, 7, 14).to_datetime(time(25, 30, 0, 0))?;
/// assert_eq!(dt, datetime(2024, 7, 15, 1, 30, 0, 0));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// The range of a datetime is `-4713-11-24T00:00:00` through
/// `5874898-06-03T23:59:59.999999999`.
#[derive(Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct LocalDateTime {
    value: i128,
}

const NANOS_PER_DAY_WIDE: i128 = NANOS_PER_DAY as i128;
const MIN_VALUE: i128 = 0;
const MAX_VALUE: i128 =
    (IDayIndex::MAX.jdn as i128 + 1) * NANOS_PER_DAY_WIDE - 1;

impl LocalDateTime {
    /// The earliest datetime, `-4713-11-24T00:00:00`.
    pub const MIN: LocalDateTime = LocalDateTime { value: MIN_VALUE };

    /// The latest datetime, `5874898-06-03T23:59:59.999999999`.
    pub const MAX: LocalDateTime = LocalDateTime { value: MAX_VALUE };

    /// Combines a date and a time of day.
    ///
    /// # Errors
    ///
    /// This returns an error when a business hour time carries the datetime
    /// past `LocalDateTime::MAX`.
    pub fn new(date: LocalDate, time: LocalTime) -> Result<LocalDateTime, Error> {
        let value = i128::from(date.jdn()) * NANOS_PER_DAY_WIDE
            + i128::from(time.nanosecond_of_day());
        LocalDateTime::from_value(value)
    }

    /// Creates a new datetime in a `const` context.
    ///
    /// Unlike [`LocalDateTime::new`], the hour must be in `0..=23`.
    ///
    /// # Panics
    ///
    /// This panics when any component is out of range.
    pub const fn constant(
        year: i32,
        month: i8,
        day: i8,
        hour: i8,
        minute: i8,
        second: i8,
        nanosecond: i32,
    ) -> LocalDateTime {
        if hour > 23 {
            panic!("invalid hour for a datetime, must be in range 0..=23");
        }
        let date = LocalDate::constant(year, month, day);
        let time = ITime::constant(hour, minute, second, nanosecond);
        let value = (date.day_index() as i128) * NANOS_PER_DAY_WIDE
            + time.nanos as i128;
        LocalDateTime { value }
    }

    /// Returns the date part of this datetime.
    pub fn date(self) -> LocalDate {
        let jdn = self.value.div_euclid(NANOS_PER_DAY_WIDE);
        // The value is bounded, so the quotient always fits.
        LocalDate::from_day_index(jdn as i32).unwrap_or(LocalDate::MIN)
    }

    /// Returns the time of day part of this datetime. It is never a business
    /// hour.
    pub fn time(self) -> LocalTime {
        let nanos = self.value.rem_euclid(NANOS_PER_DAY_WIDE) as i64;
        LocalTime::from_itime(ITime { nanos })
    }

    /// Returns the year of this datetime's date.
    pub fn year(self) -> i32 {
        self.date().year()
    }

    /// Returns the month of this datetime's date.
    pub fn month(self) -> i8 {
        self.date().month()
    }

    /// Returns the day of this datetime's date.
    pub fn day(self) -> i8 {
        self.date().day()
    }

    /// Returns the weekday of this datetime's date.
    pub fn weekday(self) -> Weekday {
        self.date().weekday()
    }

    /// Returns the hour, in `0..=23`.
    pub fn hour(self) -> i8 {
        self.time().hour()
    }

    /// Returns the minute, in `0..=59`.
    pub fn minute(self) -> i8 {
        self.time().minute()
    }

    /// Returns the second, in `0..=59`.
    pub fn second(self) -> i8 {
        self.time().second()
    }

    /// Returns the nanosecond within the current second.
    pub fn subsec_nanosecond(self) -> i32 {
        self.time().subsec_nanosecond()
    }

    /// Adds an exact extent to this datetime.
    ///
    /// # Errors
    ///
    /// This returns an error when the result is out of range.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::{civil::datetime, Extent};
    ///
    /// let dt = datetime(2024, 12, 31, 23, 0, 0, 0);
    /// let got = dt.checked_add(Extent::from_hours(2))?;
    /// assert_eq!(got, datetime(2025, 1, 1, 1, 0, 0, 0));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn checked_add(self, extent: Extent) -> Result<LocalDateTime, Error> {
        LocalDateTime::from_value(self.value + extent.as_nanos())
            .context(E::FailedAddExtent)
    }

    /// Returns true if [`LocalDateTime::checked_add`] would succeed.
    pub fn can_add(self, extent: Extent) -> bool {
        let sum = self.value + extent.as_nanos();
        (MIN_VALUE..=MAX_VALUE).contains(&sum)
    }

    /// Adds years, months and days to this datetime's date, keeping its time
    /// of day. See [`LocalDate::checked_add_calendar`].
    pub fn checked_add_calendar(
        self,
        years: i64,
        months: i64,
        days: i64,
    ) -> Result<LocalDateTime, Error> {
        let date = self.date().checked_add_calendar(years, months, days)?;
        LocalDateTime::new(date, self.time())
    }

    /// Returns true if [`LocalDateTime::checked_add_calendar`] would succeed.
    pub fn can_add_calendar(self, years: i64, months: i64, days: i64) -> bool {
        self.date().can_add_calendar(years, months, days)
    }

    /// Attaches a UTC offset to this datetime. The wall clock reading is
    /// unchanged.
    pub fn to_offset(self, offset: Offset) -> OffsetDateTime {
        OffsetDateTime::new(self, offset)
    }

    /// Attaches the offset that `provider` reports for this wall clock
    /// reading.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::{civil::datetime, tz::Offset};
    ///
    /// let dt = datetime(2024, 7, 14, 9, 0, 0, 0);
    /// let odt = dt.to_offset_with(&Offset::constant(-4, 0))?;
    /// assert_eq!(odt.to_string(), "2024-07-14T09:00:00-04:00");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn to_offset_with<P: OffsetProvider>(
        self,
        provider: &P,
    ) -> Result<OffsetDateTime, Error> {
        let offset = provider.offset_for_local(self)?;
        Ok(OffsetDateTime::new(self, offset))
    }

    /// Returns the exact extent elapsed from `other` until `self`. This is
    /// negative when `other` is later.
    pub fn since(self, other: LocalDateTime) -> Extent {
        Extent::from_wide_nanos(self.value - other.value)
    }

    /// Formats this datetime with the given layout.
    ///
    /// # Panics
    ///
    /// This panics if the layout uses an offset specifier.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::civil::datetime;
    ///
    /// let dt = datetime(2024, 7, 14, 16, 24, 0, 0);
    /// assert_eq!(dt.strftime("%a %b %d %I:%M %p %Y")?, "Sun Jul 14 04:24 PM 2024");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn strftime(&self, layout: &str) -> Result<String, Error> {
        layout::format(layout, *self)
    }

    /// Parses a datetime from `input` with the given layout. A layout
    /// without time specifiers yields midnight.
    pub fn strptime(layout: &str, input: &str) -> Result<LocalDateTime, Error> {
        layout::parse(layout, input)?.to_datetime()
    }
}

impl LocalDateTime {
    /// Returns the combined nanosecond value.
    pub(crate) fn value(self) -> i128 {
        self.value
    }

    pub(crate) fn from_value(value: i128) -> Result<LocalDateTime, Error> {
        if !(MIN_VALUE..=MAX_VALUE).contains(&value) {
            return Err(Error::from(E::DatetimeOutOfRange));
        }
        Ok(LocalDateTime { value })
    }
}

/// Creates a new datetime.
///
/// This is a convenience for [`LocalDateTime::constant`].
///
/// # Panics
///
/// This panics when any component is out of range.
pub const fn datetime(
    year: i32,
    month: i8,
    day: i8,
    hour: i8,
    minute: i8,
    second: i8,
    nanosecond: i32,
) -> LocalDateTime {
    LocalDateTime::constant(year, month, day, hour, minute, second, nanosecond)
}

impl Default for LocalDateTime {
    fn default() -> LocalDateTime {
        LocalDateTime::constant(1970, 1, 1, 0, 0, 0, 0)
    }
}

impl core::fmt::Display for LocalDateTime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::FmtWrite;

        IsoPrinter::new()
            .print_datetime(*self, FmtWrite(f))
            .map_err(|_| core::fmt::Error)
    }
}

impl core::fmt::Debug for LocalDateTime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

/// Parses a datetime in the ISO 8601 extended (`2024-07-14T16:24:00`) or
/// basic (`20240714T162400`) form.
impl core::str::FromStr for LocalDateTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<LocalDateTime, Error> {
        layout::parse_first(
            &[layout::ISO_DATETIME, layout::ISO_DATETIME_BASIC],
            s,
            |fields| fields.to_datetime(),
        )
    }
}

impl core::ops::Sub for LocalDateTime {
    type Output = Extent;

    #[inline]
    fn sub(self, rhs: LocalDateTime) -> Extent {
        self.since(rhs)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for LocalDateTime {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for LocalDateTime {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<LocalDateTime, D::Error> {
        deserializer.deserialize_str(crate::fmt::serde::FromStrVisitor::new(
            "a datetime string like 2024-07-14T16:24:00",
        ))
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for LocalDateTime {
    fn arbitrary(g: &mut quickcheck::Gen) -> LocalDateTime {
        let date = LocalDate::arbitrary(g);
        let nanos = i64::arbitrary(g).rem_euclid(NANOS_PER_DAY);
        let value = i128::from(date.jdn()) * NANOS_PER_DAY_WIDE
            + i128::from(nanos);
        LocalDateTime { value }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use crate::civil::{date, time};

    use super::*;

    #[test]
    fn bounds() {
        assert_eq!(LocalDateTime::MIN.date(), LocalDate::MIN);
        assert_eq!(LocalDateTime::MIN.time(), LocalTime::MIDNIGHT);
        assert_eq!(LocalDateTime::MAX.date(), LocalDate::MAX);
        assert_eq!(LocalDateTime::MAX.time(), time(23, 59, 59, 999_999_999));

        insta::assert_snapshot!(
            LocalDate::MAX.to_datetime(time(24, 0, 0, 0)).unwrap_err(),
            @"datetime is outside the supported range of -4713-11-24T00:00:00..=5874898-06-03T23:59:59.999999999",
        );
        insta::assert_snapshot!(
            LocalDateTime::MIN.checked_add(Extent::from_nanos(-1)).unwrap_err(),
            @"failed to add extent to datetime: datetime is outside the supported range of -4713-11-24T00:00:00..=5874898-06-03T23:59:59.999999999",
        );
        assert!(!LocalDateTime::MAX.can_add(Extent::from_nanos(1)));
        assert!(LocalDateTime::MAX.can_add(Extent::from_nanos(-1)));
    }

    #[test]
    fn business_hours_carry() {
        let dt = date(2024, 12, 31).to_datetime(time(49, 0, 0, 0)).unwrap();
        assert_eq!(dt, datetime(2025, 1, 2, 1, 0, 0, 0));
        assert_eq!(dt.hour(), 1);
    }

    #[test]
    fn arithmetic() {
        let dt = datetime(2020, 1, 31, 12, 0, 0, 0);
        assert_eq!(
            dt.checked_add_calendar(0, 1, 0).unwrap(),
            datetime(2020, 3, 2, 12, 0, 0, 0),
        );
        let later = dt.checked_add(Extent::new(90_061, 5).unwrap()).unwrap();
        assert_eq!(later, datetime(2020, 2, 1, 13, 1, 1, 5));
        assert_eq!(later - dt, Extent::new(90_061, 5).unwrap());
        assert_eq!(dt.since(later), Extent::new(-90_061, -5).unwrap());
    }

    #[test]
    fn display_and_parse() {
        let dt = datetime(2024, 7, 14, 16, 24, 0, 0);
        assert_eq!(dt.to_string(), "2024-07-14T16:24:00");
        assert_eq!("2024-07-14T16:24:00".parse::<LocalDateTime>().unwrap(), dt);
        assert_eq!("20240714T162400".parse::<LocalDateTime>().unwrap(), dt);
        let dt = datetime(2024, 7, 14, 16, 24, 0, 123_000_000);
        assert_eq!(dt.to_string(), "2024-07-14T16:24:00.123");
        assert_eq!(dt.to_string().parse::<LocalDateTime>().unwrap(), dt);

        let max = LocalDateTime::MAX;
        assert_eq!(max.to_string(), "5874898-06-03T23:59:59.999999999");
        for dt in [datetime(12345, 1, 2, 3, 4, 5, 0), LocalDateTime::MIN, max] {
            assert_eq!(dt.to_string().parse::<LocalDateTime>().unwrap(), dt);
        }
    }

    quickcheck::quickcheck! {
        fn prop_parts_roundtrip(dt: LocalDateTime) -> bool {
            LocalDateTime::new(dt.date(), dt.time()).unwrap() == dt
        }

        fn prop_add_probe_agrees(dt: LocalDateTime, secs: i64) -> bool {
            let extent = Extent::from_secs(secs);
            dt.can_add(extent) == dt.checked_add(extent).is_ok()
        }

        fn prop_since_then_add(dt1: LocalDateTime, dt2: LocalDateTime) -> bool {
            dt2.checked_add(dt1.since(dt2)).unwrap() == dt1
        }
    }
}

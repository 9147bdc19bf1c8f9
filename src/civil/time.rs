use alloc::string::String;

use crate::{
    error::{civil::Error as E, Error, ErrorContext},
    fmt::layout::{self, IsoPrinter},
    util::itime::{ITime, NANOS_PER_DAY, NANOS_PER_MILLI},
    Duration,
};

/// A representation of a civil time of day.
///
/// A `LocalTime` is a count of nanoseconds since midnight. Unlike most time
/// of day types, the hour may go up to `99`. Hours of `24` or more are
/// "business hours": `25:00` is one hour past the *next* midnight, is
/// ordered after `23:59` and is distinct from `01:00`.
///
/// Two accessors expose the hour:
///
/// * [`LocalTime::business_hour`] returns the raw hour, in `0..=99`.
/// * [`LocalTime::hour`] returns the hour on a 24-hour clock, in `0..=23`.
///
/// ```
/// use tempora::civil::time;
///
/// let t = time(25, 30, 0, 0);
/// assert_eq!(t.business_hour(), 25);
/// assert_eq!(t.hour(), 1);
/// assert!(t.is_business_hour());
/// assert!(t > time(23, 59, 59, 999_999_999));
/// ```
///
/// # Arithmetic
///
/// Adding a [`Duration`] wraps negative results into the previous day and
/// never carries into a date. Use [`LocalDateTime`](crate::civil::LocalDateTime)
/// when the date matters.
#[derive(Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct LocalTime {
    itime: ITime,
}

impl LocalTime {
    /// Midnight, `00:00:00`.
    pub const MIN: LocalTime = LocalTime { itime: ITime::ZERO };

    /// The last representable time, `99:59:59.999999999`.
    pub const MAX: LocalTime = LocalTime { itime: ITime::MAX };

    /// Midnight, `00:00:00`. This is the same as `LocalTime::MIN`.
    pub const MIDNIGHT: LocalTime = LocalTime::MIN;

    /// Creates a new time from its components.
    ///
    /// # Errors
    ///
    /// This returns an error unless all of the following hold:
    ///
    /// * `0 <= hour <= 99`
    /// * `0 <= minute <= 59`
    /// * `0 <= second <= 59`
    /// * `0 <= nanosecond <= 999_999_999`
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::civil::LocalTime;
    ///
    /// let t = LocalTime::new(36, 0, 0, 0)?;
    /// assert_eq!(t.to_string(), "36:00:00");
    /// assert!(LocalTime::new(100, 0, 0, 0).unwrap_err().is_invalid_time());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(
        hour: i8,
        minute: i8,
        second: i8,
        nanosecond: i32,
    ) -> Result<LocalTime, Error> {
        let itime = ITime::try_new(
            i64::from(hour),
            i64::from(minute),
            i64::from(second),
            i64::from(nanosecond),
        )?;
        Ok(LocalTime { itime })
    }

    /// Creates a new time in a `const` context.
    ///
    /// # Panics
    ///
    /// This panics whenever [`LocalTime::new`] would return an error.
    pub const fn constant(
        hour: i8,
        minute: i8,
        second: i8,
        nanosecond: i32,
    ) -> LocalTime {
        LocalTime { itime: ITime::constant(hour, minute, second, nanosecond) }
    }

    /// Creates a time from a number of nanoseconds since midnight.
    ///
    /// # Errors
    ///
    /// This returns an error when the count is negative or reaches
    /// `100:00:00`.
    pub fn from_nanosecond_of_day(nanos: i64) -> Result<LocalTime, Error> {
        Ok(LocalTime { itime: ITime::try_from_nanos(nanos)? })
    }

    /// Returns the number of nanoseconds since midnight.
    #[inline]
    pub fn nanosecond_of_day(self) -> i64 {
        self.itime.nanos
    }

    /// Returns the hour on a 24-hour clock, in `0..=23`.
    #[inline]
    pub fn hour(self) -> i8 {
        self.itime.hour()
    }

    /// Returns the raw hour, in `0..=99`.
    #[inline]
    pub fn business_hour(self) -> i8 {
        self.itime.business_hour()
    }

    /// Returns the minute, in `0..=59`.
    #[inline]
    pub fn minute(self) -> i8 {
        self.itime.minute()
    }

    /// Returns the second, in `0..=59`.
    #[inline]
    pub fn second(self) -> i8 {
        self.itime.second()
    }

    /// Returns the millisecond within the current second.
    #[inline]
    pub fn millisecond(self) -> i16 {
        (i64::from(self.subsec_nanosecond()) / NANOS_PER_MILLI) as i16
    }

    /// Returns the nanosecond within the current second, in
    /// `0..=999_999_999`.
    #[inline]
    pub fn subsec_nanosecond(self) -> i32 {
        self.itime.subsec_nanosecond()
    }

    /// Returns true when this time is at or past `24:00:00`.
    #[inline]
    pub fn is_business_hour(self) -> bool {
        self.business_hour() >= 24
    }

    /// Returns the reading of this time on a 24-hour clock.
    ///
    /// ```
    /// use tempora::civil::time;
    ///
    /// assert_eq!(time(49, 15, 0, 0).normalize(), time(1, 15, 0, 0));
    /// ```
    pub fn normalize(self) -> LocalTime {
        LocalTime { itime: ITime { nanos: self.itime.nanos % NANOS_PER_DAY } }
    }

    /// Adds a duration to this time.
    ///
    /// When the sum is negative, it wraps around into the previous day by
    /// adding whole days. No date is carried.
    ///
    /// # Errors
    ///
    /// This returns an error when the duration's magnitude is bigger than
    /// the largest time of day, or when the sum reaches `100:00:00`.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::{civil::time, Duration};
    ///
    /// let t = time(2, 0, 0, 0);
    /// assert_eq!(t.checked_add(Duration::from_hours(-3))?, time(23, 0, 0, 0));
    /// assert_eq!(t.checked_add(Duration::from_hours(23))?, time(25, 0, 0, 0));
    /// assert!(t.checked_add(Duration::from_hours(98)).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn checked_add(self, duration: Duration) -> Result<LocalTime, Error> {
        let itime = self
            .itime
            .wrapping_add(duration.as_nanos())
            .context(E::FailedAddTime)?;
        Ok(LocalTime { itime })
    }

    /// Returns true if [`LocalTime::checked_add`] would succeed.
    pub fn can_add(self, duration: Duration) -> bool {
        self.itime.wrapping_add(duration.as_nanos()).is_ok()
    }

    /// Formats this time with the given layout.
    ///
    /// # Panics
    ///
    /// This panics if the layout uses a specifier that requires a date or a
    /// UTC offset.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::civil::time;
    ///
    /// assert_eq!(time(15, 4, 0, 0).strftime("%-I:%M%p")?, "3:04PM");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn strftime(&self, layout: &str) -> Result<String, Error> {
        layout::format(layout, *self)
    }

    /// Parses a time from `input` with the given layout.
    pub fn strptime(layout: &str, input: &str) -> Result<LocalTime, Error> {
        layout::parse(layout, input)?.to_time()
    }
}

impl LocalTime {
    pub(crate) fn from_itime(itime: ITime) -> LocalTime {
        LocalTime { itime }
    }
}

/// Creates a new time.
///
/// This is a convenience for [`LocalTime::constant`].
///
/// # Panics
///
/// This panics when any component is out of range.
pub const fn time(hour: i8, minute: i8, second: i8, nanosecond: i32) -> LocalTime {
    LocalTime::constant(hour, minute, second, nanosecond)
}

impl Default for LocalTime {
    fn default() -> LocalTime {
        LocalTime::MIDNIGHT
    }
}

impl core::fmt::Display for LocalTime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::FmtWrite;

        IsoPrinter::new()
            .print_time(*self, FmtWrite(f))
            .map_err(|_| core::fmt::Error)
    }
}

impl core::fmt::Debug for LocalTime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

/// Parses a time in the ISO 8601 extended (`13:45:30.25`) or basic
/// (`134530.25`) form.
impl core::str::FromStr for LocalTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<LocalTime, Error> {
        layout::parse_first(
            &[layout::ISO_TIME, layout::ISO_TIME_BASIC],
            s,
            |fields| fields.to_time(),
        )
    }
}

/// Returns the exact duration between two times of day.
impl core::ops::Sub for LocalTime {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: LocalTime) -> Duration {
        Duration::from_nanos(self.itime.nanos - rhs.itime.nanos)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for LocalTime {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for LocalTime {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<LocalTime, D::Error> {
        deserializer.deserialize_str(crate::fmt::serde::FromStrVisitor::new(
            "a time string like 13:45:30",
        ))
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for LocalTime {
    fn arbitrary(g: &mut quickcheck::Gen) -> LocalTime {
        let nanos = i64::arbitrary(g).rem_euclid(ITime::MAX.nanos + 1);
        LocalTime { itime: ITime { nanos } }
    }
}

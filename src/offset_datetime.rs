use alloc::string::String;

use crate::{
    civil::{LocalDate, LocalDateTime, LocalTime},
    clock::Clock,
    error::{civil::Error as E, Error, ErrorContext},
    fmt::layout::{self, IsoPrinter},
    tz::{Offset, OffsetProvider},
    util::itime::{NANOS_PER_DAY, UNIX_EPOCH_JDN},
    Extent,
};

/// A civil datetime paired with a fixed UTC offset.
///
/// An offset datetime identifies a single instant. Equality, ordering and
/// hashing all use that instant, not the wall clock reading, so two values
/// that print differently can compare equal:
///
/// ```
/// use tempora::{civil::datetime, tz::Offset, OffsetDateTime};
///
/// let paris = datetime(2024, 7, 14, 14, 0, 0, 0).to_offset(Offset::constant(2, 0));
/// let utc = datetime(2024, 7, 14, 12, 0, 0, 0).to_offset(Offset::UTC);
/// assert_eq!(paris, utc);
/// assert_ne!(paris.to_string(), utc.to_string());
/// ```
#[derive(Clone, Copy)]
pub struct OffsetDateTime {
    dt: LocalDateTime,
    offset: Offset,
}

impl OffsetDateTime {
    /// Pairs a civil datetime with an offset.
    pub fn new(dt: LocalDateTime, offset: Offset) -> OffsetDateTime {
        OffsetDateTime { dt, offset }
    }

    /// Creates a new offset datetime in a `const` context. The offset minutes
    /// take the sign of the offset hours.
    ///
    /// # Panics
    ///
    /// This panics when any component is out of range.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::OffsetDateTime;
    ///
    /// let odt = OffsetDateTime::constant(2007, 5, 20, 12, 30, 15, 0, 2, 30);
    /// assert_eq!(odt.to_string(), "2007-05-20T12:30:15+02:30");
    /// ```
    #[allow(clippy::too_many_arguments)]
    pub const fn constant(
        year: i32,
        month: i8,
        day: i8,
        hour: i8,
        minute: i8,
        second: i8,
        nanosecond: i32,
        offset_hours: i8,
        offset_minutes: i8,
    ) -> OffsetDateTime {
        let dt = LocalDateTime::constant(
            year, month, day, hour, minute, second, nanosecond,
        );
        let offset = Offset::constant(offset_hours, offset_minutes);
        OffsetDateTime { dt, offset }
    }

    /// Returns the current instant from `clock`, in UTC.
    ///
    /// # Errors
    ///
    /// This returns an error when the clock fails or reports an instant
    /// outside the supported range.
    pub fn now_with<C: Clock>(clock: &C) -> Result<OffsetDateTime, Error> {
        OffsetDateTime::from_unix(clock.now()?, Offset::UTC)
    }

    /// Returns the instant `extent` after the Unix epoch, as seen with the
    /// given offset.
    pub fn from_unix(
        extent: Extent,
        offset: Offset,
    ) -> Result<OffsetDateTime, Error> {
        let instant = unix_epoch_value() + extent.as_nanos();
        let dt = LocalDateTime::from_value(instant + offset.nanos())?;
        Ok(OffsetDateTime { dt, offset })
    }

    /// Returns the extent elapsed since the Unix epoch.
    pub fn to_unix(self) -> Extent {
        Extent::from_wide_nanos(self.instant() - unix_epoch_value())
    }

    /// Returns the wall clock reading.
    #[inline]
    pub fn datetime(self) -> LocalDateTime {
        self.dt
    }

    /// Returns the offset.
    #[inline]
    pub fn offset(self) -> Offset {
        self.offset
    }

    /// Returns the date of the wall clock reading.
    #[inline]
    pub fn date(self) -> LocalDate {
        self.dt.date()
    }

    /// Returns the time of day of the wall clock reading.
    #[inline]
    pub fn time(self) -> LocalTime {
        self.dt.time()
    }

    /// Returns the same instant as seen with a different offset.
    ///
    /// # Errors
    ///
    /// This returns an error when the new wall clock reading is outside the
    /// supported range of datetimes.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::{civil::datetime, tz::Offset, OffsetDateTime};
    ///
    /// let odt = OffsetDateTime::constant(2007, 5, 20, 12, 30, 15, 0, 2, 30);
    /// let utc = odt.to_offset(Offset::UTC)?;
    /// assert_eq!(utc.datetime(), datetime(2007, 5, 20, 10, 0, 15, 0));
    /// assert!((utc - odt).is_zero());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn to_offset(self, offset: Offset) -> Result<OffsetDateTime, Error> {
        let dt = LocalDateTime::from_value(self.instant() + offset.nanos())
            .context(E::FailedToOffset)?;
        Ok(OffsetDateTime { dt, offset })
    }

    /// Returns true if [`OffsetDateTime::to_offset`] would succeed.
    pub fn can_to_offset(self, offset: Offset) -> bool {
        LocalDateTime::from_value(self.instant() + offset.nanos()).is_ok()
    }

    /// Returns the same instant in UTC.
    pub fn to_utc(self) -> Result<OffsetDateTime, Error> {
        self.to_offset(Offset::UTC)
    }

    /// Returns the same instant with the offset `provider` reports for it.
    pub fn to_offset_with<P: OffsetProvider>(
        self,
        provider: &P,
    ) -> Result<OffsetDateTime, Error> {
        let utc = self.to_utc()?;
        let offset = provider.offset_for_utc(utc.dt)?;
        utc.to_offset(offset)
    }

    /// Returns the exact extent elapsed from `other` until `self`, taking
    /// both offsets into account.
    pub fn since(self, other: OffsetDateTime) -> Extent {
        Extent::from_wide_nanos(self.instant() - other.instant())
    }

    /// Adds an exact extent to the wall clock reading, keeping the offset.
    pub fn checked_add(self, extent: Extent) -> Result<OffsetDateTime, Error> {
        let dt = self.dt.checked_add(extent)?;
        Ok(OffsetDateTime { dt, ..self })
    }

    /// Returns true if [`OffsetDateTime::checked_add`] would succeed.
    pub fn can_add(self, extent: Extent) -> bool {
        self.dt.can_add(extent)
    }

    /// Adds years, months and days to the wall clock reading, keeping the
    /// time of day and the offset.
    pub fn checked_add_calendar(
        self,
        years: i64,
        months: i64,
        days: i64,
    ) -> Result<OffsetDateTime, Error> {
        let dt = self.dt.checked_add_calendar(years, months, days)?;
        Ok(OffsetDateTime { dt, ..self })
    }

    /// Returns true if [`OffsetDateTime::checked_add_calendar`] would
    /// succeed.
    pub fn can_add_calendar(self, years: i64, months: i64, days: i64) -> bool {
        self.dt.can_add_calendar(years, months, days)
    }

    /// Formats this value with the given layout.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::{fmt::layout::RFC1123, OffsetDateTime};
    ///
    /// let odt = OffsetDateTime::constant(2024, 7, 14, 16, 24, 0, 0, -4, 0);
    /// assert_eq!(odt.strftime(RFC1123)?, "Sun, 14 Jul 2024 16:24:00 -0400");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn strftime(&self, layout: &str) -> Result<String, Error> {
        layout::format(layout, *self)
    }

    /// Parses an offset datetime from `input` with the given layout. The
    /// layout must contain an offset specifier.
    pub fn strptime(layout: &str, input: &str) -> Result<OffsetDateTime, Error> {
        layout::parse(layout, input)?.to_offset_datetime()
    }

    /// Returns the instant, as the wall clock nanoseconds minus the offset.
    fn instant(self) -> i128 {
        self.dt.value() - self.offset.nanos()
    }
}

fn unix_epoch_value() -> i128 {
    i128::from(UNIX_EPOCH_JDN) * i128::from(NANOS_PER_DAY)
}

impl PartialEq for OffsetDateTime {
    fn eq(&self, other: &OffsetDateTime) -> bool {
        self.instant() == other.instant()
    }
}

impl Eq for OffsetDateTime {}

impl PartialOrd for OffsetDateTime {
    fn partial_cmp(&self, other: &OffsetDateTime) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OffsetDateTime {
    fn cmp(&self, other: &OffsetDateTime) -> core::cmp::Ordering {
        self.instant().cmp(&other.instant())
    }
}

impl core::hash::Hash for OffsetDateTime {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.instant().hash(state);
    }
}

impl core::fmt::Display for OffsetDateTime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::FmtWrite;

        IsoPrinter::new()
            .print_offset_datetime(*self, FmtWrite(f))
            .map_err(|_| core::fmt::Error)
    }
}

impl core::fmt::Debug for OffsetDateTime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

/// Parses an offset datetime in the ISO 8601 extended
/// (`2024-07-14T16:24:00-04:00`) or basic (`20240714T162400-0400`) form.
impl core::str::FromStr for OffsetDateTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<OffsetDateTime, Error> {
        layout::parse_first(
            &[layout::ISO_OFFSET_DATETIME, layout::ISO_OFFSET_DATETIME_BASIC],
            s,
            |fields| fields.to_offset_datetime(),
        )
    }
}

impl core::ops::Sub for OffsetDateTime {
    type Output = Extent;

    #[inline]
    fn sub(self, rhs: OffsetDateTime) -> Extent {
        self.since(rhs)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for OffsetDateTime {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for OffsetDateTime {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<OffsetDateTime, D::Error> {
        deserializer.deserialize_str(crate::fmt::serde::FromStrVisitor::new(
            "an offset datetime string like 2024-07-14T16:24:00-04:00",
        ))
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use crate::civil::datetime;

    use super::*;

    #[test]
    fn to_utc_keeps_instant() {
        let odt = OffsetDateTime::constant(2007, 5, 20, 12, 30, 15, 0, 2, 30);
        let utc = odt.to_utc().unwrap();
        assert_eq!(utc.datetime(), datetime(2007, 5, 20, 10, 0, 15, 0));
        assert_eq!(utc.to_string(), "2007-05-20T10:00:15Z");
        assert!(utc.since(odt).is_zero());
        assert_eq!(utc, odt);

        let west = odt.to_offset(Offset::constant(-7, 0)).unwrap();
        assert_eq!(west.to_string(), "2007-05-20T03:00:15-07:00");
    }

    #[test]
    fn to_offset_out_of_range() {
        let odt = LocalDateTime::MAX.to_offset(Offset::UTC);
        insta::assert_snapshot!(
            odt.to_offset(Offset::constant(1, 0)).unwrap_err(),
            @"failed to convert datetime to the requested offset: datetime is outside the supported range of -4713-11-24T00:00:00..=5874898-06-03T23:59:59.999999999",
        );
        assert!(!odt.can_to_offset(Offset::constant(1, 0)));
        assert!(odt.can_to_offset(Offset::constant(-1, 0)));
    }

    #[test]
    fn ordering_uses_instant() {
        let a = datetime(2024, 1, 1, 9, 0, 0, 0).to_offset(Offset::constant(1, 0));
        let b = datetime(2024, 1, 1, 8, 30, 0, 0).to_offset(Offset::UTC);
        assert!(a < b);
        assert_eq!(b - a, Extent::from_minutes(30));
    }

    #[test]
    fn unix() {
        let odt = OffsetDateTime::from_unix(Extent::ZERO, Offset::constant(-5, 0))
            .unwrap();
        assert_eq!(odt.to_string(), "1969-12-31T19:00:00-05:00");
        assert_eq!(odt.to_unix(), Extent::ZERO);
        let odt = OffsetDateTime::now_with(&crate::FixedClock::new(
            Extent::new(1_000_000_000, 5).unwrap(),
        ))
        .unwrap();
        assert_eq!(odt.to_string(), "2001-09-09T01:46:40.000000005Z");
    }

    #[test]
    fn display_and_parse() {
        let odt = OffsetDateTime::constant(2024, 7, 14, 16, 24, 0, 0, -4, 0);
        assert_eq!(odt.to_string(), "2024-07-14T16:24:00-04:00");
        let got: OffsetDateTime = "2024-07-14T16:24:00-04:00".parse().unwrap();
        assert_eq!(got.offset(), Offset::constant(-4, 0));
        assert_eq!(got.datetime(), odt.datetime());
        let got: OffsetDateTime = "20240714T162400-0400".parse().unwrap();
        assert_eq!(got.offset(), Offset::constant(-4, 0));
        let got: OffsetDateTime = "2024-07-14T20:24:00Z".parse().unwrap();
        assert_eq!(got, odt);
        assert!(got.offset().is_utc());
    }
}

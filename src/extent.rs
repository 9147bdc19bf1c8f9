use crate::{
    error::{duration::Error as E, fmt::iso8601::Error as IE, Error},
    fmt::iso8601::{self, DurationPrinter},
    util::itime::{
        NANOS_PER_HOUR, NANOS_PER_MICRO, NANOS_PER_MILLI, NANOS_PER_MINUTE,
        NANOS_PER_SECOND,
    },
    Duration,
};

/// A wide, exact, signed span of time.
///
/// An extent is a number of seconds (`i64`) plus a number of nanoseconds
/// (`i32`). Both always have the same sign, so the range is roughly
/// ±292 billion years. This is the type produced by subtracting two
/// datetimes, and the type used to shift a datetime by an exact amount.
///
/// For a cheaper type bounded to ±292 years, see [`Duration`].
///
/// # Display and parsing
///
/// An extent prints as an ISO 8601 duration with only time units. Parsing
/// accepts any ISO 8601 duration whose calendar part is zero:
///
/// ```
/// use tempora::Extent;
///
/// let extent = Extent::from_secs(5_405);
/// assert_eq!(extent.to_string(), "PT1H30M5S");
/// assert_eq!("PT1H30M5S".parse::<Extent>()?, extent);
/// assert!("P1DT1H".parse::<Extent>().is_err());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Extent {
    secs: i64,
    nanos: i32,
}

const NANOS_PER_SEC: i32 = NANOS_PER_SECOND as i32;

impl Extent {
    /// The zero extent.
    pub const ZERO: Extent = Extent { secs: 0, nanos: 0 };

    /// The smallest extent.
    pub const MIN: Extent = Extent { secs: i64::MIN, nanos: -(NANOS_PER_SEC - 1) };

    /// The largest extent.
    pub const MAX: Extent = Extent { secs: i64::MAX, nanos: NANOS_PER_SEC - 1 };

    /// Creates an extent from seconds and nanoseconds.
    ///
    /// Nanoseconds beyond one second carry into the seconds, and the two
    /// components may have different signs.
    ///
    /// # Errors
    ///
    /// This returns an error when the carry overflows the seconds.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::Extent;
    ///
    /// let extent = Extent::new(1, -1)?;
    /// assert_eq!(extent.as_secs(), 0);
    /// assert_eq!(extent.subsec_nanos(), 999_999_999);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(secs: i64, nanos: i32) -> Result<Extent, Error> {
        let carry = i64::from(nanos / NANOS_PER_SEC);
        let mut nanos = nanos % NANOS_PER_SEC;
        let mut secs = secs.checked_add(carry).ok_or(E::OverflowNanoseconds)?;
        if secs > 0 && nanos < 0 {
            secs -= 1;
            nanos += NANOS_PER_SEC;
        } else if secs < 0 && nanos > 0 {
            secs += 1;
            nanos -= NANOS_PER_SEC;
        }
        Ok(Extent { secs, nanos })
    }

    /// Creates an extent from whole seconds.
    #[inline]
    pub const fn from_secs(secs: i64) -> Extent {
        Extent { secs, nanos: 0 }
    }

    /// Creates an extent from nanoseconds.
    #[inline]
    pub const fn from_nanos(nanos: i64) -> Extent {
        Extent {
            secs: nanos / NANOS_PER_SECOND,
            nanos: (nanos % NANOS_PER_SECOND) as i32,
        }
    }

    /// Creates an extent from a wide number of nanoseconds.
    ///
    /// # Errors
    ///
    /// This returns an error when the value is out of range.
    pub fn try_from_nanos(nanos: i128) -> Result<Extent, Error> {
        let secs = nanos / i128::from(NANOS_PER_SECOND);
        let secs = i64::try_from(secs).map_err(|_| E::OverflowNanoseconds)?;
        let nanos = (nanos % i128::from(NANOS_PER_SECOND)) as i32;
        Ok(Extent { secs, nanos })
    }

    /// Creates an extent from hours.
    ///
    /// # Errors
    ///
    /// This returns an error when the result is out of range.
    pub fn try_from_hours(hours: i64) -> Result<Extent, Error> {
        let secs = hours
            .checked_mul(3_600)
            .ok_or(E::OverflowFrom { unit: "hours" })?;
        Ok(Extent::from_secs(secs))
    }

    /// Creates an extent from hours.
    ///
    /// # Panics
    ///
    /// This panics when the result is out of range.
    pub fn from_hours(hours: i64) -> Extent {
        match Extent::try_from_hours(hours) {
            Ok(extent) => extent,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates an extent from minutes.
    ///
    /// # Errors
    ///
    /// This returns an error when the result is out of range.
    pub fn try_from_minutes(minutes: i64) -> Result<Extent, Error> {
        let secs = minutes
            .checked_mul(60)
            .ok_or(E::OverflowFrom { unit: "minutes" })?;
        Ok(Extent::from_secs(secs))
    }

    /// Creates an extent from minutes.
    ///
    /// # Panics
    ///
    /// This panics when the result is out of range.
    pub fn from_minutes(minutes: i64) -> Extent {
        match Extent::try_from_minutes(minutes) {
            Ok(extent) => extent,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates an extent from milliseconds.
    #[inline]
    pub const fn from_millis(millis: i64) -> Extent {
        Extent {
            secs: millis / 1_000,
            nanos: ((millis % 1_000) * NANOS_PER_MILLI) as i32,
        }
    }

    /// Creates an extent from microseconds.
    #[inline]
    pub const fn from_micros(micros: i64) -> Extent {
        Extent {
            secs: micros / 1_000_000,
            nanos: ((micros % 1_000_000) * NANOS_PER_MICRO) as i32,
        }
    }

    /// Returns the whole seconds, truncated toward zero.
    #[inline]
    pub fn as_secs(self) -> i64 {
        self.secs
    }

    /// Returns the fractional second as nanoseconds. This has the same sign
    /// as the extent.
    #[inline]
    pub fn subsec_nanos(self) -> i32 {
        self.nanos
    }

    /// Returns the total number of nanoseconds.
    #[inline]
    pub fn as_nanos(self) -> i128 {
        i128::from(self.secs) * i128::from(NANOS_PER_SECOND)
            + i128::from(self.nanos)
    }

    /// Returns this extent in fractional hours.
    ///
    /// ```
    /// use tempora::Extent;
    ///
    /// assert_eq!(Extent::from_minutes(90).hours(), 1.5);
    /// ```
    pub fn hours(self) -> f64 {
        self.in_unit(NANOS_PER_HOUR)
    }

    /// Returns this extent in fractional minutes.
    pub fn minutes(self) -> f64 {
        self.in_unit(NANOS_PER_MINUTE)
    }

    /// Returns this extent in fractional seconds.
    pub fn seconds(self) -> f64 {
        self.in_unit(NANOS_PER_SECOND)
    }

    /// Returns this extent in fractional milliseconds.
    pub fn milliseconds(self) -> f64 {
        self.in_unit(NANOS_PER_MILLI)
    }

    /// Returns this extent in fractional microseconds.
    pub fn microseconds(self) -> f64 {
        self.in_unit(NANOS_PER_MICRO)
    }

    /// Rounds this extent toward zero to a multiple of `unit`. The sign of
    /// `unit` is ignored, and a zero unit returns this extent unchanged.
    ///
    /// ```
    /// use tempora::Extent;
    ///
    /// let extent = Extent::from_secs(5_405);
    /// assert_eq!(extent.truncate(Extent::from_hours(1)), Extent::from_hours(1));
    /// assert_eq!((-extent).truncate(Extent::from_hours(1)), Extent::from_hours(-1));
    /// ```
    pub fn truncate(self, unit: Extent) -> Extent {
        let unit = unit.as_nanos().abs();
        if unit == 0 {
            return self;
        }
        let nanos = self.as_nanos();
        Extent::from_wide_nanos(nanos - nanos % unit)
    }

    /// Adds two extents.
    ///
    /// # Errors
    ///
    /// This returns an error on overflow.
    pub fn checked_add(self, other: Extent) -> Result<Extent, Error> {
        Extent::try_from_nanos(self.as_nanos() + other.as_nanos())
            .map_err(|_| Error::from(E::OverflowAdd))
    }

    /// Returns true if [`Extent::checked_add`] would succeed.
    pub fn can_add(self, other: Extent) -> bool {
        Extent::try_from_nanos(self.as_nanos() + other.as_nanos()).is_ok()
    }

    /// Subtracts `other` from this extent.
    ///
    /// # Errors
    ///
    /// This returns an error on overflow.
    pub fn checked_sub(self, other: Extent) -> Result<Extent, Error> {
        Extent::try_from_nanos(self.as_nanos() - other.as_nanos())
            .map_err(|_| Error::from(E::OverflowSub))
    }

    /// Returns true if [`Extent::checked_sub`] would succeed.
    pub fn can_sub(self, other: Extent) -> bool {
        Extent::try_from_nanos(self.as_nanos() - other.as_nanos()).is_ok()
    }

    /// Negates this extent.
    ///
    /// # Errors
    ///
    /// This returns an error for `Extent::MIN`.
    pub fn checked_neg(self) -> Result<Extent, Error> {
        let secs = self.secs.checked_neg().ok_or(E::OverflowNegate)?;
        Ok(Extent { secs, nanos: -self.nanos })
    }

    /// Returns true if [`Extent::checked_neg`] would succeed.
    pub fn can_neg(self) -> bool {
        self.secs != i64::MIN
    }

    /// Returns the absolute value of this extent.
    ///
    /// # Panics
    ///
    /// This panics for `Extent::MIN`.
    pub fn abs(self) -> Extent {
        if self.is_negative() {
            -self
        } else {
            self
        }
    }

    /// Returns `-1`, `0` or `1` according to the sign of this extent.
    pub fn signum(self) -> i8 {
        if self.secs != 0 {
            self.secs.signum() as i8
        } else {
            self.nanos.signum() as i8
        }
    }

    /// Returns true when this extent is zero.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.secs == 0 && self.nanos == 0
    }

    /// Returns true when this extent is negative.
    #[inline]
    pub fn is_negative(self) -> bool {
        self.secs < 0 || self.nanos < 0
    }
}

impl Extent {
    /// Creates an extent from nanoseconds that the caller knows are in
    /// range.
    pub(crate) fn from_wide_nanos(nanos: i128) -> Extent {
        debug_assert!(Extent::try_from_nanos(nanos).is_ok());
        Extent {
            secs: (nanos / i128::from(NANOS_PER_SECOND)) as i64,
            nanos: (nanos % i128::from(NANOS_PER_SECOND)) as i32,
        }
    }

    /// Whole units are divided exactly. Only the remainder goes through
    /// floating point.
    fn in_unit(self, unit: i64) -> f64 {
        let nanos = self.as_nanos();
        let unit = i128::from(unit);
        (nanos / unit) as f64 + ((nanos % unit) as f64 / unit as f64)
    }
}

impl From<Duration> for Extent {
    #[inline]
    fn from(duration: Duration) -> Extent {
        Extent::from_nanos(duration.as_nanos())
    }
}

impl TryFrom<core::time::Duration> for Extent {
    type Error = Error;

    fn try_from(duration: core::time::Duration) -> Result<Extent, Error> {
        let secs =
            i64::try_from(duration.as_secs()).map_err(|_| E::ConvertUnsigned)?;
        // Always less than one second.
        let nanos = duration.subsec_nanos() as i32;
        Ok(Extent { secs, nanos })
    }
}

impl TryFrom<Extent> for core::time::Duration {
    type Error = Error;

    fn try_from(extent: Extent) -> Result<core::time::Duration, Error> {
        if extent.is_negative() {
            return Err(Error::from(E::ConvertNegative));
        }
        Ok(core::time::Duration::new(
            extent.secs.unsigned_abs(),
            extent.nanos.unsigned_abs(),
        ))
    }
}

impl core::ops::Add for Extent {
    type Output = Extent;

    fn add(self, rhs: Extent) -> Extent {
        match self.checked_add(rhs) {
            Ok(extent) => extent,
            Err(err) => panic!("{err}"),
        }
    }
}

impl core::ops::Sub for Extent {
    type Output = Extent;

    fn sub(self, rhs: Extent) -> Extent {
        match self.checked_sub(rhs) {
            Ok(extent) => extent,
            Err(err) => panic!("{err}"),
        }
    }
}

impl core::ops::Neg for Extent {
    type Output = Extent;

    fn neg(self) -> Extent {
        match self.checked_neg() {
            Ok(extent) => extent,
            Err(err) => panic!("{err}"),
        }
    }
}

impl core::fmt::Display for Extent {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::FmtWrite;

        DurationPrinter::new()
            .print_extent(*self, FmtWrite(f))
            .map_err(|_| core::fmt::Error)
    }
}

impl core::fmt::Debug for Extent {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

impl core::str::FromStr for Extent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Extent, Error> {
        let (period, extent) = iso8601::parse_duration(s)?;
        if !period.is_zero() {
            return Err(Error::from(IE::CalendarUnitsInDuration));
        }
        Ok(extent)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Extent {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Extent {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Extent, D::Error> {
        deserializer.deserialize_str(crate::fmt::serde::FromStrVisitor::new(
            "an ISO 8601 duration string like PT1H30M",
        ))
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Extent {
    fn arbitrary(g: &mut quickcheck::Gen) -> Extent {
        let secs = i64::arbitrary(g) >> 2;
        let nanos = i32::arbitrary(g).rem_euclid(NANOS_PER_SEC);
        let nanos = if secs < 0 { -nanos } else { nanos };
        Extent { secs, nanos }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn normalization() {
        let extent = Extent::new(-1, 1).unwrap();
        assert_eq!((extent.as_secs(), extent.subsec_nanos()), (0, -999_999_999));
        let extent = Extent::new(0, 2_500_000_000u32 as i32).unwrap();
        assert!(extent.is_negative());
        let extent = Extent::new(3, 2_000_000_001).unwrap();
        assert_eq!((extent.as_secs(), extent.subsec_nanos()), (5, 1));
        insta::assert_snapshot!(
            Extent::new(i64::MAX, 1_000_000_000).unwrap_err(),
            @"number of nanoseconds overflows extent's seconds",
        );
        assert_eq!(Extent::from_nanos(-1_500_000_000), Extent::new(-1, -500_000_000).unwrap());
        assert_eq!(Extent::from_millis(-1_500), Extent::from_nanos(-1_500_000_000));
    }

    #[test]
    fn float_accessors() {
        let extent = Extent::from_millis(5_400_500);
        assert_eq!(extent.hours(), 1.500138888888889);
        assert_eq!(extent.seconds(), 5_400.5);
        assert_eq!(Extent::MAX.hours(), 2562047788015215.5);
        assert_eq!((-extent).minutes(), -90.00833333333334);
    }

    #[test]
    fn overflow() {
        insta::assert_snapshot!(
            Extent::MAX.checked_add(Extent::from_nanos(1)).unwrap_err(),
            @"duration addition overflowed",
        );
        insta::assert_snapshot!(
            Extent::MIN.checked_sub(Extent::from_nanos(1)).unwrap_err(),
            @"duration subtraction overflowed",
        );
        insta::assert_snapshot!(
            Extent::MIN.checked_neg().unwrap_err(),
            @"duration negation overflowed",
        );
        insta::assert_snapshot!(
            Extent::try_from_hours(i64::MAX).unwrap_err(),
            @"number of hours overflows duration",
        );
        assert!(Extent::try_from_hours(i64::MAX).unwrap_err().is_duration_overflow());
        assert!(!Extent::MAX.can_add(Extent::from_nanos(1)));
        assert!(!Extent::MIN.can_neg());
        assert_eq!(-Extent::MAX, Extent::new(-i64::MAX, -999_999_999).unwrap());
    }

    #[test]
    fn conversions() {
        let std = core::time::Duration::new(5, 7);
        assert_eq!(Extent::try_from(std).unwrap(), Extent::new(5, 7).unwrap());
        assert!(core::time::Duration::try_from(Extent::from_secs(-1)).is_err());
        let big = core::time::Duration::new(u64::MAX, 0);
        insta::assert_snapshot!(
            Extent::try_from(big).unwrap_err(),
            @"unsigned duration is too big to fit in a duration",
        );
        assert_eq!(Extent::from(Duration::from_secs(-3)), Extent::from_secs(-3));
    }

    #[test]
    fn display() {
        assert_eq!(Extent::ZERO.to_string(), "PT0S");
        assert_eq!(Extent::from_secs(3_605).to_string(), "PT1H0M5S");
        assert_eq!(Extent::from_millis(-1_500).to_string(), "-PT1.5S");
        assert_eq!(Extent::from_hours(48).to_string(), "PT48H");
    }

    quickcheck::quickcheck! {
        fn prop_nanos_roundtrip(extent: Extent) -> bool {
            Extent::try_from_nanos(extent.as_nanos()).unwrap() == extent
        }

        fn prop_truncate_toward_zero(extent: Extent) -> bool {
            let unit = Extent::from_minutes(1);
            let got = extent.truncate(unit);
            got.abs() <= extent.abs() && got.as_nanos() % unit.as_nanos() == 0
        }

        fn prop_display_parse_roundtrip(extent: Extent) -> bool {
            extent.to_string().parse::<Extent>().unwrap() == extent
        }

        fn prop_add_probe_agrees(a: Extent, b: Extent) -> bool {
            a.can_add(b) == a.checked_add(b).is_ok()
        }
    }
}

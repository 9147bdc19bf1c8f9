use alloc::string::String;

use crate::{
    error::{duration::Error as E, Error},
    fmt::iso8601::{Designators, DurationPrinter},
    util::itime::{
        NANOS_PER_HOUR, NANOS_PER_MICRO, NANOS_PER_MILLI, NANOS_PER_MINUTE,
        NANOS_PER_SECOND,
    },
    Extent,
};

/// A fixed width, exact, signed span of time.
///
/// A duration is a single `i64` count of nanoseconds, so its range is about
/// ±292 years. It is the type added to a [`LocalTime`](crate::civil::LocalTime).
/// Use [`Extent`] for spans that may be larger.
///
/// Constructors come in two flavors. The `try_from_*` routines return an
/// error on overflow, while the `from_*` routines panic and are meant for
/// arguments known to be in range.
///
/// # Example
///
/// ```
/// use tempora::Duration;
///
/// let d = Duration::from_hours(1) + Duration::from_minutes(30) + Duration::from_secs(5);
/// assert_eq!(d.to_string(), "PT1H30M5S");
/// assert_eq!(d.minutes(), 90.08333333333333);
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Duration {
    nanos: i64,
}

impl Duration {
    /// The zero duration.
    pub const ZERO: Duration = Duration { nanos: 0 };

    /// The smallest duration.
    pub const MIN: Duration = Duration { nanos: i64::MIN };

    /// The largest duration.
    pub const MAX: Duration = Duration { nanos: i64::MAX };

    /// Creates a duration from nanoseconds.
    #[inline]
    pub const fn from_nanos(nanos: i64) -> Duration {
        Duration { nanos }
    }

    /// Creates a duration from hours, failing on overflow.
    pub fn try_from_hours(hours: i64) -> Result<Duration, Error> {
        Duration::try_from_unit(hours, NANOS_PER_HOUR, "hours")
    }

    /// Creates a duration from minutes, failing on overflow.
    pub fn try_from_minutes(minutes: i64) -> Result<Duration, Error> {
        Duration::try_from_unit(minutes, NANOS_PER_MINUTE, "minutes")
    }

    /// Creates a duration from seconds, failing on overflow.
    pub fn try_from_secs(secs: i64) -> Result<Duration, Error> {
        Duration::try_from_unit(secs, NANOS_PER_SECOND, "seconds")
    }

    /// Creates a duration from milliseconds, failing on overflow.
    pub fn try_from_millis(millis: i64) -> Result<Duration, Error> {
        Duration::try_from_unit(millis, NANOS_PER_MILLI, "milliseconds")
    }

    /// Creates a duration from microseconds, failing on overflow.
    pub fn try_from_micros(micros: i64) -> Result<Duration, Error> {
        Duration::try_from_unit(micros, NANOS_PER_MICRO, "microseconds")
    }

    /// Creates a duration from hours.
    ///
    /// # Panics
    ///
    /// This panics on overflow.
    pub fn from_hours(hours: i64) -> Duration {
        must(Duration::try_from_hours(hours))
    }

    /// Creates a duration from minutes.
    ///
    /// # Panics
    ///
    /// This panics on overflow.
    pub fn from_minutes(minutes: i64) -> Duration {
        must(Duration::try_from_minutes(minutes))
    }

    /// Creates a duration from seconds.
    ///
    /// # Panics
    ///
    /// This panics on overflow.
    pub fn from_secs(secs: i64) -> Duration {
        must(Duration::try_from_secs(secs))
    }

    /// Creates a duration from milliseconds.
    ///
    /// # Panics
    ///
    /// This panics on overflow.
    pub fn from_millis(millis: i64) -> Duration {
        must(Duration::try_from_millis(millis))
    }

    /// Creates a duration from microseconds.
    ///
    /// # Panics
    ///
    /// This panics on overflow.
    pub fn from_micros(micros: i64) -> Duration {
        must(Duration::try_from_micros(micros))
    }

    /// Returns the total number of nanoseconds.
    #[inline]
    pub fn as_nanos(self) -> i64 {
        self.nanos
    }

    /// Returns the whole seconds, truncated toward zero.
    #[inline]
    pub fn as_secs(self) -> i64 {
        self.nanos / NANOS_PER_SECOND
    }

    /// Returns the fractional second as nanoseconds, with the same sign as
    /// the duration.
    #[inline]
    pub fn subsec_nanos(self) -> i32 {
        (self.nanos % NANOS_PER_SECOND) as i32
    }

    /// Returns this duration in fractional hours.
    pub fn hours(self) -> f64 {
        self.in_unit(NANOS_PER_HOUR)
    }

    /// Returns this duration in fractional minutes.
    pub fn minutes(self) -> f64 {
        self.in_unit(NANOS_PER_MINUTE)
    }

    /// Returns this duration in fractional seconds.
    pub fn seconds(self) -> f64 {
        self.in_unit(NANOS_PER_SECOND)
    }

    /// Returns this duration in fractional milliseconds.
    pub fn milliseconds(self) -> f64 {
        self.in_unit(NANOS_PER_MILLI)
    }

    /// Returns this duration in fractional microseconds.
    pub fn microseconds(self) -> f64 {
        self.in_unit(NANOS_PER_MICRO)
    }

    /// Rounds this duration toward zero to a multiple of `unit`.
    ///
    /// Truncation is symmetric: `-90m` truncated to hours is `-1h`, not
    /// `-2h`. The sign of `unit` is ignored, and a zero unit returns this
    /// duration unchanged.
    ///
    /// ```
    /// use tempora::Duration;
    ///
    /// let d = Duration::from_minutes(-90);
    /// assert_eq!(d.truncate(Duration::from_hours(1)), Duration::from_hours(-1));
    /// ```
    pub fn truncate(self, unit: Duration) -> Duration {
        if unit.nanos == 0 {
            return self;
        }
        // `i64::MIN % -1` overflows, so use the wide remainder.
        let rem = i128::from(self.nanos) % i128::from(unit.nanos).abs();
        Duration { nanos: self.nanos - rem as i64 }
    }

    /// Returns the absolute value of this duration.
    ///
    /// # Panics
    ///
    /// This panics for `Duration::MIN`.
    pub fn abs(self) -> Duration {
        if self.is_negative() {
            -self
        } else {
            self
        }
    }

    /// Returns `-1`, `0` or `1` according to the sign of this duration.
    pub fn signum(self) -> i8 {
        self.nanos.signum() as i8
    }

    /// Returns true when this duration is zero.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.nanos == 0
    }

    /// Returns true when this duration is negative.
    #[inline]
    pub fn is_negative(self) -> bool {
        self.nanos < 0
    }

    /// Adds two durations, failing on overflow.
    pub fn checked_add(self, other: Duration) -> Result<Duration, Error> {
        let nanos = self.nanos.checked_add(other.nanos).ok_or(E::OverflowAdd)?;
        Ok(Duration { nanos })
    }

    /// Returns true if [`Duration::checked_add`] would succeed.
    pub fn can_add(self, other: Duration) -> bool {
        self.nanos.checked_add(other.nanos).is_some()
    }

    /// Subtracts `other` from this duration, failing on overflow.
    pub fn checked_sub(self, other: Duration) -> Result<Duration, Error> {
        let nanos = self.nanos.checked_sub(other.nanos).ok_or(E::OverflowSub)?;
        Ok(Duration { nanos })
    }

    /// Returns true if [`Duration::checked_sub`] would succeed.
    pub fn can_sub(self, other: Duration) -> bool {
        self.nanos.checked_sub(other.nanos).is_some()
    }

    /// Negates this duration, failing for `Duration::MIN`.
    pub fn checked_neg(self) -> Result<Duration, Error> {
        let nanos = self.nanos.checked_neg().ok_or(E::OverflowNegate)?;
        Ok(Duration { nanos })
    }

    /// Returns true if [`Duration::checked_neg`] would succeed.
    pub fn can_neg(self) -> bool {
        self.nanos != i64::MIN
    }

    /// Converts this duration into an [`Extent`]. This never fails.
    #[inline]
    pub fn to_extent(self) -> Extent {
        Extent::from(self)
    }

    /// Formats this duration in the exclusive ISO 8601 mode.
    ///
    /// Every designator in `designators` is printed, even when zero. Units
    /// coarser than the coarsest chosen designator are folded into it, and
    /// whatever is left below the finest chosen designator becomes its
    /// fraction. An empty set prints the same as `Display`.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::{fmt::iso8601::Designators, Duration};
    ///
    /// let d = Duration::from_millis(4_530_600);
    /// assert_eq!(d.to_string(), "PT1H15M30.6S");
    ///
    /// let hm = Designators::new().hours(true).minutes(true);
    /// assert_eq!(d.to_iso_with(&hm), "PT1H15.51M");
    /// let m = Designators::new().minutes(true);
    /// assert_eq!(d.to_iso_with(&m), "PT75.51M");
    /// ```
    pub fn to_iso_with(&self, designators: &Designators) -> String {
        let mut buf = String::new();
        // Writing to a `String` never fails.
        let _ = DurationPrinter::new().print_designated(
            self.to_extent(),
            designators,
            &mut buf,
        );
        buf
    }
}

impl Duration {
    fn try_from_unit(
        count: i64,
        unit: i64,
        name: &'static str,
    ) -> Result<Duration, Error> {
        let nanos = count.checked_mul(unit).ok_or(E::OverflowFrom { unit: name })?;
        Ok(Duration { nanos })
    }

    fn in_unit(self, unit: i64) -> f64 {
        (self.nanos / unit) as f64 + ((self.nanos % unit) as f64 / unit as f64)
    }
}

fn must(result: Result<Duration, Error>) -> Duration {
    match result {
        Ok(duration) => duration,
        Err(err) => panic!("{err}"),
    }
}

impl TryFrom<Extent> for Duration {
    type Error = Error;

    fn try_from(extent: Extent) -> Result<Duration, Error> {
        let nanos =
            i64::try_from(extent.as_nanos()).map_err(|_| E::ConvertExtent)?;
        Ok(Duration { nanos })
    }
}

impl TryFrom<core::time::Duration> for Duration {
    type Error = Error;

    fn try_from(duration: core::time::Duration) -> Result<Duration, Error> {
        let nanos =
            i64::try_from(duration.as_nanos()).map_err(|_| E::ConvertUnsigned)?;
        Ok(Duration { nanos })
    }
}

impl TryFrom<Duration> for core::time::Duration {
    type Error = Error;

    fn try_from(duration: Duration) -> Result<core::time::Duration, Error> {
        let nanos =
            u64::try_from(duration.nanos).map_err(|_| E::ConvertNegative)?;
        Ok(core::time::Duration::from_nanos(nanos))
    }
}

impl core::ops::Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Duration) -> Duration {
        must(self.checked_add(rhs))
    }
}

impl core::ops::Sub for Duration {
    type Output = Duration;

    fn sub(self, rhs: Duration) -> Duration {
        must(self.checked_sub(rhs))
    }
}

impl core::ops::Neg for Duration {
    type Output = Duration;

    fn neg(self) -> Duration {
        must(self.checked_neg())
    }
}

impl core::fmt::Display for Duration {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::FmtWrite;

        DurationPrinter::new()
            .print_extent(self.to_extent(), FmtWrite(f))
            .map_err(|_| core::fmt::Error)
    }
}

impl core::fmt::Debug for Duration {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

/// Parses an ISO 8601 duration with a zero calendar part, such as
/// `PT1H30M` or `-PT0.5S`.
impl core::str::FromStr for Duration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Duration, Error> {
        Duration::try_from(s.parse::<Extent>()?)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Duration {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Duration {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Duration, D::Error> {
        deserializer.deserialize_str(crate::fmt::serde::FromStrVisitor::new(
            "an ISO 8601 duration string like PT1H30M",
        ))
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Duration {
    fn arbitrary(g: &mut quickcheck::Gen) -> Duration {
        Duration { nanos: i64::arbitrary(g) }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn constructors() {
        assert_eq!(Duration::from_hours(2).as_secs(), 7_200);
        assert_eq!(Duration::from_millis(-1_500).as_secs(), -1);
        assert_eq!(Duration::from_millis(-1_500).subsec_nanos(), -500_000_000);
        insta::assert_snapshot!(
            Duration::try_from_hours(3_000_000).unwrap_err(),
            @"number of hours overflows duration",
        );
        insta::assert_snapshot!(
            Duration::try_from(Extent::from_secs(i64::MAX)).unwrap_err(),
            @"extent is too big to fit in a fixed width duration",
        );
    }

    #[test]
    #[should_panic(expected = "number of seconds overflows duration")]
    fn must_family_panics() {
        Duration::from_secs(i64::MAX);
    }

    #[test]
    fn float_accessors() {
        let d = Duration::from_millis(4_530_600);
        assert_eq!(d.hours(), 1.2585);
        assert_eq!(d.minutes(), 75.51);
        assert_eq!(d.seconds(), 4_530.6);
        let big = Duration::MAX;
        assert_eq!(big.seconds(), 9223372036.854776);
    }

    #[test]
    fn truncate() {
        let d = Duration::from_millis(-1_999);
        assert_eq!(d.truncate(Duration::from_secs(1)), Duration::from_secs(-1));
        assert_eq!(d.truncate(Duration::from_secs(-1)), Duration::from_secs(-1));
        assert_eq!(d.truncate(Duration::ZERO), d);
        assert_eq!(Duration::MIN.truncate(Duration::from_nanos(-1)), Duration::MIN);
    }

    #[test]
    fn arithmetic() {
        insta::assert_snapshot!(
            Duration::MAX.checked_add(Duration::from_nanos(1)).unwrap_err(),
            @"duration addition overflowed",
        );
        assert!(!Duration::MIN.can_neg());
        assert!(!Duration::MIN.can_sub(Duration::from_nanos(1)));
        assert_eq!(Duration::from_secs(-5).abs(), Duration::from_secs(5));
        assert_eq!(Duration::from_secs(-5).signum(), -1);
    }

    #[test]
    fn display_and_parse() {
        assert_eq!(Duration::ZERO.to_string(), "PT0S");
        assert_eq!(Duration::from_secs(65).to_string(), "PT1M5S");
        assert_eq!(Duration::from_secs(3_605).to_string(), "PT1H0M5S");
        assert_eq!(Duration::from_millis(-500).to_string(), "-PT0.5S");
        assert_eq!("PT1M5S".parse::<Duration>().unwrap(), Duration::from_secs(65));
        assert_eq!("pt1m5,5s".parse::<Duration>().unwrap(), Duration::from_millis(65_500));
        assert!("P1D".parse::<Duration>().unwrap_err().to_string().contains("years, months, weeks or days"));
        assert!("PT9999999H".parse::<Duration>().is_err());
    }

    quickcheck::quickcheck! {
        fn prop_display_parse_roundtrip(d: Duration) -> bool {
            d.to_string().parse::<Duration>().unwrap() == d
        }

        fn prop_truncate_is_symmetric(d: Duration) -> bool {
            if d == Duration::MIN {
                return true;
            }
            let unit = Duration::from_secs(1);
            (-d).truncate(unit) == -(d.truncate(unit))
        }

        fn prop_sub_probe_agrees(a: Duration, b: Duration) -> bool {
            a.can_sub(b) == a.checked_sub(b).is_ok()
        }
    }
}

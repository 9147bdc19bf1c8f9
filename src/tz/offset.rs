use crate::{error::Error, util::itime::NANOS_PER_MINUTE};

/// Represents a fixed offset from UTC, with minute precision.
///
/// Negative offsets correspond to places west of the prime meridian, while
/// positive offsets correspond to places east of it. In all cases,
/// `civil time - offset = UTC`.
///
/// # Display format
///
/// An offset is printed as `{sign}{hours}:{minutes}`, always with both
/// fields and always with a sign:
///
/// ```
/// use tempora::tz::Offset;
///
/// assert_eq!(Offset::constant(-5, 0).to_string(), "-05:00");
/// assert_eq!(Offset::constant(5, 30).to_string(), "+05:30");
/// assert_eq!(Offset::UTC.to_string(), "+00:00");
/// assert_eq!(Offset::MIN.to_string(), "-23:59");
/// ```
///
/// Offset-aware datetimes print a zero offset as `Z` instead.
#[derive(Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Offset {
    minutes: i16,
}

const MAX_MINUTES: i16 = 23 * 60 + 59;

impl Offset {
    /// The smallest offset, `-23:59`.
    pub const MIN: Offset = Offset { minutes: -MAX_MINUTES };

    /// The largest offset, `+23:59`.
    pub const MAX: Offset = Offset { minutes: MAX_MINUTES };

    /// The offset corresponding to UTC. That is, no offset at all.
    pub const UTC: Offset = Offset { minutes: 0 };

    /// Creates an offset from hours and minutes.
    ///
    /// The minutes take the sign of the hours, so `Offset::new(-2, 30)` is
    /// two and a half hours west of UTC. When `hours` is zero, `minutes` may
    /// itself be negative.
    ///
    /// # Errors
    ///
    /// This returns an error unless `-23 <= hours <= 23` and `minutes` is in
    /// `0..=59` (or `-59..=59` when `hours` is zero).
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::tz::Offset;
    ///
    /// assert_eq!(Offset::new(-2, 30)?.minutes(), -150);
    /// assert_eq!(Offset::new(0, -30)?.minutes(), -30);
    /// assert!(Offset::new(24, 0).is_err());
    /// assert!(Offset::new(1, -30).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(hours: i8, minutes: i8) -> Result<Offset, Error> {
        if !(-23..=23).contains(&hours) {
            return Err(Error::range("offset hours", hours, -23, 23));
        }
        let min_minutes = if hours == 0 { -59 } else { 0 };
        if !(min_minutes..=59).contains(&minutes) {
            return Err(Error::range(
                "offset minutes",
                minutes,
                min_minutes,
                59,
            ));
        }
        let (hours, minutes) = (i16::from(hours), i16::from(minutes));
        let minutes =
            if hours < 0 { hours * 60 - minutes } else { hours * 60 + minutes };
        Ok(Offset { minutes })
    }

    /// Creates an offset from a signed number of minutes.
    ///
    /// # Errors
    ///
    /// This returns an error when the magnitude exceeds `23:59`.
    pub fn from_minutes(minutes: i16) -> Result<Offset, Error> {
        if !(-MAX_MINUTES..=MAX_MINUTES).contains(&minutes) {
            return Err(Error::range(
                "offset minutes",
                minutes,
                -MAX_MINUTES,
                MAX_MINUTES,
            ));
        }
        Ok(Offset { minutes })
    }

    /// Creates an offset in a `const` context.
    ///
    /// # Panics
    ///
    /// This panics whenever [`Offset::new`] would return an error.
    pub const fn constant(hours: i8, minutes: i8) -> Offset {
        if hours < -23 || hours > 23 {
            panic!("invalid offset hours, must be in range -23..=23");
        }
        if minutes > 59 || minutes < -59 || (minutes < 0 && hours != 0) {
            panic!("invalid offset minutes");
        }
        let (hours, minutes) = (hours as i16, minutes as i16);
        let minutes =
            if hours < 0 { hours * 60 - minutes } else { hours * 60 + minutes };
        Offset { minutes }
    }

    /// Returns the total number of minutes in this offset.
    #[inline]
    pub fn minutes(self) -> i16 {
        self.minutes
    }

    /// Returns the total number of seconds in this offset.
    #[inline]
    pub fn seconds(self) -> i32 {
        i32::from(self.minutes) * 60
    }

    /// Returns true when this is the zero offset.
    #[inline]
    pub fn is_utc(self) -> bool {
        self.minutes == 0
    }

    /// Returns true when this offset is west of UTC.
    #[inline]
    pub fn is_negative(self) -> bool {
        self.minutes < 0
    }

    /// Returns the offset with the opposite sign.
    #[inline]
    pub fn negate(self) -> Offset {
        Offset { minutes: -self.minutes }
    }

    /// Returns the hours and minutes of this offset, both unsigned.
    pub(crate) fn parts(self) -> (i8, i8) {
        let abs = self.minutes.unsigned_abs();
        ((abs / 60) as i8, (abs % 60) as i8)
    }

    /// Returns this offset as a signed number of nanoseconds.
    #[inline]
    pub(crate) fn nanos(self) -> i128 {
        i128::from(self.minutes) * i128::from(NANOS_PER_MINUTE)
    }
}

impl Default for Offset {
    fn default() -> Offset {
        Offset::UTC
    }
}

impl core::fmt::Debug for Offset {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

impl core::fmt::Display for Offset {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let sign = if self.is_negative() { '-' } else { '+' };
        let (hours, minutes) = self.parts();
        write!(f, "{sign}{hours:02}:{minutes:02}")
    }
}

impl core::ops::Neg for Offset {
    type Output = Offset;

    #[inline]
    fn neg(self) -> Offset {
        self.negate()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn construction() {
        assert_eq!(Offset::constant(2, 30).minutes(), 150);
        assert_eq!(Offset::constant(-2, 30).minutes(), -150);
        assert_eq!(Offset::constant(0, -30).minutes(), -30);
        assert_eq!(Offset::from_minutes(-150).unwrap(), Offset::constant(-2, 30));
        assert_eq!(Offset::constant(-2, 30).seconds(), -9000);
        assert_eq!(Offset::constant(-2, 30).to_string(), "-02:30");
        assert_eq!(Offset::constant(0, -30).to_string(), "-00:30");
        assert_eq!(-Offset::MAX, Offset::MIN);
    }

    #[test]
    fn out_of_range() {
        insta::assert_snapshot!(
            Offset::new(24, 0).unwrap_err(),
            @"parameter 'offset hours' with value 24 is not in the required range of -23..=23",
        );
        insta::assert_snapshot!(
            Offset::new(5, 60).unwrap_err(),
            @"parameter 'offset minutes' with value 60 is not in the required range of 0..=59",
        );
        insta::assert_snapshot!(
            Offset::from_minutes(1440).unwrap_err(),
            @"parameter 'offset minutes' with value 1440 is not in the required range of -1439..=1439",
        );
        assert!(Offset::new(24, 0).unwrap_err().is_range());
    }
}

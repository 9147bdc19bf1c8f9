use crate::{
    error::{fmt::iso8601::Error as IE, Error},
    fmt::iso8601::{self, DurationPrinter},
};

/// A calendar-relative quantity of years, months, weeks and days.
///
/// Unlike [`Duration`](crate::Duration) and [`Extent`](crate::Extent), a
/// period has no fixed length: a month is 28 to 31 days long depending on
/// where it is applied. A period is therefore just four independent numbers,
/// compared component by component. Components may be fractional (ISO 8601
/// allows `P0.5Y`), but only an [integral](Period::is_integral) period can
/// be added to a date.
///
/// # Example
///
/// ```
/// use tempora::Period;
///
/// let p = Period::new().years(3).months(6).days(4);
/// assert_eq!(p.to_string(), "P3Y6M4D");
/// assert_eq!("P3Y6M4D".parse::<Period>()?, p);
/// assert_eq!(Period::ZERO.to_string(), "P0D");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Default, PartialEq)]
pub struct Period {
    years: f64,
    months: f64,
    weeks: f64,
    days: f64,
}

impl Period {
    /// The zero period.
    pub const ZERO: Period =
        Period { years: 0.0, months: 0.0, weeks: 0.0, days: 0.0 };

    /// Returns the zero period, for use as the start of a builder chain.
    pub fn new() -> Period {
        Period::ZERO
    }

    /// Sets the number of years.
    pub fn years(self, years: impl Into<f64>) -> Period {
        Period { years: years.into(), ..self }
    }

    /// Sets the number of months.
    pub fn months(self, months: impl Into<f64>) -> Period {
        Period { months: months.into(), ..self }
    }

    /// Sets the number of weeks.
    pub fn weeks(self, weeks: impl Into<f64>) -> Period {
        Period { weeks: weeks.into(), ..self }
    }

    /// Sets the number of days.
    pub fn days(self, days: impl Into<f64>) -> Period {
        Period { days: days.into(), ..self }
    }

    /// Returns the number of years.
    pub fn get_years(&self) -> f64 {
        self.years
    }

    /// Returns the number of months.
    pub fn get_months(&self) -> f64 {
        self.months
    }

    /// Returns the number of weeks.
    pub fn get_weeks(&self) -> f64 {
        self.weeks
    }

    /// Returns the number of days.
    pub fn get_days(&self) -> f64 {
        self.days
    }

    /// Returns true when every component is zero.
    pub fn is_zero(&self) -> bool {
        self.years == 0.0
            && self.months == 0.0
            && self.weeks == 0.0
            && self.days == 0.0
    }

    /// Returns true when every component is a whole number.
    pub fn is_integral(&self) -> bool {
        [self.years, self.months, self.weeks, self.days]
            .iter()
            .all(|&n| n.is_finite() && n == trunc(n))
    }

    /// Returns this period with every component negated.
    pub fn negate(&self) -> Period {
        Period {
            years: -self.years,
            months: -self.months,
            weeks: -self.weeks,
            days: -self.days,
        }
    }

    /// Returns this period with weeks folded into days, at seven days each.
    ///
    /// ```
    /// use tempora::Period;
    ///
    /// let p = Period::new().months(1).weeks(2).days(1);
    /// assert_eq!(p.normalize_weeks(), Period::new().months(1).days(15));
    /// ```
    pub fn normalize_weeks(&self) -> Period {
        Period { weeks: 0.0, days: self.days + self.weeks * 7.0, ..*self }
    }

    /// Returns true when this period uses weeks alongside any of years,
    /// months or days. Such a period cannot be written as ISO 8601 without
    /// folding the weeks into days first.
    pub(crate) fn mixes_weeks(&self) -> bool {
        self.weeks != 0.0
            && (self.years != 0.0 || self.months != 0.0 || self.days != 0.0)
    }

    /// Returns the integral `(years, months, days)` to add to a date, with
    /// weeks folded into days. `None` when any component is fractional or
    /// does not fit an `i64`.
    pub(crate) fn to_calendar(&self) -> Option<(i64, i64, i64)> {
        if !self.is_integral() {
            return None;
        }
        let p = self.normalize_weeks();
        Some((to_i64(p.years)?, to_i64(p.months)?, to_i64(p.days)?))
    }
}

/// `f64::trunc` lives in `std`.
fn trunc(n: f64) -> f64 {
    if n.abs() >= 4_503_599_627_370_496.0 {
        // 2^52 and above have no fractional part.
        n
    } else {
        (n as i64) as f64
    }
}

fn to_i64(n: f64) -> Option<i64> {
    // `i64::MAX as f64` rounds up to 2^63.
    if -9_223_372_036_854_775_808.0 <= n && n < 9_223_372_036_854_775_808.0 {
        Some(n as i64)
    } else {
        None
    }
}

impl core::fmt::Display for Period {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::FmtWrite;

        DurationPrinter::new()
            .print_period(self, FmtWrite(f))
            .map_err(|_| core::fmt::Error)
    }
}

impl core::fmt::Debug for Period {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

/// Parses an ISO 8601 duration with no time part, such as `P3Y6M4D` or
/// `P2W`.
impl core::str::FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Period, Error> {
        let parsed = iso8601::parse_parts(s)?;
        if parsed.has_time {
            return Err(Error::from(IE::TimeUnitsInPeriod));
        }
        Ok(parsed.period)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Period {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Period {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Period, D::Error> {
        deserializer.deserialize_str(crate::fmt::serde::FromStrVisitor::new(
            "an ISO 8601 period string like P1Y2M",
        ))
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn builder_and_accessors() {
        let p = Period::new().years(1.5).weeks(2);
        assert_eq!(p.get_years(), 1.5);
        assert_eq!(p.get_weeks(), 2.0);
        assert!(!p.is_integral());
        assert!(Period::new().days(-3).is_integral());
        assert!(!Period::new().days(f64::NAN).is_integral());
        assert_eq!(p.negate().get_years(), -1.5);
        assert!(Period::ZERO.is_zero());
        assert!(Period::ZERO.negate().is_zero());
    }

    #[test]
    fn to_calendar() {
        let p = Period::new().years(1).months(-2).weeks(1).days(3);
        assert_eq!(p.to_calendar(), Some((1, -2, 10)));
        assert_eq!(Period::new().months(0.5).to_calendar(), None);
        assert_eq!(Period::new().days(1e19).to_calendar(), None);
    }

    #[test]
    fn display() {
        assert_eq!(Period::new().weeks(2).to_string(), "P2W");
        assert_eq!(Period::new().years(0.5).to_string(), "P0.5Y");
        assert_eq!(Period::new().years(1).weeks(1).to_string(), "P1Y7D");
        assert_eq!(Period::new().years(-1).days(-2).to_string(), "-P1Y2D");
        assert_eq!(Period::new().years(1).months(-2).to_string(), "P1Y-2M");
    }

    #[test]
    fn parse() {
        assert_eq!("p2w".parse::<Period>().unwrap(), Period::new().weeks(2));
        assert_eq!("-P1Y".parse::<Period>().unwrap(), Period::new().years(-1));
        assert_eq!("P0,5M".parse::<Period>().unwrap(), Period::new().months(0.5));
        insta::assert_snapshot!(
            "P1DT1H".parse::<Period>().unwrap_err(),
            @"a period cannot contain hours, minutes or seconds",
        );
    }
}

use crate::{
    error::{interval::Error as E, Error},
    fmt::iso8601,
    Extent, OffsetDateTime, Period,
};

/// How many times an interval repeats.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Repeat {
    /// A fixed number of repetitions, written `Rn/`.
    Count(u32),
    /// Repeats without end, written `R/`.
    Unbounded,
}

/// An ISO 8601 time interval, with an optional repetition count.
///
/// An interval stores two of its start, end and duration, or only a
/// duration. The third quantity is derived on request:
///
/// ```
/// use tempora::{civil::datetime, tz::Offset, Extent, Interval, Period};
///
/// let start = datetime(2020, 3, 18, 9, 0, 0, 0).to_offset(Offset::UTC);
/// let interval = Interval::starting(start, Period::new().days(20), Extent::ZERO);
/// assert_eq!(interval.end()?.to_string(), "2020-04-07T09:00:00Z");
/// assert_eq!(interval.to_string(), "2020-03-18T09:00:00Z/P20D");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// A duration that uses fractional calendar units has no defined length, so
/// an endpoint cannot be derived from it:
///
/// ```
/// use tempora::Interval;
///
/// let interval: Interval = "2020-01-01T00:00:00Z/P0.5M".parse()?;
/// assert!(interval.end().unwrap_err().is_unsupported_representation());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    shape: Shape,
    repeat: Option<Repeat>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Shape {
    StartEnd(OffsetDateTime, OffsetDateTime),
    StartDuration(OffsetDateTime, Period, Extent),
    DurationEnd(Period, Extent, OffsetDateTime),
    Duration(Period, Extent),
}

impl Interval {
    /// The interval between two instants.
    pub fn between(start: OffsetDateTime, end: OffsetDateTime) -> Interval {
        Interval::from_shape(Shape::StartEnd(start, end))
    }

    /// The interval that begins at `start` and lasts for the given period
    /// followed by the given extent.
    pub fn starting(
        start: OffsetDateTime,
        period: Period,
        extent: Extent,
    ) -> Interval {
        Interval::from_shape(Shape::StartDuration(start, period, extent))
    }

    /// The interval that lasts for the given period and extent, ending at
    /// `end`.
    pub fn ending(
        period: Period,
        extent: Extent,
        end: OffsetDateTime,
    ) -> Interval {
        Interval::from_shape(Shape::DurationEnd(period, extent, end))
    }

    /// A duration that is not anchored to any instant.
    pub fn of(period: Period, extent: Extent) -> Interval {
        Interval::from_shape(Shape::Duration(period, extent))
    }

    pub(crate) fn from_shape(shape: Shape) -> Interval {
        Interval { shape, repeat: None }
    }

    pub(crate) fn shape(&self) -> Shape {
        self.shape
    }

    /// Returns this interval with the given repetition count.
    pub fn with_repetitions(self, repeat: Repeat) -> Interval {
        Interval { repeat: Some(repeat), ..self }
    }

    /// Returns the repetition count, if one was given.
    pub fn repetitions(&self) -> Option<Repeat> {
        self.repeat
    }

    /// Returns true when the start is stored.
    pub fn has_start(&self) -> bool {
        matches!(self.shape, Shape::StartEnd(..) | Shape::StartDuration(..))
    }

    /// Returns true when the end is stored.
    pub fn has_end(&self) -> bool {
        matches!(self.shape, Shape::StartEnd(..) | Shape::DurationEnd(..))
    }

    /// Returns true when the duration is stored.
    pub fn has_duration(&self) -> bool {
        !matches!(self.shape, Shape::StartEnd(..))
    }

    /// Returns the start of this interval, deriving it from the end and
    /// duration when necessary.
    ///
    /// The extent is removed first, then the period.
    ///
    /// # Errors
    ///
    /// This returns an error when only a duration is stored, when the period
    /// is fractional, or when the start falls outside the supported range.
    pub fn start(&self) -> Result<OffsetDateTime, Error> {
        match self.shape {
            Shape::StartEnd(start, _) | Shape::StartDuration(start, ..) => {
                Ok(start)
            }
            Shape::DurationEnd(period, extent, end) => {
                let (years, months, days) = calendar(&period.negate())?;
                let extent = extent.checked_neg()?;
                end.checked_add(extent)?
                    .checked_add_calendar(years, months, days)
            }
            Shape::Duration(..) => Err(Error::from(E::NoStart)),
        }
    }

    /// Returns the end of this interval, deriving it from the start and
    /// duration when necessary.
    ///
    /// The period is applied first, then the extent.
    ///
    /// # Errors
    ///
    /// This returns an error when only a duration is stored, when the period
    /// is fractional, or when the end falls outside the supported range.
    pub fn end(&self) -> Result<OffsetDateTime, Error> {
        match self.shape {
            Shape::StartEnd(_, end) | Shape::DurationEnd(.., end) => Ok(end),
            Shape::StartDuration(start, period, extent) => {
                let (years, months, days) = calendar(&period)?;
                start.checked_add_calendar(years, months, days)?
                    .checked_add(extent)
            }
            Shape::Duration(..) => Err(Error::from(E::NoEnd)),
        }
    }

    /// Returns the duration of this interval. An interval stored as two
    /// endpoints yields a zero period and the exact extent between them.
    pub fn duration(&self) -> (Period, Extent) {
        match self.shape {
            Shape::StartEnd(start, end) => (Period::ZERO, end.since(start)),
            Shape::StartDuration(_, period, extent)
            | Shape::DurationEnd(period, extent, _)
            | Shape::Duration(period, extent) => (period, extent),
        }
    }
}

fn calendar(period: &Period) -> Result<(i64, i64, i64), Error> {
    period.to_calendar().ok_or_else(|| Error::from(E::FractionalPeriod))
}

impl core::fmt::Display for Interval {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::FmtWrite;

        iso8601::print_interval(self, FmtWrite(f)).map_err(|_| core::fmt::Error)
    }
}

/// Parses an ISO 8601 interval such as `R5/2008-03-01T13:00:00Z/P1Y2M10DT2H30M`.
///
/// Endpoints without an offset are taken to be in UTC, and an endpoint with
/// only a date is taken to be midnight UTC.
impl core::str::FromStr for Interval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Interval, Error> {
        iso8601::parse_interval(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Interval {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Interval {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Interval, D::Error> {
        deserializer.deserialize_str(crate::fmt::serde::FromStrVisitor::new(
            "an ISO 8601 interval string like 2007-03-01T13:00:00Z/P1Y",
        ))
    }
}

/*!
The ISO 8601 duration and interval grammars.

A duration is written `PnYnMnWnDTnHnMnS`. Every component is optional, but
at least one is required. The calendar part (before `T`) becomes a
[`Period`], while the time part (after `T`) becomes an exact [`Extent`]. The
letter `M` means months before `T` and minutes after it.

```
use tempora::{fmt::iso8601, Extent, Period};

let (period, extent) = iso8601::parse_duration("P3Y6M4DT1M5S")?;
assert_eq!(period, Period::new().years(3).months(6).days(4));
assert_eq!(extent, Extent::from_secs(65));

let text = iso8601::format_duration(&period, Extent::from_secs(5_405));
assert_eq!(text, "P3Y6M4DT1H30M5S");

# Ok::<(), Box<dyn std::error::Error>>(())
```

# Parsing

The parser is a little more lenient than the grammar in the standard:

* A leading `-` negates every component, and a leading `+` is ignored.
* Designators may be lowercase.
* Either `.` or `,` may be used as the decimal mark.
* Calendar components may be fractional. Only the last time component may
be fractional, with at most 9 digits.
* Weeks cannot be combined with years, months or days.

The time part is accumulated exactly in nanoseconds. A total beyond the range
of an [`Extent`] is an error, never a wrapped value.

# Printing

[`format_duration`] omits zero components, and prints `P0D` when everything
is zero. Weeks mixed with other calendar units are folded into days. The time
part prints the run of units from the first non-zero one to the last, so one
hour and five seconds is `PT1H0M5S`.

The exclusive mode, available through [`Duration::to_iso_with`], prints
exactly the units chosen in a [`Designators`] set.

[`Duration::to_iso_with`]: crate::Duration::to_iso_with
*/

use alloc::string::String;

use crate::{error::Error, Extent, Period};

pub(crate) use self::duration::{parse_parts, DurationPrinter};
pub(crate) use self::interval::{parse_interval, print_interval};

mod duration;
mod interval;

/// Parses an ISO 8601 duration into its calendar and time parts.
///
/// # Errors
///
/// This returns an error for any syntax error, or when the time part does
/// not fit in an [`Extent`].
///
/// # Example
///
/// ```
/// use tempora::fmt::iso8601;
///
/// let err = iso8601::parse_duration("P1H").unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "unexpected character 'H' at position 2, expected one of Y, M, W or D",
/// );
/// ```
pub fn parse_duration(input: &str) -> Result<(Period, Extent), Error> {
    let parsed = parse_parts(input)?;
    Ok((parsed.period, parsed.extent))
}

/// Formats a period and an extent as a single ISO 8601 duration.
///
/// ```
/// use tempora::{fmt::iso8601, Extent, Period};
///
/// assert_eq!(iso8601::format_duration(&Period::ZERO, Extent::ZERO), "P0D");
/// assert_eq!(
///     iso8601::format_duration(&Period::ZERO, Extent::from_secs(-30)),
///     "-PT30S",
/// );
/// assert_eq!(
///     iso8601::format_duration(&Period::new().weeks(2), Extent::ZERO),
///     "P2W",
/// );
/// ```
pub fn format_duration(period: &Period, extent: Extent) -> String {
    let mut buf = String::new();
    // Writing to a `String` never fails.
    let _ = DurationPrinter::new().print_duration(period, extent, &mut buf);
    buf
}

/// A set of time designators for the exclusive printing mode.
///
/// See [`Duration::to_iso_with`](crate::Duration::to_iso_with).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Designators {
    hours: bool,
    minutes: bool,
    seconds: bool,
}

impl Designators {
    /// Returns the empty set.
    pub const fn new() -> Designators {
        Designators { hours: false, minutes: false, seconds: false }
    }

    /// Whether to print hours (`H`).
    pub const fn hours(self, yes: bool) -> Designators {
        Designators { hours: yes, ..self }
    }

    /// Whether to print minutes (`M`).
    pub const fn minutes(self, yes: bool) -> Designators {
        Designators { minutes: yes, ..self }
    }

    /// Whether to print seconds (`S`).
    pub const fn seconds(self, yes: bool) -> Designators {
        Designators { seconds: yes, ..self }
    }

    /// Returns true when no designator is chosen.
    pub fn is_empty(&self) -> bool {
        !(self.hours || self.minutes || self.seconds)
    }

    /// Returns the chosen units, coarsest first.
    pub(crate) fn units(&self) -> impl Iterator<Item = TimeUnit> + '_ {
        [
            (self.hours, TimeUnit::Hour),
            (self.minutes, TimeUnit::Minute),
            (self.seconds, TimeUnit::Second),
        ]
        .into_iter()
        .filter_map(|(yes, unit)| if yes { Some(unit) } else { None })
    }
}

/// A unit of the time part of a duration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TimeUnit {
    Hour,
    Minute,
    Second,
}

impl TimeUnit {
    pub(crate) fn nanos(self) -> i128 {
        use crate::util::itime::{
            NANOS_PER_HOUR, NANOS_PER_MINUTE, NANOS_PER_SECOND,
        };

        i128::from(match self {
            TimeUnit::Hour => NANOS_PER_HOUR,
            TimeUnit::Minute => NANOS_PER_MINUTE,
            TimeUnit::Second => NANOS_PER_SECOND,
        })
    }

    pub(crate) fn designator(self) -> char {
        match self {
            TimeUnit::Hour => 'H',
            TimeUnit::Minute => 'M',
            TimeUnit::Second => 'S',
        }
    }
}

/*!
Civil ("local") dates and times that carry no UTC offset.

The types in this module describe a reading on a calendar and a wall clock:

* [`LocalDate`] is a proleptic Gregorian date backed by a Julian Day Number.
* [`LocalTime`] is a nanosecond of day. Hours `24..=99` are permitted and
are called "business hours". `25:00` is one hour past the *next* midnight.
* [`LocalDateTime`] pairs the two.
* [`Weekday`] and [`Era`] are small enums used by all of the above.

None of these types know about UTC offsets. Attaching an offset turns a
[`LocalDateTime`] into an [`OffsetDateTime`](crate::OffsetDateTime).
*/

pub use self::{
    date::{date, LocalDate},
    datetime::{datetime, LocalDateTime},
    time::{time, LocalTime},
    weekday::Weekday,
};

mod date;
mod datetime;
mod time;
mod weekday;

/// The era corresponding to a particular year.
///
/// The BCE era corresponds to years less than or equal to `0`, while the CE
/// era corresponds to years greater than `0`.
///
/// In particular, this crate allows years to be negative and also to be `0`,
/// which is contrary to the common practice of excluding the year `0` when
/// writing dates for the Gregorian calendar. Moreover, common practice eschews
/// negative years in favor of labeling a year with an era notation. That is,
/// the year `1 BCE` is year `0` in this crate. The year `2 BCE` is the year
/// `-1` in this crate.
///
/// To get the year in its era format, use [`LocalDate::era_year`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Era {
    /// The "before common era" era.
    ///
    /// This corresponds to all years less than or equal to `0`.
    BCE,
    /// The "common era" era.
    ///
    /// This corresponds to all years greater than `0`.
    CE,
}

impl Era {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Era::BCE => "BCE",
            Era::CE => "CE",
        }
    }

    /// Converts a year within this era to an astronomical year.
    pub(crate) fn to_year(self, era_year: i64) -> i64 {
        match self {
            Era::BCE => 1 - era_year,
            Era::CE => era_year,
        }
    }
}

impl core::fmt::Display for Era {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
